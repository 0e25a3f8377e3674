//! Linear memory: zero-initialised, byte addressed, grows on access, never shrinks.

use std::ops::Range;

use crate::codec::word_to_usize;
use crate::config::WORD_SIZE;
use crate::error::Fault;
use crate::types::Word;

/// Flat byte memory with an optional size cap.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Memory {
    bytes: Vec<u8>,
    limit: Option<usize>,
}

impl Memory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            bytes: Vec::new(),
            limit,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }

    /// Resolve `size` bytes at a word offset to a host range, checking that the
    /// access is addressable and within the limit. Does not grow memory.
    pub fn checked_range(&self, offset: &Word, size: usize) -> Result<Range<usize>, Fault> {
        let start = word_to_usize(offset).ok_or(Fault::MemoryOffsetOverflow)?;
        let end = start.checked_add(size).ok_or(Fault::MemoryOffsetOverflow)?;
        if end > self.bytes.len() {
            if let Some(limit) = self.limit {
                if end > limit {
                    return Err(Fault::MemoryLimitExceeded {
                        requested: end,
                        limit,
                    });
                }
            }
        }
        Ok(start..end)
    }

    /// Append zero bytes until the memory is at least `size` long.
    fn ensure_size(&mut self, size: usize) {
        if self.bytes.len() < size {
            self.bytes.resize(size, 0);
        }
    }

    /// Bytes of a range returned by `checked_range`, growing memory to cover it.
    fn read(&mut self, range: Range<usize>) -> &[u8] {
        self.ensure_size(range.end);
        &self.bytes[range]
    }

    /// Write into a range returned by `checked_range`, growing memory to cover it.
    fn write(&mut self, range: Range<usize>, values: &[u8]) {
        self.ensure_size(range.end);
        self.bytes[range].copy_from_slice(values);
    }

    /// Big-endian word at `offset`. Fails without growing memory.
    pub fn load_word(&mut self, offset: &Word) -> Result<Word, Fault> {
        let range = self.checked_range(offset, WORD_SIZE)?;
        let mut buf = [0u8; WORD_SIZE];
        buf.copy_from_slice(self.read(range));
        Ok(Word::from_be_bytes(buf))
    }

    pub fn store_word(&mut self, offset: &Word, value: &Word) -> Result<(), Fault> {
        let range = self.checked_range(offset, WORD_SIZE)?;
        self.write(range, &value.to_be_bytes::<WORD_SIZE>());
        Ok(())
    }

    pub fn store_byte(&mut self, offset: &Word, value: u8) -> Result<(), Fault> {
        let range = self.checked_range(offset, 1)?;
        self.write(range, &[value]);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }
}
