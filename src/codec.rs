//! Big-endian word encoding shared by the engine, the disassembler and the bindings.

use crate::config::WORD_SIZE;
use crate::types::Word;

/// Decode a push immediate of `size` bytes. Bytes missing from `present`
/// (code ended early) read as zero, i.e. the immediate is right-padded.
#[must_use]
pub fn decode_immediate(present: &[u8], size: usize) -> Word {
    let size = size.min(WORD_SIZE);
    let mut buf = [0u8; WORD_SIZE];
    let start = WORD_SIZE - size;
    let take = present.len().min(size);
    buf[start..start + take].copy_from_slice(&present[..take]);
    Word::from_be_bytes(buf)
}

#[must_use]
pub fn word_to_be_bytes(word: &Word) -> [u8; WORD_SIZE] {
    word.to_be_bytes::<WORD_SIZE>()
}

/// Concatenate words as 32-byte big-endian chunks, in slice order.
#[must_use]
pub fn encode_words(words: &[Word]) -> Vec<u8> {
    let mut out = Vec::with_capacity(words.len() * WORD_SIZE);
    for word in words {
        out.extend_from_slice(&word_to_be_bytes(word));
    }
    out
}

/// `None` when the word does not fit in `usize`.
#[must_use]
pub fn word_to_usize(word: &Word) -> Option<usize> {
    let limbs = word.as_limbs();
    if limbs[1..].iter().any(|&limb| limb != 0) {
        return None;
    }
    usize::try_from(limbs[0]).ok()
}
