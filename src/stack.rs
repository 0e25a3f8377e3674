//! Operand stack.

use crate::error::Fault;
use crate::types::Word;

/// Growable stack of words, top of stack last.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stack {
    words: Vec<Word>,
    limit: Option<usize>,
}

impl Stack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stack refusing to grow beyond `limit` words.
    #[must_use]
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            words: Vec::new(),
            limit,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Bottom to top.
    #[must_use]
    pub fn as_slice(&self) -> &[Word] {
        &self.words
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Word> {
        self.words
    }

    /// Word `depth` positions below the top (0 = top).
    #[must_use]
    pub fn peek(&self, depth: usize) -> Option<&Word> {
        self.words
            .len()
            .checked_sub(depth + 1)
            .and_then(|index| self.words.get(index))
    }

    /// Fail unless at least `required` words are present.
    pub fn require(&self, required: usize) -> Result<(), Fault> {
        if self.words.len() < required {
            return Err(Fault::StackUnderflow {
                required,
                available: self.words.len(),
            });
        }
        Ok(())
    }

    /// Fail if popping `inputs` and pushing `outputs` would exceed the depth limit.
    pub fn check_growth(&self, inputs: usize, outputs: usize) -> Result<(), Fault> {
        let Some(limit) = self.limit else {
            return Ok(());
        };
        let depth = self.words.len().saturating_sub(inputs) + outputs;
        if depth > limit {
            return Err(Fault::StackOverflow { limit });
        }
        Ok(())
    }

    pub fn push(&mut self, word: Word) -> Result<(), Fault> {
        self.check_growth(0, 1)?;
        self.words.push(word);
        Ok(())
    }

    pub fn pop(&mut self) -> Result<Word, Fault> {
        self.words.pop().ok_or(Fault::StackUnderflow {
            required: 1,
            available: 0,
        })
    }

    /// Pop `N` words; element 0 is the former top. Nothing is popped on underflow.
    pub fn pop_array<const N: usize>(&mut self) -> Result<[Word; N], Fault> {
        self.require(N)?;
        let mut out = [Word::ZERO; N];
        for slot in &mut out {
            *slot = self.pop()?;
        }
        Ok(out)
    }

    pub fn clear(&mut self) {
        self.words.clear();
    }
}
