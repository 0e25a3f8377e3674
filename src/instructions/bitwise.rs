//! Bitwise instructions.
//! AND, OR, XOR, NOT, BYTE.

use crate::codec::{word_to_be_bytes, word_to_usize};
use crate::config::WORD_SIZE;
use crate::instructions::base::{binary_op, unary_op, InstructionHandler};
use crate::opcode::Opcode;
use crate::types::{InstructionContext, InstructionResult, Word};

// --- AND (0x16) ---
pub struct AndInstruction;

impl AndInstruction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InstructionHandler for AndInstruction {
    fn opcode(&self) -> Opcode {
        Opcode::And
    }
    fn execute(&self, context: &mut InstructionContext<'_>) -> InstructionResult {
        binary_op(context, |a, b| a & b)
    }
}

// --- OR (0x17) ---
pub struct OrInstruction;

impl OrInstruction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InstructionHandler for OrInstruction {
    fn opcode(&self) -> Opcode {
        Opcode::Or
    }
    fn execute(&self, context: &mut InstructionContext<'_>) -> InstructionResult {
        binary_op(context, |a, b| a | b)
    }
}

// --- XOR (0x18) ---
pub struct XorInstruction;

impl XorInstruction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InstructionHandler for XorInstruction {
    fn opcode(&self) -> Opcode {
        Opcode::Xor
    }
    fn execute(&self, context: &mut InstructionContext<'_>) -> InstructionResult {
        binary_op(context, |a, b| a ^ b)
    }
}

// --- NOT (0x19) ---
/// 256-bit complement.
pub struct NotInstruction;

impl NotInstruction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InstructionHandler for NotInstruction {
    fn opcode(&self) -> Opcode {
        Opcode::Not
    }
    fn execute(&self, context: &mut InstructionContext<'_>) -> InstructionResult {
        unary_op(context, |a| !a)
    }
}

// --- BYTE (0x1A) ---
/// Pops index i, then value x. Byte i of x counted from the most significant end; 0 for i >= 32.
pub struct ByteInstruction;

impl ByteInstruction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InstructionHandler for ByteInstruction {
    fn opcode(&self) -> Opcode {
        Opcode::Byte
    }
    fn execute(&self, context: &mut InstructionContext<'_>) -> InstructionResult {
        binary_op(context, |index, value| {
            match word_to_usize(&index).filter(|&i| i < WORD_SIZE) {
                Some(i) => Word::from(word_to_be_bytes(&value)[i]),
                None => Word::ZERO,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instructions::test_utils::{edge_words, execute_single, word};

    #[test]
    fn and_or_xor() {
        assert_eq!(execute_single(&AndInstruction, &[word(0b1100), word(0b1010)]), word(0b1000));
        assert_eq!(execute_single(&OrInstruction, &[word(0b1100), word(0b1010)]), word(0b1110));
        assert_eq!(execute_single(&XorInstruction, &[word(0b1100), word(0b1010)]), word(0b0110));
        assert_eq!(execute_single(&XorInstruction, &[Word::MAX, Word::MAX]), Word::ZERO);
    }

    #[test]
    fn not_is_full_width_complement() {
        assert_eq!(execute_single(&NotInstruction, &[Word::ZERO]), Word::MAX);
        assert_eq!(execute_single(&NotInstruction, &[word(1)]), Word::MAX - word(1));
    }

    #[test]
    fn not_is_an_involution() {
        for &x in &edge_words() {
            let once = execute_single(&NotInstruction, &[x]);
            assert_eq!(execute_single(&NotInstruction, &[once]), x);
        }
    }

    #[test]
    fn byte_indexes_from_most_significant() {
        let value = (Word::from(0xabu64) << 248usize) | word(0xcd);
        assert_eq!(execute_single(&ByteInstruction, &[word(0), value]), word(0xab));
        assert_eq!(execute_single(&ByteInstruction, &[word(31), value]), word(0xcd));
        assert_eq!(execute_single(&ByteInstruction, &[word(15), value]), Word::ZERO);
    }

    #[test]
    fn byte_out_of_range_is_zero() {
        assert_eq!(execute_single(&ByteInstruction, &[word(32), Word::MAX]), Word::ZERO);
        assert_eq!(execute_single(&ByteInstruction, &[Word::MAX, Word::MAX]), Word::ZERO);
    }
}
