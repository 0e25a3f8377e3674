//! Base instruction handler trait and word helpers shared by the handlers.

use crate::opcode::Opcode;
use crate::types::{bytes_to_hex, InstructionContext, InstructionResult, Word};

/// Bit index of the two's-complement sign bit.
const SIGN_BIT: usize = 255;

/// 1 for true, 0 for false.
#[must_use]
pub fn bool_to_word(value: bool) -> Word {
    if value {
        Word::from(1u64)
    } else {
        Word::ZERO
    }
}

/// Whether the word is negative when read as two's complement.
#[must_use]
pub fn is_negative(value: &Word) -> bool {
    value.bit(SIGN_BIT)
}

/// Magnitude and sign of a two's-complement word. `MIN` maps to itself.
#[must_use]
pub fn split_sign(value: Word) -> (Word, bool) {
    if is_negative(&value) {
        (value.wrapping_neg(), true)
    } else {
        (value, false)
    }
}

/// Reapply a sign to a magnitude.
#[must_use]
pub fn apply_sign(magnitude: Word, negative: bool) -> Word {
    if negative {
        magnitude.wrapping_neg()
    } else {
        magnitude
    }
}

/// `left < right` with both read as two's complement.
#[must_use]
pub fn signed_less_than(left: &Word, right: &Word) -> bool {
    match (is_negative(left), is_negative(right)) {
        (true, false) => true,
        (false, true) => false,
        // same sign: two's-complement order matches unsigned order
        _ => left < right,
    }
}

/// Pop two words (`a` = top), push `op(a, b)`.
pub fn binary_op(
    context: &mut InstructionContext<'_>,
    op: impl FnOnce(Word, Word) -> Word,
) -> InstructionResult {
    let [a, b] = context.stack.pop_array()?;
    context.stack.push(op(a, b))
}

/// Pop one word, push `op(a)`.
pub fn unary_op(
    context: &mut InstructionContext<'_>,
    op: impl FnOnce(Word) -> Word,
) -> InstructionResult {
    let a = context.stack.pop()?;
    context.stack.push(op(a))
}

/// Base trait for all instruction handlers.
pub trait InstructionHandler: Send + Sync {
    fn opcode(&self) -> Opcode;

    fn name(&self) -> &'static str {
        self.opcode().name()
    }

    /// Execute the instruction. The engine has already checked stack depth
    /// and consumed the immediate bytes.
    fn execute(&self, context: &mut InstructionContext<'_>) -> InstructionResult;

    fn disassemble(&self, immediate: &[u8]) -> String {
        if self.opcode().immediate_size() == 0 {
            self.name().to_string()
        } else {
            format!("{} 0x{}", self.name(), bytes_to_hex(immediate))
        }
    }
}
