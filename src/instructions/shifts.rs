//! Shift instructions. All pop the shift amount first, then the value.
//! SHL, SHR, SAR.

use crate::codec::word_to_usize;
use crate::config::WORD_BITS;
use crate::instructions::base::{binary_op, is_negative, InstructionHandler};
use crate::opcode::Opcode;
use crate::types::{InstructionContext, InstructionResult, Word};

/// Shift amount as usize, `None` when it clears every bit.
fn shift_amount(shift: &Word) -> Option<usize> {
    word_to_usize(shift).filter(|&s| s < WORD_BITS)
}

// --- SHL (0x1B) ---
/// value << shift mod 2^256
pub struct ShlInstruction;

impl ShlInstruction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InstructionHandler for ShlInstruction {
    fn opcode(&self) -> Opcode {
        Opcode::Shl
    }
    fn execute(&self, context: &mut InstructionContext<'_>) -> InstructionResult {
        binary_op(context, |shift, value| match shift_amount(&shift) {
            Some(s) => value << s,
            None => Word::ZERO,
        })
    }
}

// --- SHR (0x1C) ---
/// Logical right shift.
pub struct ShrInstruction;

impl ShrInstruction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InstructionHandler for ShrInstruction {
    fn opcode(&self) -> Opcode {
        Opcode::Shr
    }
    fn execute(&self, context: &mut InstructionContext<'_>) -> InstructionResult {
        binary_op(context, |shift, value| match shift_amount(&shift) {
            Some(s) => value >> s,
            None => Word::ZERO,
        })
    }
}

// --- SAR (0x1D) ---
/// Arithmetic right shift: vacated bits copy the sign bit.
pub struct SarInstruction;

impl SarInstruction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InstructionHandler for SarInstruction {
    fn opcode(&self) -> Opcode {
        Opcode::Sar
    }
    fn execute(&self, context: &mut InstructionContext<'_>) -> InstructionResult {
        binary_op(context, arithmetic_shift_right)
    }
}

#[must_use]
pub fn arithmetic_shift_right(shift: Word, value: Word) -> Word {
    let negative = is_negative(&value);
    match (shift_amount(&shift), negative) {
        (Some(s), false) => value >> s,
        (Some(s), true) => !((!value) >> s),
        (None, false) => Word::ZERO,
        (None, true) => Word::MAX,
    }
}
