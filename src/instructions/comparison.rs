//! Comparison instructions.
//! LT, GT, SLT, SGT, EQ, ISZERO.
//!
//! The ordered comparisons pop `a` then `b` and compare `b` against `a`: the
//! second word popped is the left operand.

use crate::instructions::base::{
    binary_op, bool_to_word, signed_less_than, unary_op, InstructionHandler,
};
use crate::opcode::Opcode;
use crate::types::{InstructionContext, InstructionResult};

// --- LT (0x10) ---
/// b < a (unsigned)
pub struct LtInstruction;

impl LtInstruction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InstructionHandler for LtInstruction {
    fn opcode(&self) -> Opcode {
        Opcode::Lt
    }
    fn execute(&self, context: &mut InstructionContext<'_>) -> InstructionResult {
        binary_op(context, |a, b| bool_to_word(b < a))
    }
}

// --- GT (0x11) ---
/// b > a (unsigned)
pub struct GtInstruction;

impl GtInstruction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InstructionHandler for GtInstruction {
    fn opcode(&self) -> Opcode {
        Opcode::Gt
    }
    fn execute(&self, context: &mut InstructionContext<'_>) -> InstructionResult {
        binary_op(context, |a, b| bool_to_word(b > a))
    }
}

// --- SLT (0x12) ---
/// b < a, both read as two's complement
pub struct SltInstruction;

impl SltInstruction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InstructionHandler for SltInstruction {
    fn opcode(&self) -> Opcode {
        Opcode::Slt
    }
    fn execute(&self, context: &mut InstructionContext<'_>) -> InstructionResult {
        binary_op(context, |a, b| bool_to_word(signed_less_than(&b, &a)))
    }
}

// --- SGT (0x13) ---
/// b > a, both read as two's complement
pub struct SgtInstruction;

impl SgtInstruction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InstructionHandler for SgtInstruction {
    fn opcode(&self) -> Opcode {
        Opcode::Sgt
    }
    fn execute(&self, context: &mut InstructionContext<'_>) -> InstructionResult {
        binary_op(context, |a, b| bool_to_word(signed_less_than(&a, &b)))
    }
}

// --- EQ (0x14) ---
pub struct EqInstruction;

impl EqInstruction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InstructionHandler for EqInstruction {
    fn opcode(&self) -> Opcode {
        Opcode::Eq
    }
    fn execute(&self, context: &mut InstructionContext<'_>) -> InstructionResult {
        binary_op(context, |a, b| bool_to_word(a == b))
    }
}

// --- ISZERO (0x15) ---
pub struct IsZeroInstruction;

impl IsZeroInstruction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InstructionHandler for IsZeroInstruction {
    fn opcode(&self) -> Opcode {
        Opcode::IsZero
    }
    fn execute(&self, context: &mut InstructionContext<'_>) -> InstructionResult {
        unary_op(context, |a| bool_to_word(a.is_zero()))
    }
}
