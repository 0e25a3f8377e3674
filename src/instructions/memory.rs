//! Memory instructions.
//! MLOAD, MSTORE, MSTORE8, MSIZE.
//!
//! Operands are read in place and popped only after the memory access
//! succeeds, so a rejected access leaves stack and memory unchanged.

use crate::error::Fault;
use crate::instructions::base::InstructionHandler;
use crate::opcode::Opcode;
use crate::types::{InstructionContext, InstructionResult, Word};

/// Word `depth` positions below the top. The engine has already checked the depth.
fn operand(context: &InstructionContext<'_>, depth: usize) -> Result<Word, Fault> {
    context
        .stack
        .peek(depth)
        .copied()
        .ok_or(Fault::StackUnderflow {
            required: depth + 1,
            available: context.stack.len(),
        })
}

// --- MLOAD (0x51) ---
/// Push the big-endian word at offset, growing memory to offset + 32.
pub struct MLoadInstruction;

impl MLoadInstruction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InstructionHandler for MLoadInstruction {
    fn opcode(&self) -> Opcode {
        Opcode::MLoad
    }
    fn execute(&self, context: &mut InstructionContext<'_>) -> InstructionResult {
        let offset = operand(context, 0)?;
        let value = context.memory.load_word(&offset)?;
        context.stack.pop()?;
        context.stack.push(value)
    }
}

// --- MSTORE (0x52) ---
/// Pops offset, then value; writes the value as 32 big-endian bytes.
pub struct MStoreInstruction;

impl MStoreInstruction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InstructionHandler for MStoreInstruction {
    fn opcode(&self) -> Opcode {
        Opcode::MStore
    }
    fn execute(&self, context: &mut InstructionContext<'_>) -> InstructionResult {
        let offset = operand(context, 0)?;
        let value = operand(context, 1)?;
        context.memory.store_word(&offset, &value)?;
        context.stack.pop_array::<2>().map(drop)
    }
}

// --- MSTORE8 (0x53) ---
/// Pops offset, then value; writes the low byte of the value.
pub struct MStore8Instruction;

impl MStore8Instruction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InstructionHandler for MStore8Instruction {
    fn opcode(&self) -> Opcode {
        Opcode::MStore8
    }
    fn execute(&self, context: &mut InstructionContext<'_>) -> InstructionResult {
        let offset = operand(context, 0)?;
        let low_byte = operand(context, 1)?.as_limbs()[0] as u8;
        context.memory.store_byte(&offset, low_byte)?;
        context.stack.pop_array::<2>().map(drop)
    }
}

// --- MSIZE (0x59) ---
/// Current memory length in bytes.
pub struct MSizeInstruction;

impl MSizeInstruction {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InstructionHandler for MSizeInstruction {
    fn opcode(&self) -> Opcode {
        Opcode::MSize
    }
    fn execute(&self, context: &mut InstructionContext<'_>) -> InstructionResult {
        let size = Word::from(context.memory.len());
        context.stack.push(size)
    }
}
