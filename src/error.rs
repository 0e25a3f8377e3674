//! Execution failures.

use thiserror::Error;

use crate::config::{
    RESULT_CODE_INVALID_OPCODE, RESULT_CODE_MEMORY_LIMIT, RESULT_CODE_MEMORY_OFFSET_OVERFLOW,
    RESULT_CODE_STACK_OVERFLOW, RESULT_CODE_STACK_UNDERFLOW, RESULT_CODE_STEP_LIMIT,
};

/// The kind of a fatal failure. Instruction handlers report these; the engine
/// attaches the instruction pointer.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Fault {
    /// The opcode needs more operands than the stack holds.
    #[error("stack underflow: {required} operand(s) required, {available} available")]
    StackUnderflow { required: usize, available: usize },
    /// The code byte is not part of the instruction set.
    #[error("invalid opcode {0:#04x}")]
    InvalidOpcode(u8),
    #[error("stack overflow: depth limit {limit}")]
    StackOverflow { limit: usize },
    #[error("memory limit exceeded: {requested} bytes requested, limit {limit}")]
    MemoryLimitExceeded { requested: usize, limit: usize },
    /// A memory offset (plus access size) does not fit in the host address space.
    #[error("memory offset out of addressable range")]
    MemoryOffsetOverflow,
    #[error("step limit {limit} reached")]
    StepLimitExceeded { limit: u64 },
}

impl Fault {
    /// Stable numeric code for the bindings.
    #[must_use]
    pub const fn code(&self) -> u8 {
        match self {
            Self::StackUnderflow { .. } => RESULT_CODE_STACK_UNDERFLOW,
            Self::InvalidOpcode(_) => RESULT_CODE_INVALID_OPCODE,
            Self::StackOverflow { .. } => RESULT_CODE_STACK_OVERFLOW,
            Self::MemoryLimitExceeded { .. } => RESULT_CODE_MEMORY_LIMIT,
            Self::MemoryOffsetOverflow => RESULT_CODE_MEMORY_OFFSET_OVERFLOW,
            Self::StepLimitExceeded { .. } => RESULT_CODE_STEP_LIMIT,
        }
    }

    /// Attach the instruction pointer of the failing opcode.
    #[must_use]
    pub const fn at(self, pc: usize) -> EvmError {
        EvmError { pc, fault: self }
    }
}

/// A fault together with the instruction pointer where execution stopped.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{fault} at pc {pc:#06x}")]
pub struct EvmError {
    pub pc: usize,
    pub fault: Fault,
}

impl EvmError {
    #[must_use]
    pub const fn fault(&self) -> &Fault {
        &self.fault
    }

    #[must_use]
    pub const fn pc(&self) -> usize {
        self.pc
    }

    #[must_use]
    pub const fn code(&self) -> u8 {
        self.fault.code()
    }
}
