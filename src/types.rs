//! Engine type definitions.

use crate::error::Fault;
use crate::memory::Memory;
use crate::stack::Stack;

/// A 256-bit unsigned machine word. Signedness is a per-opcode reinterpretation.
pub type Word = ruint::aliases::U256;

// ============================================================================
// Instruction execution
// ============================================================================

/// Result of one instruction handler.
pub type InstructionResult = Result<(), Fault>;

/// Everything an instruction handler may touch.
pub struct InstructionContext<'a> {
    pub stack: &'a mut Stack,
    pub memory: &'a mut Memory,
    /// Immediate bytes present in the code. May be shorter than the opcode's
    /// immediate size when the code ends early.
    pub immediate: &'a [u8],
}

/// What a single `step` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// One instruction executed; more code may follow.
    Continue,
    /// The instruction pointer is at or past the end of the code.
    Halted,
}

// ============================================================================
// Engine status
// ============================================================================

/// Engine lifecycle (exposed as i32 through the bindings).
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionStatus {
    Running = 0,
    Halted = 1,
    Failed = 2,
}

/// Summary returned by a successful `run`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub steps: u64,
    pub pc: usize,
    pub stack_depth: usize,
    pub memory_size: usize,
}

// ============================================================================
// Helpers
// ============================================================================

/// Convert bytes to lowercase hex without prefix.
#[must_use]
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut result = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        result.push_str(&format!("{b:02x}"));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_lowercase_and_unprefixed() {
        assert_eq!(bytes_to_hex(&[0x00, 0xab, 0x7f]), "00ab7f");
        assert_eq!(bytes_to_hex(&[]), "");
    }
}
