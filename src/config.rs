//! Engine configuration constants and optional execution limits.

// ============================================================================
// Word / memory geometry
// ============================================================================
/// Bytes in one stack word (256 bits).
pub const WORD_SIZE: usize = 32;
/// Bits in one stack word.
pub const WORD_BITS: usize = 256;
/// Largest push immediate (PUSH32).
pub const MAX_PUSH_SIZE: usize = 32;

// ============================================================================
// Result codes (stable numbers exposed through the bindings)
// ============================================================================
pub const RESULT_CODE_OK: u8 = 0;
pub const RESULT_CODE_STACK_UNDERFLOW: u8 = 1;
pub const RESULT_CODE_INVALID_OPCODE: u8 = 2;
pub const RESULT_CODE_STACK_OVERFLOW: u8 = 3;
pub const RESULT_CODE_MEMORY_LIMIT: u8 = 4;
pub const RESULT_CODE_MEMORY_OFFSET_OVERFLOW: u8 = 5;
pub const RESULT_CODE_STEP_LIMIT: u8 = 6;

// ============================================================================
// Execution limits
// ============================================================================

/// Optional resource caps. Every field defaults to `None` (unbounded).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExecutionLimits {
    /// Maximum number of instructions executed by one engine.
    pub max_steps: Option<u64>,
    /// Maximum memory length in bytes.
    pub max_memory_bytes: Option<usize>,
    /// Maximum number of words on the stack.
    pub max_stack_depth: Option<usize>,
}

impl ExecutionLimits {
    /// No limits at all.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            max_steps: None,
            max_memory_bytes: None,
            max_stack_depth: None,
        }
    }

    #[must_use]
    pub const fn with_max_steps(mut self, steps: u64) -> Self {
        self.max_steps = Some(steps);
        self
    }

    #[must_use]
    pub const fn with_max_memory_bytes(mut self, bytes: usize) -> Self {
        self.max_memory_bytes = Some(bytes);
        self
    }

    #[must_use]
    pub const fn with_max_stack_depth(mut self, depth: usize) -> Self {
        self.max_stack_depth = Some(depth);
        self
    }

    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.max_steps.is_none() && self.max_memory_bytes.is_none() && self.max_stack_depth.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_are_unbounded() {
        assert!(ExecutionLimits::default().is_unbounded());
        assert_eq!(ExecutionLimits::default(), ExecutionLimits::unbounded());
    }

    #[test]
    fn builders_set_individual_caps() {
        let limits = ExecutionLimits::unbounded()
            .with_max_steps(10)
            .with_max_memory_bytes(64)
            .with_max_stack_depth(4);
        assert_eq!(limits.max_steps, Some(10));
        assert_eq!(limits.max_memory_bytes, Some(64));
        assert_eq!(limits.max_stack_depth, Some(4));
        assert!(!limits.is_unbounded());
    }
}
