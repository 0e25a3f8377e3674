//! Execution engine: decode, dispatch and the run loop.

use std::sync::OnceLock;

use tracing::debug;

use crate::config::ExecutionLimits;
use crate::error::{EvmError, Fault};
use crate::instructions::registry::InstructionRegistry;
use crate::instructions::registry_instructions::register_all_instructions;
use crate::memory::Memory;
use crate::stack::Stack;
use crate::types::{ExecutionStatus, InstructionContext, RunSummary, StepOutcome, Word};

/// Shared handler table, built on first use.
pub fn get_registry() -> &'static InstructionRegistry {
    static REGISTRY: OnceLock<InstructionRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut r = InstructionRegistry::new();
        register_all_instructions(&mut r);
        r
    })
}

/// One execution of one code buffer.
#[derive(Clone, Debug)]
pub struct Evm {
    code: Vec<u8>,
    pc: usize,
    stack: Stack,
    memory: Memory,
    limits: ExecutionLimits,
    steps: u64,
    status: ExecutionStatus,
    error: Option<EvmError>,
}

impl Evm {
    /// Engine over `code` with no resource limits.
    #[must_use]
    pub fn new(code: impl Into<Vec<u8>>) -> Self {
        Self::with_limits(code, ExecutionLimits::unbounded())
    }

    #[must_use]
    pub fn with_limits(code: impl Into<Vec<u8>>, limits: ExecutionLimits) -> Self {
        Self {
            code: code.into(),
            pc: 0,
            stack: Stack::with_limit(limits.max_stack_depth),
            memory: Memory::with_limit(limits.max_memory_bytes),
            limits,
            steps: 0,
            status: ExecutionStatus::Running,
            error: None,
        }
    }

    /// Rewind to the start of the code with empty stack and memory.
    pub fn reset(&mut self) {
        self.pc = 0;
        self.stack.clear();
        self.memory.clear();
        self.steps = 0;
        self.status = ExecutionStatus::Running;
        self.error = None;
    }

    /// Execute one instruction.
    ///
    /// Returns `Halted` once the instruction pointer is at or past the end of
    /// the code. A failure leaves stack and memory as they were before the
    /// failing instruction, and every later call returns the same error.
    pub fn step(&mut self) -> Result<StepOutcome, EvmError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        if self.pc >= self.code.len() {
            self.status = ExecutionStatus::Halted;
            return Ok(StepOutcome::Halted);
        }
        match self.execute_current() {
            Ok(()) => Ok(StepOutcome::Continue),
            Err(fault) => {
                let err = fault.at(self.pc);
                fault_log!(pc = err.pc, code = err.code(), "execution failed: {}", err.fault);
                self.status = ExecutionStatus::Failed;
                self.error = Some(err.clone());
                Err(err)
            }
        }
    }

    fn execute_current(&mut self) -> Result<(), Fault> {
        if let Some(limit) = self.limits.max_steps {
            if self.steps >= limit {
                return Err(Fault::StepLimitExceeded { limit });
            }
        }

        let byte = self.code[self.pc];
        let handler = get_registry()
            .get_handler(byte)
            .ok_or(Fault::InvalidOpcode(byte))?;
        let opcode = handler.opcode();
        self.stack.require(opcode.stack_inputs())?;
        self.stack
            .check_growth(opcode.stack_inputs(), opcode.stack_outputs())?;

        let immediate_start = self.pc + 1;
        let immediate_size = opcode.immediate_size();
        let immediate_end = immediate_start
            .saturating_add(immediate_size)
            .min(self.code.len());
        let immediate = &self.code[immediate_start..immediate_end];

        step_log!(pc = self.pc, op = handler.name(), depth = self.stack.len(), "step");

        let mut context = InstructionContext {
            stack: &mut self.stack,
            memory: &mut self.memory,
            immediate,
        };
        handler.execute(&mut context)?;

        // the pointer moves past the full immediate even if the code ended early
        self.pc = immediate_start + immediate_size;
        self.steps += 1;
        Ok(())
    }

    /// Step until the code is exhausted or an instruction fails.
    pub fn run(&mut self) -> Result<RunSummary, EvmError> {
        debug!(code_len = self.code.len(), pc = self.pc, "run start");
        loop {
            match self.step() {
                Ok(StepOutcome::Continue) => {}
                Ok(StepOutcome::Halted) => break,
                Err(err) => {
                    debug!(steps = self.steps, %err, "run failed");
                    return Err(err);
                }
            }
        }
        let summary = self.summary();
        debug!(
            steps = summary.steps,
            stack_depth = summary.stack_depth,
            memory_size = summary.memory_size,
            "run finished"
        );
        Ok(summary)
    }

    #[must_use]
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            steps: self.steps,
            pc: self.pc,
            stack_depth: self.stack.len(),
            memory_size: self.memory.len(),
        }
    }

    #[must_use]
    pub fn code(&self) -> &[u8] {
        &self.code
    }

    #[must_use]
    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Stack contents, bottom to top.
    #[must_use]
    pub fn stack(&self) -> &[Word] {
        self.stack.as_slice()
    }

    #[must_use]
    pub fn memory(&self) -> &[u8] {
        self.memory.as_bytes()
    }

    #[must_use]
    pub fn status(&self) -> ExecutionStatus {
        self.status
    }

    #[must_use]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    #[must_use]
    pub fn limits(&self) -> &ExecutionLimits {
        &self.limits
    }

    #[must_use]
    pub fn error(&self) -> Option<&EvmError> {
        self.error.as_ref()
    }

    /// Final stack (bottom to top) and memory.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Word>, Vec<u8>) {
        (self.stack.into_vec(), self.memory.into_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WORD_SIZE;

    fn word(v: u64) -> Word {
        Word::from(v)
    }

    fn run(code: &[u8]) -> Evm {
        let mut evm = Evm::new(code);
        evm.run().unwrap_or_else(|err| panic!("run failed: {err}"));
        evm
    }

    #[test]
    fn empty_code_halts_immediately() {
        let mut evm = Evm::new(Vec::<u8>::new());
        assert_eq!(evm.step(), Ok(StepOutcome::Halted));
        assert_eq!(evm.status(), ExecutionStatus::Halted);
        let summary = evm.run().unwrap();
        assert_eq!(summary.steps, 0);
        assert!(evm.stack().is_empty());
        assert!(evm.memory().is_empty());
    }

    #[test]
    fn add_two_pushes() {
        // PUSH1 3, PUSH1 4, ADD
        let evm = run(&[0x60, 0x03, 0x60, 0x04, 0x01]);
        assert_eq!(evm.stack(), &[word(7)]);
        assert_eq!(evm.pc(), 5);
        assert_eq!(evm.steps(), 3);
    }

    #[test]
    fn subtraction_wraps_below_zero() {
        // PUSH1 1 (b), PUSH1 0 (a), SUB -> a - b
        let evm = run(&[0x60, 0x01, 0x60, 0x00, 0x03]);
        assert_eq!(evm.stack(), &[Word::MAX]);
    }

    #[test]
    fn mstore_places_value_at_end_of_word() {
        // PUSH1 2, PUSH1 0x20, MSTORE
        let evm = run(&[0x60, 0x02, 0x60, 0x20, 0x52]);
        assert!(evm.stack().is_empty());
        assert_eq!(evm.memory().len(), 0x40);
        assert_eq!(evm.memory()[0x3f], 2);
        assert!(evm.memory()[..0x3f].iter().all(|&b| b == 0));
    }

    #[test]
    fn mstore_then_mload() {
        // PUSH1 2, PUSH1 0, MSTORE, PUSH1 0, MLOAD
        let evm = run(&[0x60, 0x02, 0x60, 0x00, 0x52, 0x60, 0x00, 0x51]);
        assert_eq!(evm.stack(), &[word(2)]);
        assert_eq!(evm.memory().len(), WORD_SIZE);
    }

    #[test]
    fn mstore8_and_msize() {
        // PUSH2 0x1234, PUSH1 0x05, MSTORE8, MSIZE
        let evm = run(&[0x61, 0x12, 0x34, 0x60, 0x05, 0x53, 0x59]);
        assert_eq!(evm.stack(), &[word(6)]);
        assert_eq!(evm.memory()[5], 0x34);
    }

    #[test]
    fn mstore8_grows_memory_by_one_byte() {
        // PUSH1 1, PUSH1 5, MSTORE8, MSIZE: a single byte past offset 5, not a full word
        let evm = run(&[0x60, 0x01, 0x60, 0x05, 0x53, 0x59]);
        assert_eq!(evm.stack(), &[word(6)]);
        assert_eq!(evm.memory(), &[0u8, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn truncated_push_pads_and_halts() {
        // PUSH3 with one byte present
        let mut evm = Evm::new(vec![0x62u8, 0xab]);
        let summary = evm.run().unwrap();
        assert_eq!(evm.stack(), &[word(0xab_0000)]);
        assert_eq!(summary.pc, 4);
        assert_eq!(evm.status(), ExecutionStatus::Halted);
    }

    #[test]
    fn underflow_reports_pc_and_keeps_stack() {
        // PUSH1 1, ADD
        let mut evm = Evm::new(vec![0x60u8, 0x01, 0x01]);
        let err = evm.run().unwrap_err();
        assert_eq!(
            err,
            Fault::StackUnderflow {
                required: 2,
                available: 1
            }
            .at(2)
        );
        assert_eq!(evm.stack(), &[word(1)]);
        assert_eq!(evm.pc(), 2);
        assert_eq!(evm.status(), ExecutionStatus::Failed);
    }

    #[test]
    fn addmod_needs_three_operands() {
        let mut evm = Evm::new(vec![0x60u8, 0x01, 0x60, 0x02, 0x08]);
        let err = evm.run().unwrap_err();
        assert_eq!(err.pc(), 4);
        assert_eq!(
            err.fault(),
            &Fault::StackUnderflow {
                required: 3,
                available: 2
            }
        );
        assert_eq!(evm.stack(), &[word(1), word(2)]);
    }

    #[test]
    fn invalid_opcode_fails_at_execution() {
        // PUSH1 1, 0xfe
        let mut evm = Evm::new(vec![0x60u8, 0x01, 0xfe, 0x01]);
        assert_eq!(evm.step(), Ok(StepOutcome::Continue));
        let err = evm.step().unwrap_err();
        assert_eq!(err, Fault::InvalidOpcode(0xfe).at(2));
        assert_eq!(evm.stack(), &[word(1)]);
    }

    #[test]
    fn zero_byte_is_invalid() {
        let mut evm = Evm::new(vec![0x00u8]);
        assert_eq!(evm.run(), Err(Fault::InvalidOpcode(0x00).at(0)));
    }

    #[test]
    fn failure_is_sticky_until_reset() {
        let mut evm = Evm::new(vec![0x01u8]);
        let err = evm.step().unwrap_err();
        assert_eq!(evm.step(), Err(err.clone()));
        assert_eq!(evm.run(), Err(err.clone()));
        assert_eq!(evm.error(), Some(&err));
        evm.reset();
        assert_eq!(evm.status(), ExecutionStatus::Running);
        assert!(evm.error().is_none());
        assert_eq!(evm.pc(), 0);
    }

    #[test]
    fn step_limit_stops_before_executing() {
        let limits = ExecutionLimits::unbounded().with_max_steps(2);
        let mut evm = Evm::with_limits(vec![0x60u8, 0x01, 0x60, 0x02, 0x60, 0x03], limits);
        let err = evm.run().unwrap_err();
        assert_eq!(err, Fault::StepLimitExceeded { limit: 2 }.at(4));
        assert_eq!(evm.limits().max_steps, Some(2));
        assert_eq!(evm.stack(), &[word(1), word(2)]);
        assert_eq!(evm.steps(), 2);
    }

    #[test]
    fn step_limit_equal_to_program_length_completes() {
        let limits = ExecutionLimits::unbounded().with_max_steps(3);
        let mut evm = Evm::with_limits(vec![0x60u8, 0x01, 0x60, 0x02, 0x01], limits);
        assert_eq!(evm.run().map(|s| s.steps), Ok(3));
    }

    #[test]
    fn stack_depth_limit() {
        let limits = ExecutionLimits::unbounded().with_max_stack_depth(1);
        let mut evm = Evm::with_limits(vec![0x5fu8, 0x5f], limits);
        let err = evm.run().unwrap_err();
        assert_eq!(err, Fault::StackOverflow { limit: 1 }.at(1));
        assert_eq!(evm.stack().len(), 1);
    }

    #[test]
    fn memory_limit_leaves_state_untouched() {
        let limits = ExecutionLimits::unbounded().with_max_memory_bytes(32);
        // PUSH1 7, PUSH1 1, MSTORE (needs 33 bytes)
        let mut evm = Evm::with_limits(vec![0x60u8, 0x07, 0x60, 0x01, 0x52], limits);
        let err = evm.run().unwrap_err();
        assert_eq!(
            err.fault(),
            &Fault::MemoryLimitExceeded {
                requested: 33,
                limit: 32
            }
        );
        assert_eq!(evm.stack(), &[word(7), word(1)]);
        assert!(evm.memory().is_empty());
    }

    #[test]
    fn huge_offset_is_unaddressable() {
        // PUSH1 0, PUSH32 0xff.., MLOAD
        let mut code = vec![0x60u8, 0x00, 0x7f];
        code.extend_from_slice(&[0xff; 32]);
        code.push(0x51);
        let mut evm = Evm::new(code);
        let err = evm.run().unwrap_err();
        assert_eq!(err, Fault::MemoryOffsetOverflow.at(35));
        assert_eq!(evm.stack(), &[Word::ZERO, Word::MAX]);
    }

    #[test]
    fn negative_result_compares_as_signed() {
        // PUSH1 7, PUSH0, SUB (0 - 7), PUSH0, SLT (-7 < 0)
        let evm = run(&[0x60, 0x07, 0x5f, 0x03, 0x5f, 0x12]);
        assert_eq!(evm.stack(), &[word(1)]);
    }

    #[test]
    fn sdiv_divides_second_by_top() {
        // PUSH1 2, PUSH1 7, PUSH0, SUB (-7), SDIV
        let evm = run(&[0x60, 0x02, 0x60, 0x07, 0x5f, 0x03, 0x05]);
        // divisor = -7 (top), dividend = 2
        assert_eq!(evm.stack(), &[Word::ZERO]);
        let evm = run(&[0x60, 0x07, 0x5f, 0x03, 0x60, 0x02, 0x05]);
        // divisor = 2 (top), dividend = -7: truncates toward zero
        assert_eq!(evm.stack(), &[Word::from(3u64).wrapping_neg()]);
    }

    #[test]
    fn into_parts_returns_final_state() {
        let evm = run(&[0x60, 0x05, 0x60, 0x00, 0x53, 0x60, 0x09]);
        let (stack, memory) = evm.into_parts();
        assert_eq!(stack, vec![word(9)]);
        assert_eq!(memory, vec![5]);
    }
}
