//! 256-bit word stack machine: decode/dispatch loop, operand stack, linear
//! memory and the arithmetic, comparison, bitwise and memory opcodes.
//!
//! ```
//! use pbnjam_evm_rust::{Evm, Word};
//!
//! // PUSH1 3, PUSH1 4, ADD
//! let mut evm = Evm::new(vec![0x60u8, 0x03, 0x60, 0x04, 0x01]);
//! evm.run().unwrap();
//! assert_eq!(evm.stack(), &[Word::from(7u64)]);
//! ```
//!
//! NAPI bindings over a process-wide engine are built with `--features node`.

/// Per-instruction trace events. No-op unless built with `--features step_logging`.
#[macro_export]
macro_rules! step_log {
    ($($t:tt)*) => {
        #[cfg(feature = "step_logging")]
        ::tracing::trace!($($t)*);
    };
}

/// Trace events on fault paths only. Enabled by `faults_only` or `step_logging`.
#[macro_export]
macro_rules! fault_log {
    ($($t:tt)*) => {
        #[cfg(any(feature = "step_logging", feature = "faults_only"))]
        ::tracing::warn!($($t)*);
    };
}

pub mod codec;
pub mod config;
pub mod error;
pub mod evm;
pub mod instructions;
pub mod memory;
pub mod opcode;
pub mod parser;
pub mod stack;
pub mod state_wrapper;
pub mod types;

pub use config::ExecutionLimits;
pub use error::{EvmError, Fault};
pub use evm::Evm;
pub use memory::Memory;
pub use opcode::Opcode;
pub use parser::{DecodedInstruction, Disassembler};
pub use stack::Stack;
pub use types::{ExecutionStatus, RunSummary, StepOutcome, Word};

#[cfg(feature = "node")]
mod napi_exports {
    use napi::bindgen_prelude::{BigInt, Buffer};
    use napi_derive::napi;

    use crate::codec::{encode_words, word_to_be_bytes};
    use crate::config::{ExecutionLimits, RESULT_CODE_OK};
    use crate::parser::Disassembler;
    use crate::state_wrapper::{
        get_state, init_state, n_steps_impl, next_step_impl, reset_state, run_code_impl,
        run_impl, set_limits_impl, RunReport,
    };
    use crate::types::ExecutionStatus;

    fn to_u32(value: usize) -> u32 {
        u32::try_from(value).unwrap_or(u32::MAX)
    }

    /// Run outcome returned as object (status, resultCode, steps, programCounter).
    #[napi(object)]
    pub struct RunResultOutput {
        pub status: i32,
        pub result_code: u32,
        pub steps: BigInt,
        pub program_counter: u32,
    }

    impl From<RunReport> for RunResultOutput {
        fn from(report: RunReport) -> Self {
            Self {
                status: report.status as i32,
                result_code: u32::from(report.result_code),
                steps: BigInt::from(report.steps),
                program_counter: to_u32(report.program_counter),
            }
        }
    }

    // --- lifecycle ---

    #[napi]
    pub fn init(code: Buffer) {
        init_state(code.as_ref());
    }

    #[napi]
    pub fn reset() {
        reset_state();
    }

    /// Unset arguments mean unbounded. Restarts the loaded code.
    #[napi]
    pub fn set_limits(
        max_steps: Option<u32>,
        max_memory_bytes: Option<u32>,
        max_stack_depth: Option<u32>,
    ) {
        set_limits_impl(ExecutionLimits {
            max_steps: max_steps.map(u64::from),
            max_memory_bytes: max_memory_bytes.map(|n| n as usize),
            max_stack_depth: max_stack_depth.map(|n| n as usize),
        });
    }

    // --- execution ---

    #[napi]
    pub fn next_step() -> bool {
        let mut g = get_state();
        g.as_mut().map_or(false, next_step_impl)
    }

    #[napi]
    pub fn n_steps(steps: i32) -> bool {
        let mut g = get_state();
        let Some(state) = g.as_mut() else {
            return false;
        };
        n_steps_impl(state, steps.max(0) as u32)
    }

    #[napi]
    pub fn run() -> Option<RunResultOutput> {
        let mut g = get_state();
        g.as_mut().map(|state| run_impl(state).into())
    }

    #[napi]
    pub fn run_code(code: Buffer) -> RunResultOutput {
        run_code_impl(code.as_ref()).into()
    }

    // --- inspection ---

    #[napi]
    pub fn get_program_counter() -> u32 {
        let g = get_state();
        g.as_ref().map_or(0, |s| to_u32(s.evm.pc()))
    }

    #[napi]
    pub fn get_status() -> i32 {
        let g = get_state();
        g.as_ref()
            .map_or(ExecutionStatus::Halted as i32, |s| s.evm.status() as i32)
    }

    #[napi]
    pub fn get_result_code() -> u32 {
        let g = get_state();
        u32::from(g.as_ref().map_or(RESULT_CODE_OK, |s| s.result_code()))
    }

    #[napi]
    pub fn get_error_message() -> Option<String> {
        let g = get_state();
        g.as_ref().and_then(|s| s.error_message())
    }

    #[napi]
    pub fn get_steps() -> BigInt {
        let g = get_state();
        BigInt::from(g.as_ref().map_or(0, |s| s.evm.steps()))
    }

    /// Stack as 32-byte big-endian words, bottom to top.
    #[napi]
    pub fn get_stack() -> Buffer {
        let g = get_state();
        g.as_ref()
            .map_or_else(Vec::new, |s| encode_words(s.evm.stack()))
            .into()
    }

    #[napi]
    pub fn get_stack_depth() -> u32 {
        let g = get_state();
        g.as_ref().map_or(0, |s| to_u32(s.evm.stack().len()))
    }

    /// Word `depth` positions below the top (0 = top).
    #[napi]
    pub fn get_stack_item(depth: u32) -> Option<Buffer> {
        let g = get_state();
        let stack = g.as_ref()?.evm.stack();
        let index = stack.len().checked_sub(depth as usize + 1)?;
        Some(word_to_be_bytes(&stack[index]).to_vec().into())
    }

    #[napi]
    pub fn get_memory() -> Buffer {
        let g = get_state();
        g.as_ref()
            .map_or_else(Vec::new, |s| s.evm.memory().to_vec())
            .into()
    }

    #[napi]
    pub fn get_memory_size() -> u32 {
        let g = get_state();
        g.as_ref().map_or(0, |s| to_u32(s.evm.memory().len()))
    }

    #[napi]
    pub fn disassemble(code: Buffer) -> String {
        Disassembler::listing(code.as_ref())
    }
}
