//! Singleton engine state driven by the host bindings.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::{ExecutionLimits, RESULT_CODE_OK};
use crate::evm::Evm;
use crate::types::{ExecutionStatus, StepOutcome};

/// Engine plus the limits it is rebuilt with on `init`.
#[derive(Clone, Debug)]
pub struct EvmState {
    pub evm: Evm,
    pub limits: ExecutionLimits,
}

impl EvmState {
    #[must_use]
    pub fn new(code: &[u8], limits: ExecutionLimits) -> Self {
        Self {
            evm: Evm::with_limits(code, limits),
            limits,
        }
    }

    /// 0 while running or halted, the fault's code after a failure.
    #[must_use]
    pub fn result_code(&self) -> u8 {
        self.evm.error().map_or(RESULT_CODE_OK, |err| err.code())
    }

    #[must_use]
    pub fn error_message(&self) -> Option<String> {
        self.evm.error().map(ToString::to_string)
    }

    fn report(&self) -> RunReport {
        RunReport {
            status: self.evm.status(),
            result_code: self.result_code(),
            steps: self.evm.steps(),
            program_counter: self.evm.pc(),
        }
    }
}

impl Default for EvmState {
    fn default() -> Self {
        Self::new(&[], ExecutionLimits::unbounded())
    }
}

/// Outcome of `run` as seen by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunReport {
    pub status: ExecutionStatus,
    pub result_code: u8,
    pub steps: u64,
    pub program_counter: usize,
}

static STATE: Mutex<Option<EvmState>> = Mutex::new(None);

/// Lock the singleton. A panic while holding the lock does not make the state unusable.
pub fn get_state() -> MutexGuard<'static, Option<EvmState>> {
    STATE.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Load `code`, keeping limits from a previous `set_limits_impl`.
pub fn init_state(code: &[u8]) {
    let mut g = get_state();
    let limits = g.as_ref().map_or_else(ExecutionLimits::unbounded, |s| s.limits);
    *g = Some(EvmState::new(code, limits));
}

pub fn reset_state() {
    let mut g = get_state();
    if let Some(s) = g.as_mut() {
        s.evm.reset();
    }
}

/// Replace the limits and restart the loaded code under them.
pub fn set_limits_impl(limits: ExecutionLimits) {
    let mut g = get_state();
    let state = g.get_or_insert_with(EvmState::default);
    let code = state.evm.code().to_vec();
    *state = EvmState::new(&code, limits);
}

/// Execute one instruction. False once halted or failed.
pub fn next_step_impl(state: &mut EvmState) -> bool {
    matches!(state.evm.step(), Ok(StepOutcome::Continue))
}

/// Execute up to `n` instructions. False if execution stopped early.
pub fn n_steps_impl(state: &mut EvmState, n: u32) -> bool {
    for _ in 0..n {
        if !next_step_impl(state) {
            return false;
        }
    }
    true
}

pub fn run_impl(state: &mut EvmState) -> RunReport {
    // a failure stays recorded on the engine; the report reads it back
    state.evm.run().ok();
    state.report()
}

/// Load and run `code` from the start.
pub fn run_code_impl(code: &[u8]) -> RunReport {
    init_state(code);
    let mut g = get_state();
    let state = g.get_or_insert_with(EvmState::default);
    run_impl(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{RESULT_CODE_INVALID_OPCODE, RESULT_CODE_STEP_LIMIT};
    use crate::types::Word;

    #[test]
    fn stepping_reports_progress() {
        let mut state = EvmState::new(&[0x60, 0x01, 0x60, 0x02, 0x01], ExecutionLimits::default());
        assert!(next_step_impl(&mut state));
        assert!(n_steps_impl(&mut state, 2));
        assert!(!next_step_impl(&mut state));
        assert_eq!(state.evm.stack(), &[Word::from(3u64)]);
        assert_eq!(state.result_code(), RESULT_CODE_OK);
        assert_eq!(state.evm.status(), ExecutionStatus::Halted);
    }

    #[test]
    fn failed_run_reports_code_and_message() {
        let mut state = EvmState::new(&[0x5f, 0xfe], ExecutionLimits::default());
        let report = run_impl(&mut state);
        assert_eq!(report.status, ExecutionStatus::Failed);
        assert_eq!(report.result_code, RESULT_CODE_INVALID_OPCODE);
        assert_eq!(report.program_counter, 1);
        assert_eq!(report.steps, 1);
        assert_eq!(
            state.error_message().as_deref(),
            Some("invalid opcode 0xfe at pc 0x0001")
        );
    }

    #[test]
    fn n_steps_stops_at_failure() {
        let mut state = EvmState::new(&[0x01], ExecutionLimits::default());
        assert!(!n_steps_impl(&mut state, 5));
        assert_eq!(state.evm.steps(), 0);
    }

    // The only test touching the process-wide singleton.
    #[test]
    fn singleton_lifecycle() {
        set_limits_impl(ExecutionLimits::unbounded().with_max_steps(1));
        let report = run_code_impl(&[0x5f, 0x5f]);
        assert_eq!(report.result_code, RESULT_CODE_STEP_LIMIT);
        assert_eq!(report.steps, 1);

        set_limits_impl(ExecutionLimits::unbounded());
        {
            let mut g = get_state();
            let state = g.as_mut().unwrap();
            assert_eq!(state.evm.code(), &[0x5f, 0x5f]);
            assert_eq!(run_impl(state).steps, 2);
        }

        reset_state();
        let g = get_state();
        let state = g.as_ref().unwrap();
        assert_eq!(state.evm.pc(), 0);
        assert!(state.evm.stack().is_empty());
        assert_eq!(state.evm.status(), ExecutionStatus::Running);
    }
}
