//! Exit codes for the wd-core CLI.
//!
//! The process exit code is the monitoring state itself, per plugin
//! convention, so schedulers and wrappers need no output parsing. Hard
//! errors (unreadable input, malformed parameters) map to `Unknown`.

use wd_common::State;

/// Exit codes for wd-core runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Everything within thresholds
    Ok = 0,

    /// At least one warning-level finding
    Warn = 1,

    /// At least one critical finding
    Crit = 2,

    /// Missing/unparseable data, or the run itself failed
    Unknown = 3,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Check if this exit code indicates a clean result.
    pub fn is_success(self) -> bool {
        self == ExitCode::Ok
    }
}

impl From<State> for ExitCode {
    fn from(state: State) -> Self {
        match state {
            State::Ok => ExitCode::Ok,
            State::Warn => ExitCode::Warn,
            State::Crit => ExitCode::Crit,
            State::Unknown => ExitCode::Unknown,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}
