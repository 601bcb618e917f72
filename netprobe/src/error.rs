//! Probe error types

use shared::SharedError;
use std::time::Duration;
use thiserror::Error;

/// Why a remote command did not produce output
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecFailure {
    /// The transport binary could not be started
    #[error("spawn failed: {0}")]
    Spawn(String),
    /// The command ran and exited unsuccessfully
    #[error("{}: {}", exit_status(code), stderr.trim())]
    NonZeroExit { code: Option<i32>, stderr: String },
    /// The command did not finish within its timeout
    #[error("timed out after {0:?}")]
    TimedOut(Duration),
}

fn exit_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Command execution failed on {target}: `{command}` ({reason})")]
    ExecutionError {
        target: String,
        command: String,
        reason: ExecFailure,
    },

    #[error("Timed out after {waited:?} ({attempts} attempts), last error: {}", last_error.as_deref().unwrap_or("none"))]
    PollTimeoutExpired {
        waited: Duration,
        attempts: u32,
        last_error: Option<String>,
    },

    #[error("Process `{command}` did not start on {target}")]
    ProcessNotStarted { target: String, command: String },

    #[error("Failed to stop `{command}` on {target}: {reason}")]
    StopFailed {
        target: String,
        command: String,
        reason: String,
    },

    #[error("Process handle for `{command}` was already started")]
    HandleReused { command: String },

    #[error("Invalid command line: {reason}")]
    InvalidCommand { reason: String },

    #[error("BGP configuration error: {message}")]
    BgpConfigError { message: String },

    #[error("Shared component error: {0}")]
    SharedError(#[from] SharedError),
}

impl ProbeError {
    pub fn execution(target: impl ToString, command: impl Into<String>, reason: ExecFailure) -> Self {
        ProbeError::ExecutionError {
            target: target.to_string(),
            command: command.into(),
            reason,
        }
    }

    pub fn invalid_command(reason: impl Into<String>) -> Self {
        ProbeError::InvalidCommand { reason: reason.into() }
    }

    /// True for failures raised by the remote executor itself
    pub fn is_execution_error(&self) -> bool {
        matches!(self, ProbeError::ExecutionError { .. })
    }
}

pub type ProbeResult<T> = Result<T, ProbeError>;
