//! Local subprocess runner backing the cluster transports
//!
//! `kubectl` and `virtctl` are plain local programs; each remote command is
//! one invocation with captured output and a hard timeout.

use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

use crate::error::ExecFailure;

/// Local transport binary plus the arguments shared by every invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRunner {
    program: String,
}

impl CommandRunner {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run the program with `args` and return its stdout.
    ///
    /// The child is killed if it outlives `timeout`.
    pub async fn run(&self, args: &[String], timeout: Duration) -> Result<String, ExecFailure> {
        let mut cmd = Command::new(&self.program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!("▶️ {} {}", self.program, args.join(" "));

        let child = cmd
            .spawn()
            .map_err(|e| ExecFailure::Spawn(format!("{}: {e}", self.program)))?;

        let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => return Err(ExecFailure::Spawn(format!("{}: {e}", self.program))),
            // Dropping the wait future drops the child, which kills it
            Err(_) => return Err(ExecFailure::TimedOut(timeout)),
        };

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(ExecFailure::NonZeroExit {
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }
}

/// Wrap `command` so it keeps running after the exec session ends
pub fn detached(command: &str, log_path: &str) -> String {
    format!("nohup {command} >{log_path} 2>&1 &")
}

/// File name stem of the program a command line starts with
pub fn program_name(command: &str) -> &str {
    let program = command.split_whitespace().next().unwrap_or(command);
    program.rsplit('/').next().unwrap_or(program)
}
