//! Remote background process lifecycle
//!
//! A [`ProcessHandle`] launches one command in the background on one target,
//! confirms it came up, answers liveness probes and kills it again. The remote
//! side only offers shell exec, so every step is a `pgrep`/`pkill` round trip
//! keyed on the exact command line.

use shared::{target_debug, target_error, target_info, target_warn, HandleId, RemoteTarget, TargetKind};
use std::future::Future;
use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::core::command::CommandLine;
use crate::core::polling::{poll_until, retry, PollPolicy};
use crate::error::{ProbeError, ProbeResult};
use crate::traits::RemoteExecutor;

/// Timeout for each individual remote command (probe, kill)
pub const DEFAULT_CMD_TIMEOUT: Duration = Duration::from_secs(10);

/// How `start()` confirms that the launched process is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartConfirmation {
    /// Poll for probe output; an exhausted budget reports "not running"
    BestEffort(PollPolicy),
    /// Retry the probe until it succeeds; an exhausted budget is an error
    Required(PollPolicy),
}

impl StartConfirmation {
    /// Default confirmation for a transport
    pub fn for_kind(kind: TargetKind) -> Self {
        match kind {
            TargetKind::Console => StartConfirmation::BestEffort(PollPolicy::CONSOLE_OUTPUT),
            TargetKind::Container => StartConfirmation::Required(PollPolicy::CONFIRM_RUNNING),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleState {
    Idle,
    Launched,
    Stopped,
}

/// One background command on one remote target
pub struct ProcessHandle {
    id: HandleId,
    executor: Arc<dyn RemoteExecutor>,
    command: CommandLine,
    confirmation: StartConfirmation,
    command_timeout: Duration,
    state: Mutex<HandleState>,
}

impl ProcessHandle {
    pub fn new(executor: Arc<dyn RemoteExecutor>, command: CommandLine) -> Self {
        let confirmation = StartConfirmation::for_kind(executor.target().kind);
        Self {
            id: HandleId::new(),
            executor,
            command,
            confirmation,
            command_timeout: DEFAULT_CMD_TIMEOUT,
            state: Mutex::new(HandleState::Idle),
        }
    }

    /// Override the start confirmation (fluent API)
    pub fn with_confirmation(mut self, confirmation: StartConfirmation) -> Self {
        self.confirmation = confirmation;
        self
    }

    /// Override the per-command timeout (fluent API)
    pub fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    pub fn id(&self) -> HandleId {
        self.id
    }

    pub fn command(&self) -> &CommandLine {
        &self.command
    }

    pub fn target(&self) -> &RemoteTarget {
        self.executor.target()
    }

    pub fn confirmation(&self) -> StartConfirmation {
        self.confirmation
    }

    pub async fn state(&self) -> HandleState {
        *self.state.lock().await
    }

    /// Launch the command in the background and wait for it to show up.
    ///
    /// # Returns
    /// `true` once a probe saw the process. With
    /// [`StartConfirmation::BestEffort`] an exhausted budget yields `false`;
    /// with [`StartConfirmation::Required`] it is returned as
    /// [`ProbeError::PollTimeoutExpired`]. A failed launch is returned as is
    /// and never retried.
    pub async fn start(&self) -> ProbeResult<bool> {
        {
            let mut state = self.state.lock().await;
            if *state != HandleState::Idle {
                return Err(ProbeError::HandleReused {
                    command: self.command.to_string(),
                });
            }

            target_info!(self.target(), handle = %self.id, "🚀 Launching `{}`", self.command);
            if let Err(e) = self.executor.execute_background(self.command.as_str()).await {
                target_error!(self.target(), handle = %self.id, "❌ Launch of `{}` failed: {}", self.command, e);
                return Err(e);
            }
            *state = HandleState::Launched;
        }

        self.confirm_started().await
    }

    async fn confirm_started(&self) -> ProbeResult<bool> {
        match self.confirmation {
            StartConfirmation::BestEffort(policy) => match poll_until(policy, || self.probe_output()).await {
                Ok(_) => {
                    target_debug!(self.target(), handle = %self.id, "✅ `{}` is running", self.command);
                    Ok(true)
                }
                Err(ProbeError::PollTimeoutExpired { last_error, .. }) => {
                    target_warn!(
                        self.target(),
                        handle = %self.id,
                        "⚠️ Process is not running on {}. Error: {}",
                        self.target(),
                        last_error.as_deref().unwrap_or("no output")
                    );
                    Ok(false)
                }
                Err(e) => Err(e),
            },
            StartConfirmation::Required(policy) => {
                let confirmed = retry(
                    policy,
                    |err| matches!(err, ProbeError::ProcessNotStarted { .. }),
                    move || async move {
                        if self.is_running().await {
                            Ok(())
                        } else {
                            Err(ProbeError::ProcessNotStarted {
                                target: self.target().to_string(),
                                command: self.command.to_string(),
                            })
                        }
                    },
                )
                .await;

                match confirmed {
                    Ok(()) => {
                        target_debug!(self.target(), handle = %self.id, "✅ `{}` is running", self.command);
                        Ok(true)
                    }
                    Err(e) => {
                        target_error!(
                            self.target(),
                            handle = %self.id,
                            "❌ {} process did not start: {}",
                            self.command.program(),
                            e
                        );
                        Err(e)
                    }
                }
            }
        }
    }

    /// Probe once and return the probe output when it is non-empty
    async fn probe_output(&self) -> ProbeResult<Option<String>> {
        let output = self
            .executor
            .execute(&self.command.probe_command(), self.command_timeout)
            .await?;
        Ok(if output.trim().is_empty() { None } else { Some(output) })
    }

    /// Single liveness probe.
    ///
    /// A probe that fails or times out is reported as "not running", the same
    /// as a probe that finds nothing.
    pub async fn is_running(&self) -> bool {
        match self.probe_output().await {
            Ok(output) => output.is_some(),
            Err(e) => {
                target_debug!(self.target(), handle = %self.id, "Liveness probe for `{}` failed: {}", self.command, e);
                false
            }
        }
    }

    /// Best-effort termination. Failures are logged and swallowed.
    pub async fn stop(&self) {
        let mut state = self.state.lock().await;
        if *state == HandleState::Idle {
            target_debug!(self.target(), handle = %self.id, "⏭️ `{}` was never launched", self.command);
            return;
        }

        match self.try_stop().await {
            Ok(()) => target_info!(self.target(), handle = %self.id, "🛑 Stopped `{}`", self.command),
            Err(e) => target_warn!(self.target(), handle = %self.id, "⚠️ {}", e),
        }
        *state = HandleState::Stopped;
    }

    async fn try_stop(&self) -> ProbeResult<()> {
        self.executor
            .execute(&self.command.kill_command(), self.command_timeout)
            .await
            .map(|_| ())
            .map_err(|e| ProbeError::StopFailed {
                target: self.target().to_string(),
                command: self.command.to_string(),
                reason: e.to_string(),
            })
    }

    /// Run `body` between `start()` and `stop()`.
    ///
    /// `stop()` runs whether `start()` or `body` succeeded or failed; the first
    /// error is returned.
    pub async fn scoped<'s, T, F, Fut>(&'s self, body: F) -> ProbeResult<T>
    where
        F: FnOnce(&'s ProcessHandle) -> Fut,
        Fut: Future<Output = ProbeResult<T>>,
    {
        let result = match self.start().await {
            Ok(_) => body(self).await,
            Err(e) => Err(e),
        };
        self.stop().await;
        result
    }

    /// Start the handle and tie its termination to the returned guard
    pub async fn start_guarded(self) -> ProbeResult<ProcessGuard> {
        let handle = Arc::new(self);
        match handle.start().await {
            Ok(confirmed) => Ok(ProcessGuard {
                handle,
                confirmed,
                armed: true,
            }),
            Err(e) => {
                handle.stop().await;
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for ProcessHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessHandle")
            .field("id", &self.id)
            .field("target", self.target())
            .field("command", &self.command)
            .field("confirmation", &self.confirmation)
            .finish()
    }
}

/// Started process that is stopped when the guard goes away.
///
/// Prefer [`ProcessGuard::release`]; dropping the guard schedules the stop on
/// the current tokio runtime without waiting for it.
pub struct ProcessGuard {
    handle: Arc<ProcessHandle>,
    confirmed: bool,
    armed: bool,
}

impl ProcessGuard {
    /// Whether `start()` saw the process running
    pub fn confirmed(&self) -> bool {
        self.confirmed
    }

    /// Stop the process and wait for the kill command to finish
    pub async fn release(mut self) {
        self.armed = false;
        self.handle.stop().await;
    }
}

impl Deref for ProcessGuard {
    type Target = ProcessHandle;

    fn deref(&self) -> &ProcessHandle {
        &self.handle
    }
}

impl Drop for ProcessGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }

        let handle = Arc::clone(&self.handle);
        match tokio::runtime::Handle::try_current() {
            Ok(runtime) => {
                runtime.spawn(async move {
                    handle.stop().await;
                });
            }
            Err(_) => {
                target_warn!(
                    handle.target(),
                    handle = %handle.id(),
                    "⚠️ No runtime to stop `{}`; it may still be running",
                    handle.command()
                );
            }
        }
    }
}
