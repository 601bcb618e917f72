//! Trait definitions with mockall annotations for testing
//!
//! The remote executor is the only seam between the probing logic and the
//! cluster. Concrete transports live in [`crate::services`].

use shared::RemoteTarget;
use std::time::Duration;

use crate::error::ProbeResult;

/// Remote command execution abstraction
///
/// Implemented once per transport (VM console, pod container exec). The
/// process handle is agnostic to which one it talks to.
#[mockall::automock]
#[async_trait::async_trait]
pub trait RemoteExecutor: Send + Sync {
    /// The target this executor is bound to
    fn target(&self) -> &RemoteTarget;

    /// Run a shell command and wait for it
    ///
    /// # Returns
    /// Captured stdout, or `ExecutionError` on spawn failure, non-zero exit
    /// or timeout
    async fn execute(&self, command: &str, timeout: Duration) -> ProbeResult<String>;

    /// Launch a shell command detached from the session without waiting for it
    ///
    /// The launched process must survive the end of the exec session.
    async fn execute_background(&self, command: &str) -> ProbeResult<()>;
}
