//! Transport selection for remote targets
//!
//! Turns a [`RemoteTarget`] into the executor that reaches it, carrying the
//! kubeconfig and SSH identity given on the command line.

use netprobe::{ConsoleExecutor, ContainerExecutor, ProbeResult, RemoteExecutor};
use shared::{RemoteTarget, TargetKind};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct Cluster {
    kubeconfig: Option<PathBuf>,
    identity_file: Option<PathBuf>,
}

impl Cluster {
    pub fn new(kubeconfig: Option<PathBuf>) -> Self {
        Self {
            kubeconfig,
            identity_file: None,
        }
    }

    /// SSH key for VM targets (fluent API)
    pub fn with_identity_file(mut self, identity_file: Option<PathBuf>) -> Self {
        self.identity_file = identity_file;
        self
    }

    pub fn kubeconfig(&self) -> Option<&PathBuf> {
        self.kubeconfig.as_ref()
    }

    /// Executor for `target`, chosen by its kind
    pub fn executor_for(&self, target: &RemoteTarget) -> ProbeResult<Arc<dyn RemoteExecutor>> {
        debug!("🔌 Connecting to {} over {}", target, target.kind);
        let executor: Arc<dyn RemoteExecutor> = match target.kind {
            TargetKind::Console => Arc::new(
                ConsoleExecutor::new(target.clone())?
                    .with_kubeconfig(self.kubeconfig.clone())
                    .with_identity_file(self.identity_file.clone()),
            ),
            TargetKind::Container => Arc::new(
                ContainerExecutor::new(target.clone())?.with_kubeconfig(self.kubeconfig.clone()),
            ),
        };
        Ok(executor)
    }
}
