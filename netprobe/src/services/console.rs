//! Virtual machine transport over `virtctl ssh`

use async_trait::async_trait;
use shared::{target_debug, RemoteTarget, TargetKind};
use std::path::PathBuf;
use std::time::Duration;

use crate::core::process::DEFAULT_CMD_TIMEOUT;
use crate::error::{ProbeError, ProbeResult};
use crate::services::command_runner::{detached, CommandRunner};
use crate::traits::RemoteExecutor;

/// Login user when the target does not name one
pub const DEFAULT_VM_USER: &str = "fedora";

/// Runs commands in a shell on one virtual machine
#[derive(Debug, Clone)]
pub struct ConsoleExecutor {
    target: RemoteTarget,
    runner: CommandRunner,
    kubeconfig: Option<PathBuf>,
    identity_file: Option<PathBuf>,
    launch_timeout: Duration,
}

impl ConsoleExecutor {
    /// Create an executor for a validated VM target
    pub fn new(target: RemoteTarget) -> ProbeResult<Self> {
        target.validate()?;
        if target.kind != TargetKind::Console {
            return Err(shared::SharedError::InvalidTarget {
                reason: format!("{target} is not a VM target"),
            }
            .into());
        }

        Ok(Self {
            target,
            runner: CommandRunner::new("virtctl"),
            kubeconfig: None,
            identity_file: None,
            launch_timeout: DEFAULT_CMD_TIMEOUT,
        })
    }

    /// Use an explicit kubeconfig (fluent API)
    pub fn with_kubeconfig(mut self, kubeconfig: Option<PathBuf>) -> Self {
        self.kubeconfig = kubeconfig;
        self
    }

    /// Authenticate with a private key file (fluent API)
    pub fn with_identity_file(mut self, identity_file: Option<PathBuf>) -> Self {
        self.identity_file = identity_file;
        self
    }

    /// Use another virtctl-compatible binary (fluent API)
    pub fn with_virtctl(mut self, program: impl Into<String>) -> Self {
        self.runner = CommandRunner::new(program);
        self
    }

    /// Arguments of the `virtctl ssh` call running `command`
    pub fn ssh_args(&self, command: &str) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(kubeconfig) = &self.kubeconfig {
            args.push("--kubeconfig".to_string());
            args.push(kubeconfig.display().to_string());
        }
        args.extend([
            "ssh".to_string(),
            "--namespace".to_string(),
            self.target.namespace.clone(),
            "--username".to_string(),
            self.target.username.clone().unwrap_or_else(|| DEFAULT_VM_USER.to_string()),
        ]);
        if let Some(identity_file) = &self.identity_file {
            args.push("--identity-file".to_string());
            args.push(identity_file.display().to_string());
        }
        args.extend([
            "--local-ssh-opts=-o StrictHostKeyChecking=no".to_string(),
            format!("vmi/{}", self.target.name),
            "--command".to_string(),
            command.to_string(),
        ]);
        args
    }

    /// Detached form of `command` with its output discarded
    pub fn background_command(command: &str) -> String {
        detached(command, "/dev/null")
    }
}

#[async_trait]
impl RemoteExecutor for ConsoleExecutor {
    fn target(&self) -> &RemoteTarget {
        &self.target
    }

    async fn execute(&self, command: &str, timeout: Duration) -> ProbeResult<String> {
        target_debug!(&self.target, "ssh `{}`", command);
        self.runner
            .run(&self.ssh_args(command), timeout)
            .await
            .map_err(|reason| ProbeError::execution(&self.target, command, reason))
    }

    async fn execute_background(&self, command: &str) -> ProbeResult<()> {
        let wrapped = Self::background_command(command);
        target_debug!(&self.target, "ssh detached `{}`", wrapped);
        self.runner
            .run(&self.ssh_args(&wrapped), self.launch_timeout)
            .await
            .map(|_| ())
            .map_err(|reason| ProbeError::execution(&self.target, command, reason))
    }
}
