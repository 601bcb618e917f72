//! Pod container transport over `kubectl exec`

use async_trait::async_trait;
use shared::{target_debug, RemoteTarget, TargetKind};
use std::path::PathBuf;
use std::time::Duration;

use crate::core::process::DEFAULT_CMD_TIMEOUT;
use crate::error::{ProbeError, ProbeResult};
use crate::services::command_runner::{detached, program_name, CommandRunner};
use crate::traits::RemoteExecutor;

/// Runs commands inside one container of one pod
#[derive(Debug, Clone)]
pub struct ContainerExecutor {
    target: RemoteTarget,
    runner: CommandRunner,
    kubeconfig: Option<PathBuf>,
    launch_timeout: Duration,
}

impl ContainerExecutor {
    /// Create an executor for a validated container target
    pub fn new(target: RemoteTarget) -> ProbeResult<Self> {
        target.validate()?;
        if target.kind != TargetKind::Container {
            return Err(shared::SharedError::InvalidTarget {
                reason: format!("{target} is not a container target"),
            }
            .into());
        }

        Ok(Self {
            target,
            runner: CommandRunner::new("kubectl"),
            kubeconfig: None,
            launch_timeout: DEFAULT_CMD_TIMEOUT,
        })
    }

    /// Use an explicit kubeconfig (fluent API)
    pub fn with_kubeconfig(mut self, kubeconfig: Option<PathBuf>) -> Self {
        self.kubeconfig = kubeconfig;
        self
    }

    /// Use another kubectl-compatible binary (fluent API)
    pub fn with_kubectl(mut self, program: impl Into<String>) -> Self {
        self.runner = CommandRunner::new(program);
        self
    }

    /// Arguments of the `kubectl exec` call running `command` through `sh -c`
    pub fn exec_args(&self, command: &str) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(kubeconfig) = &self.kubeconfig {
            args.push("--kubeconfig".to_string());
            args.push(kubeconfig.display().to_string());
        }
        args.extend(["exec".to_string(), "-n".to_string(), self.target.namespace.clone(), self.target.name.clone()]);
        if let Some(container) = &self.target.container {
            args.push("-c".to_string());
            args.push(container.clone());
        }
        args.extend(["--".to_string(), "sh".to_string(), "-c".to_string(), command.to_string()]);
        args
    }

    /// Detached form of `command`, logging to `/tmp/<program>.log`
    pub fn background_command(command: &str) -> String {
        detached(command, &format!("/tmp/{}.log", program_name(command)))
    }
}

#[async_trait]
impl RemoteExecutor for ContainerExecutor {
    fn target(&self) -> &RemoteTarget {
        &self.target
    }

    async fn execute(&self, command: &str, timeout: Duration) -> ProbeResult<String> {
        target_debug!(&self.target, "exec `{}`", command);
        self.runner
            .run(&self.exec_args(command), timeout)
            .await
            .map_err(|reason| ProbeError::execution(&self.target, command, reason))
    }

    async fn execute_background(&self, command: &str) -> ProbeResult<()> {
        let wrapped = Self::background_command(command);
        target_debug!(&self.target, "exec detached `{}`", wrapped);
        self.runner
            .run(&self.exec_args(&wrapped), self.launch_timeout)
            .await
            .map(|_| ())
            .map_err(|reason| ProbeError::execution(&self.target, command, reason))
    }
}
