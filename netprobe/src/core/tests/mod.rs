//! Process handle tests against mocked executors


pub mod common {
    use shared::RemoteTarget;

    use crate::error::{ExecFailure, ProbeError};
    use crate::traits::MockRemoteExecutor;

    pub fn server_vm() -> RemoteTarget {
        RemoteTarget::vm("udn-ns", "vm-server")
    }

    pub fn client_pod() -> RemoteTarget {
        RemoteTarget::pod("udn-ns", "client-pod", "iperf")
    }

    /// Mock bound to `target` with no command expectations yet
    pub fn mock_for(target: RemoteTarget) -> MockRemoteExecutor {
        let mut executor = MockRemoteExecutor::new();
        executor.expect_target().return_const(target);
        executor
    }

    /// What `pgrep` reports through the transport when nothing matches
    pub fn no_match(target: &RemoteTarget, command: &str) -> ProbeError {
        ProbeError::execution(
            target,
            command,
            ExecFailure::NonZeroExit {
                code: Some(1),
                stderr: String::new(),
            },
        )
    }
}
