//! Tests for the kubectl and virtctl transports

use shared::RemoteTarget;
use std::path::PathBuf;

use super::common::QUICK;
use crate::error::{ExecFailure, ProbeError};
use crate::services::{ConsoleExecutor, ContainerExecutor};
use crate::traits::RemoteExecutor;

fn frr_pod() -> RemoteTarget {
    RemoteTarget::pod("frr-ns", "frr-external", "frr")
}

#[test]
fn test_container_exec_args() {
    let executor = ContainerExecutor::new(frr_pod()).unwrap();

    assert_eq!(
        executor.exec_args("pgrep -fx 'iperf3 --server --port 5201 --one-off'"),
        vec![
            "exec",
            "-n",
            "frr-ns",
            "frr-external",
            "-c",
            "frr",
            "--",
            "sh",
            "-c",
            "pgrep -fx 'iperf3 --server --port 5201 --one-off'",
        ]
    );
}

#[test]
fn test_container_exec_args_with_kubeconfig() {
    let executor = ContainerExecutor::new(frr_pod())
        .unwrap()
        .with_kubeconfig(Some(PathBuf::from("/etc/cluster/kubeconfig")));

    let args = executor.exec_args("true");
    assert_eq!(&args[..2], ["--kubeconfig", "/etc/cluster/kubeconfig"]);
    assert_eq!(args[2], "exec");
}

#[test]
fn test_container_background_logs_to_tmp() {
    assert_eq!(
        ContainerExecutor::background_command("iperf3 --client 10.0.0.5 --time 0 --port 5201 --connect-timeout 0"),
        "nohup iperf3 --client 10.0.0.5 --time 0 --port 5201 --connect-timeout 0 >/tmp/iperf3.log 2>&1 &"
    );
}

#[test]
fn test_container_rejects_vm_target() {
    let err = ContainerExecutor::new(RemoteTarget::vm("ns", "vm-a")).unwrap_err();
    assert!(matches!(err, ProbeError::SharedError(_)));
}

#[test]
fn test_container_requires_container_name() {
    let mut target = frr_pod();
    target.container = None;
    assert!(ContainerExecutor::new(target).is_err());
}

#[tokio::test]
async fn test_container_execute_passes_command_through() {
    // echo stands in for kubectl and prints the argument vector back
    let executor = ContainerExecutor::new(frr_pod()).unwrap().with_kubectl("echo");

    let output = executor.execute("vtysh -c 'show bgp neighbors'", QUICK).await.unwrap();

    assert_eq!(
        output.trim(),
        "exec -n frr-ns frr-external -c frr -- sh -c vtysh -c 'show bgp neighbors'"
    );
}

#[tokio::test]
async fn test_container_execute_failure_names_target_and_command() {
    let executor = ContainerExecutor::new(frr_pod()).unwrap().with_kubectl("false");

    let err = executor.execute("pgrep -fx 'sleep 300'", QUICK).await.unwrap_err();

    match err {
        ProbeError::ExecutionError { target, command, reason } => {
            assert_eq!(target, "pod/frr-ns/frr-external:frr");
            assert_eq!(command, "pgrep -fx 'sleep 300'");
            assert!(matches!(reason, ExecFailure::NonZeroExit { code: Some(1), .. }));
        }
        other => panic!("expected execution error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_container_background_failure_reports_unwrapped_command() {
    let executor = ContainerExecutor::new(frr_pod()).unwrap().with_kubectl("false");

    let err = executor.execute_background("iperf3 --server --port 5201 --one-off").await.unwrap_err();

    match err {
        ProbeError::ExecutionError { command, .. } => assert_eq!(command, "iperf3 --server --port 5201 --one-off"),
        other => panic!("expected execution error, got {other:?}"),
    }
}

#[test]
fn test_console_ssh_args() {
    let executor = ConsoleExecutor::new(RemoteTarget::vm("udn-ns", "vm-server").with_username("cloud-user"))
        .unwrap()
        .with_identity_file(Some(PathBuf::from("/keys/id_ed25519")));

    assert_eq!(
        executor.ssh_args("pgrep -fx 'iperf3 --server --port 5201 --one-off'"),
        vec![
            "ssh",
            "--namespace",
            "udn-ns",
            "--username",
            "cloud-user",
            "--identity-file",
            "/keys/id_ed25519",
            "--local-ssh-opts=-o StrictHostKeyChecking=no",
            "vmi/vm-server",
            "--command",
            "pgrep -fx 'iperf3 --server --port 5201 --one-off'",
        ]
    );
}

#[test]
fn test_console_default_username() {
    let executor = ConsoleExecutor::new(RemoteTarget::vm("udn-ns", "vm-client")).unwrap();
    let args = executor.ssh_args("true");
    let user = args.iter().position(|a| a == "--username").unwrap();
    assert_eq!(args[user + 1], crate::services::console::DEFAULT_VM_USER);
}

#[test]
fn test_console_background_discards_output() {
    assert_eq!(
        ConsoleExecutor::background_command("iperf3 --server --port 5201 --one-off"),
        "nohup iperf3 --server --port 5201 --one-off >/dev/null 2>&1 &"
    );
}

#[test]
fn test_console_rejects_pod_target() {
    assert!(ConsoleExecutor::new(frr_pod()).is_err());
}

#[tokio::test]
async fn test_console_background_launch_succeeds() {
    let executor = ConsoleExecutor::new(RemoteTarget::vm("udn-ns", "vm-server"))
        .unwrap()
        .with_virtctl("true");

    executor.execute_background("iperf3 --server --port 5201 --one-off").await.unwrap();
    assert_eq!(executor.target().to_string(), "vm/udn-ns/vm-server");
}
