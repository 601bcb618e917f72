//! Command line tests for the tester binary

use std::process::Command;

fn tester() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tester"));
    cmd.env_remove("KUBECONFIG").env("RUST_LOG", "error");
    cmd
}

#[test]
fn test_frr_config_prints_rendered_config() {
    let output = tester()
        .args(["frr-config", "--subnet", "172.100.0.0/16"])
        .args(["--node", "192.168.10.11", "--node", "192.168.10.12"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("router bgp 64512\n"));
    assert!(stdout.contains(" neighbor 192.168.10.12 remote-as 64512\n"));
    assert!(stdout.contains("  network 172.100.0.0/16\n"));
    assert!(stdout.trim_end().ends_with("exit-address-family"));
}

#[test]
fn test_frr_config_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frr.conf");

    let status = tester()
        .args(["frr-config", "--subnet", "172.100.0.0/16", "--node", "192.168.10.11", "--output"])
        .arg(&path)
        .status()
        .unwrap();

    assert!(status.success());
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("neighbor 192.168.10.11 route-reflector-client"));
}

#[test]
fn test_frr_config_rejects_bad_subnet() {
    let output = tester()
        .args(["frr-config", "--subnet", "not-a-subnet", "--node", "192.168.10.11"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not an IPv4 prefix"));
}

#[test]
fn test_connectivity_with_missing_scenario_fails() {
    let output = tester()
        .args(["connectivity", "--scenario", "/nonexistent/scenario.json"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read scenario file"));
}
