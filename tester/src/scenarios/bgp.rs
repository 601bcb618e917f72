//! External router BGP session scenario

use netprobe::core::frr::{wait_for_established_sessions, SESSION_POLICY};
use netprobe::RemoteExecutor;
use shared::logging::{log_startup, log_success};

/// Wait until the FRR router reports `expected` established sessions
pub async fn bgp_sessions(frr: &dyn RemoteExecutor, expected: usize) -> anyhow::Result<usize> {
    log_startup("bgp-sessions", &format!("waiting for {} sessions on {}", expected, frr.target()));

    let established = wait_for_established_sessions(frr, expected, SESSION_POLICY).await?;
    log_success(&format!("{} BGP sessions established on {}", established, frr.target()));
    Ok(established)
}
