//! External FRR router helpers
//!
//! Renders the configuration of the router that peers with every cluster
//! node, and reads its BGP session state through a remote executor.

use std::fmt::Write as _;
use std::net::Ipv4Addr;
use std::time::Duration;
use tracing::{debug, info};

use crate::core::polling::{poll_until, PollPolicy};
use crate::core::process::DEFAULT_CMD_TIMEOUT;
use crate::error::{ProbeError, ProbeResult};
use crate::traits::RemoteExecutor;

/// Autonomous system shared by the cluster and the external router (iBGP)
pub const BGP_ASN: u32 = 64512;

/// Neighbor listing command run inside the FRR container
pub const SHOW_BGP_NEIGHBORS: &str = r#"vtysh -c "show bgp neighbors""#;

/// Line printed once per neighbor whose first session came up and never dropped
pub const ESTABLISHED_MARKER: &str = "Connections established 1; dropped 0";

/// Session establishment budget
pub const SESSION_POLICY: PollPolicy = PollPolicy::new(Duration::from_secs(60), Duration::from_secs(5));

fn validate_ipv4_prefix(prefix: &str) -> ProbeResult<()> {
    let invalid = || ProbeError::BgpConfigError {
        message: format!("'{prefix}' is not an IPv4 prefix"),
    };

    let (addr, len) = prefix.split_once('/').ok_or_else(invalid)?;
    addr.parse::<Ipv4Addr>().map_err(|_| invalid())?;
    match len.parse::<u8>() {
        Ok(len) if len <= 32 => Ok(()),
        _ => Err(invalid()),
    }
}

/// Render the external router's `frr.conf` BGP section.
///
/// Every node becomes a route-reflector client advertised `external_subnet`.
pub fn render_frr_conf(external_subnet: &str, nodes: &[Ipv4Addr]) -> ProbeResult<String> {
    if nodes.is_empty() {
        return Err(ProbeError::BgpConfigError {
            message: "node list cannot be empty".to_string(),
        });
    }
    validate_ipv4_prefix(external_subnet)?;

    let mut conf = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(conf, "router bgp {BGP_ASN}");
    conf.push_str(" no bgp default ipv4-unicast\n");
    conf.push_str(" no bgp network import-check\n");
    conf.push('\n');

    for node in nodes {
        let _ = writeln!(conf, " neighbor {node} remote-as {BGP_ASN}");
    }
    conf.push('\n');

    conf.push_str(" address-family ipv4 unicast\n");
    let _ = writeln!(conf, "  network {external_subnet}");
    for node in nodes {
        let _ = writeln!(conf, "  neighbor {node} activate");
        let _ = writeln!(conf, "  neighbor {node} next-hop-self");
        let _ = writeln!(conf, "  neighbor {node} route-reflector-client");
    }
    conf.push_str(" exit-address-family");

    Ok(conf)
}

/// Count neighbors reported as established in `show bgp neighbors` output
pub fn count_established_sessions(neighbors_output: &str) -> usize {
    neighbors_output.matches(ESTABLISHED_MARKER).count()
}

/// Query the router once and count established sessions
pub async fn established_sessions(executor: &dyn RemoteExecutor) -> ProbeResult<usize> {
    let output = executor.execute(SHOW_BGP_NEIGHBORS, DEFAULT_CMD_TIMEOUT).await?;
    let count = count_established_sessions(&output);
    debug!(target_name = %executor.target(), "BGP sessions established: {}", count);
    Ok(count)
}

/// Poll the router until exactly `expected` sessions are established
pub async fn wait_for_established_sessions(
    executor: &dyn RemoteExecutor,
    expected: usize,
    policy: PollPolicy,
) -> ProbeResult<usize> {
    let count = poll_until(policy, || async move {
        let count = established_sessions(executor).await?;
        Ok((count == expected).then_some(count))
    })
    .await?;

    info!(target_name = %executor.target(), "✅ {} BGP sessions established", count);
    Ok(count)
}
