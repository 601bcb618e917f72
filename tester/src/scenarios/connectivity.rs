//! iperf3 client/server pairing scenario

use netprobe::core::{iperf, poll_until};
use netprobe::{is_tcp_connection, PollPolicy, ProbeResult, ProcessHandle, RemoteExecutor};
use shared::logging::{log_startup, log_success};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::ConnectivityConfig;
use crate::testing::ConnectivityReport;

/// Start a server and a client, sample their pairing, then stop both.
///
/// Both handles are stopped on every path, including a failed start.
pub async fn connectivity(
    server_executor: Arc<dyn RemoteExecutor>,
    client_executor: Arc<dyn RemoteExecutor>,
    config: &ConnectivityConfig,
) -> anyhow::Result<ConnectivityReport> {
    let server = iperf::server(server_executor, config.port)?;
    let client = iperf::client(client_executor, &config.client_options())?;

    log_startup(
        "connectivity",
        &format!("{} -> {} ({}:{})", config.client, config.server, config.server_ip, config.port),
    );

    let mut report = ConnectivityReport::new(
        config.server.to_string(),
        config.client.to_string(),
        server.command().to_string(),
        client.command().to_string(),
    );

    let outcome = exercise_pair(&server, &client, config, &mut report).await;

    client.stop().await;
    server.stop().await;
    report.stopped_cleanly = wait_until_stopped(&server, &client).await;
    report.finished_at = chrono::Utc::now();

    outcome?;
    if report.passed() {
        log_success(&format!("{} -> {} connected", config.client, config.server));
    } else {
        warn!("⚠️ Connectivity checks failed for {} -> {}", config.client, config.server);
    }
    Ok(report)
}

/// Wait for both sides to disappear after their kill was sent
async fn wait_until_stopped(server: &ProcessHandle, client: &ProcessHandle) -> bool {
    let gone = poll_until(PollPolicy::CONFIRM_RUNNING, move || async move {
        let gone = !server.is_running().await && !client.is_running().await;
        Ok(gone.then_some(()))
    })
    .await;

    if let Err(e) = &gone {
        warn!("⚠️ Processes still running after stop: {}", e);
    }
    gone.is_ok()
}

async fn exercise_pair(
    server: &ProcessHandle,
    client: &ProcessHandle,
    config: &ConnectivityConfig,
    report: &mut ConnectivityReport,
) -> ProbeResult<()> {
    report.server_confirmed = server.start().await?;
    report.client_confirmed = client.start().await?;

    for sample in 0..config.samples {
        if sample > 0 {
            tokio::time::sleep(config.sample_interval()).await;
        }
        let connected = is_tcp_connection(server, client).await;
        info!("📊 Pairing check {}/{}: {}", sample + 1, config.samples, connected);
        report.samples.push(connected);
    }
    Ok(())
}
