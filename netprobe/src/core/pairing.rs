//! Client/server pairing check

use crate::core::process::ProcessHandle;

/// True when both ends of a traffic pair report running.
///
/// A snapshot: one probe per side, no retries. The client is not probed when
/// the server is already down.
pub async fn is_tcp_connection(server: &ProcessHandle, client: &ProcessHandle) -> bool {
    server.is_running().await && client.is_running().await
}
