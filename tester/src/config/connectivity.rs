//! Traffic pairing scenario configuration
//!
//! Loaded from a JSON scenario file:
//!
//! ```json
//! {
//!   "server": { "name": "vm-server", "namespace": "udn-ns", "kind": "console" },
//!   "client": { "name": "client-pod", "namespace": "udn-ns", "kind": "container", "container": "iperf" },
//!   "server_ip": "10.0.0.5",
//!   "bind_interface": "net1"
//! }
//! ```

use anyhow::Context;
use netprobe::core::IPERF_DEFAULT_PORT;
use netprobe::ClientOptions;
use serde::{Deserialize, Serialize};
use shared::{RemoteTarget, SharedError, SharedResult};
use std::net::IpAddr;
use std::path::Path;
use std::time::Duration;

use super::ConnectivityConfigBuilder;

fn default_port() -> u16 {
    IPERF_DEFAULT_PORT
}

fn default_samples() -> u32 {
    1
}

fn default_sample_interval_secs() -> u64 {
    5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectivityConfig {
    /// Where the iperf3 server runs
    pub server: RemoteTarget,
    /// Where the iperf3 client runs
    pub client: RemoteTarget,
    /// Address the client connects to
    pub server_ip: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub bind_interface: Option<String>,
    /// Number of pairing checks taken while both sides run
    #[serde(default = "default_samples")]
    pub samples: u32,
    #[serde(default = "default_sample_interval_secs")]
    pub sample_interval_secs: u64,
}

impl ConnectivityConfig {
    /// Create a builder with the required fields set
    pub fn builder(server: RemoteTarget, client: RemoteTarget, server_ip: IpAddr) -> ConnectivityConfigBuilder {
        ConnectivityConfigBuilder::new(server, client, server_ip)
    }

    /// Read and validate a JSON scenario file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario file {}", path.display()))?;
        let config: ConnectivityConfig = serde_json::from_str(&raw)
            .map_err(SharedError::from)
            .with_context(|| format!("Failed to parse scenario file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SharedResult<()> {
        self.server.validate()?;
        self.client.validate()?;

        if self.port == 0 {
            return Err(SharedError::InvalidConfig {
                field: "port".to_string(),
                value: self.port.to_string(),
            });
        }
        if self.samples == 0 {
            return Err(SharedError::InvalidConfig {
                field: "samples".to_string(),
                value: self.samples.to_string(),
            });
        }
        if let Some(bind) = &self.bind_interface {
            if bind.is_empty() || bind.contains(char::is_whitespace) {
                return Err(SharedError::InvalidConfig {
                    field: "bind_interface".to_string(),
                    value: bind.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn client_options(&self) -> ClientOptions {
        let options = ClientOptions::new(self.server_ip, self.port);
        match &self.bind_interface {
            Some(bind) => options.with_bind_interface(bind.clone()),
            None => options,
        }
    }

    pub fn sample_interval(&self) -> Duration {
        Duration::from_secs(self.sample_interval_secs)
    }
}
