//! Connectivity Configuration Builder
//!
//! Fluent construction of [`ConnectivityConfig`] for scenarios assembled in code

use shared::{RemoteTarget, SharedResult};
use std::net::IpAddr;
use std::time::Duration;

use super::ConnectivityConfig;

pub struct ConnectivityConfigBuilder {
    config: ConnectivityConfig,
}

impl ConnectivityConfigBuilder {
    pub fn new(server: RemoteTarget, client: RemoteTarget, server_ip: IpAddr) -> Self {
        Self {
            config: ConnectivityConfig {
                server,
                client,
                server_ip,
                port: netprobe::core::IPERF_DEFAULT_PORT,
                bind_interface: None,
                samples: 1,
                sample_interval_secs: 5,
            },
        }
    }

    /// Set the iperf3 port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Bind the client to an interface
    pub fn bind_interface<S: Into<String>>(mut self, bind: S) -> Self {
        self.config.bind_interface = Some(bind.into());
        self
    }

    /// Set how many pairing checks to take
    pub fn samples(mut self, samples: u32) -> Self {
        self.config.samples = samples;
        self
    }

    /// Set the pause between pairing checks (whole seconds)
    pub fn sample_interval(mut self, interval: Duration) -> Self {
        self.config.sample_interval_secs = interval.as_secs();
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> SharedResult<ConnectivityConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
