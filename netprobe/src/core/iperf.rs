//! iperf3 server and client processes
//!
//! The server runs once (`--one-off`) and the client streams without a time
//! limit (`--time 0`), so a connected pair keeps both processes alive until
//! one of them is killed.

use std::net::IpAddr;
use std::sync::Arc;

use crate::core::command::CommandLine;
use crate::core::process::ProcessHandle;
use crate::error::ProbeResult;
use crate::traits::RemoteExecutor;

pub const IPERF_BIN: &str = "iperf3";

/// Default iperf3 listen port
pub const IPERF_DEFAULT_PORT: u16 = 5201;

/// Where a traffic client connects to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientOptions {
    pub server_ip: IpAddr,
    pub server_port: u16,
    /// Interface or address to bind the client to; the default route is used when unset
    pub bind_interface: Option<String>,
}

impl ClientOptions {
    pub fn new(server_ip: IpAddr, server_port: u16) -> Self {
        Self {
            server_ip,
            server_port,
            bind_interface: None,
        }
    }

    /// Bind the client to an interface (fluent API)
    pub fn with_bind_interface(mut self, bind_interface: impl Into<String>) -> Self {
        self.bind_interface = Some(bind_interface.into());
        self
    }
}

/// `iperf3 --server --port <P> --one-off`
pub fn server_command(port: u16) -> ProbeResult<CommandLine> {
    CommandLine::builder(IPERF_BIN)
        .flag("--server")
        .option("--port", port)
        .flag("--one-off")
        .build()
}

/// `iperf3 --client <ip> --time 0 --port <P> --connect-timeout 0 [--bind <iface>]`
pub fn client_command(options: &ClientOptions) -> ProbeResult<CommandLine> {
    CommandLine::builder(IPERF_BIN)
        .option("--client", options.server_ip)
        .option("--time", 0)
        .option("--port", options.server_port)
        .option("--connect-timeout", 0)
        .option_if("--bind", options.bind_interface.as_deref())
        .build()
}

/// Server process handle on the given target
pub fn server(executor: Arc<dyn RemoteExecutor>, port: u16) -> ProbeResult<ProcessHandle> {
    Ok(ProcessHandle::new(executor, server_command(port)?))
}

/// Client process handle on the given target
pub fn client(executor: Arc<dyn RemoteExecutor>, options: &ClientOptions) -> ProbeResult<ProcessHandle> {
    Ok(ProcessHandle::new(executor, client_command(options)?))
}
