//! Remote process lifecycle for network traffic helpers
//!
//! Starts, confirms, probes and stops background commands (iperf3 servers and
//! clients) inside VMs and pods that are only reachable through a remote
//! shell, and checks the BGP sessions of an external FRR router.

pub mod core;
pub mod error;
pub mod services;
pub mod traits;

// Re-export commonly used types
pub use crate::core::{is_tcp_connection, ClientOptions, CommandLine, PollPolicy, ProcessGuard, ProcessHandle, StartConfirmation};
pub use error::{ExecFailure, ProbeError, ProbeResult};
pub use services::{ConsoleExecutor, ContainerExecutor};
pub use traits::RemoteExecutor;
