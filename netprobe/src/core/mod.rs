//! Core probing logic
//!
//! Everything here talks to the cluster only through
//! [`RemoteExecutor`](crate::traits::RemoteExecutor), so it is driven by mocks
//! in tests.

pub mod command;
pub mod frr;
pub mod iperf;
pub mod pairing;
pub mod polling;
pub mod process;

pub use command::{shell_quote, CommandLine, CommandLineBuilder};
pub use iperf::{ClientOptions, IPERF_DEFAULT_PORT};
pub use pairing::is_tcp_connection;
pub use polling::{poll_until, retry, PollPolicy};
pub use process::{HandleState, ProcessGuard, ProcessHandle, StartConfirmation, DEFAULT_CMD_TIMEOUT};

#[cfg(test)]
mod tests;
