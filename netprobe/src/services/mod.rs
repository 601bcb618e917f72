//! Service implementations
//!
//! Real [`RemoteExecutor`](crate::traits::RemoteExecutor) transports. Each one
//! shells out to a local cluster client binary.

pub mod command_runner;
pub mod console;
pub mod container;

#[cfg(test)]
mod tests;

pub use command_runner::CommandRunner;
pub use console::ConsoleExecutor;
pub use container::ContainerExecutor;
