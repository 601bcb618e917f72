//! Cluster test runner
//!
//! Drives `netprobe` process handles against VMs and pods of a live cluster:
//! iperf3 pairing checks between two targets and BGP session checks on the
//! external FRR router.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tester::*;
//! use shared::RemoteTarget;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = ConnectivityConfig::builder(
//!     RemoteTarget::vm("udn-ns", "vm-server"),
//!     RemoteTarget::pod("udn-ns", "client-pod", "iperf"),
//!     "10.0.0.5".parse()?,
//! )
//! .build()?;
//!
//! let cluster = Cluster::new(None);
//! let report = connectivity(
//!     cluster.executor_for(&config.server)?,
//!     cluster.executor_for(&config.client)?,
//!     &config,
//! )
//! .await?;
//! assert!(report.passed());
//! # Ok(())
//! # }
//! ```

// Core modules
pub mod config;
pub mod runtime;
pub mod scenarios;
pub mod testing;

// Main interfaces - re-exported at crate root for convenience
pub use config::{ConnectivityConfig, ConnectivityConfigBuilder};
pub use runtime::Cluster;
pub use scenarios::{bgp_sessions, connectivity};
pub use testing::{AssertionResult, ConnectivityReport};
