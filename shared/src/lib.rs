//! Shared types for remote process probing
//!
//! Contains the target descriptions and error types used by both the
//! `netprobe` library and the `tester` binary, plus the common tracing setup.

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::*;
pub use types::*;
