//! Configuration Management
//!
//! Scenario files and the builder used to assemble them in code.

pub mod builder;
pub mod connectivity;

// Re-export main types
pub use builder::ConnectivityConfigBuilder;
pub use connectivity::ConnectivityConfig;
