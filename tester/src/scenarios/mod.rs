//! Test Scenarios
//!
//! Each scenario drives netprobe handles against live targets and reports
//! what it observed.

pub mod bgp;
pub mod connectivity;

pub use bgp::bgp_sessions;
pub use connectivity::connectivity;
