//! Scenario outcome reporting

pub mod assertions;

pub use assertions::{AssertionResult, ConnectivityReport};
