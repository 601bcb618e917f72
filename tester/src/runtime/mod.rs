//! Cluster access for scenarios

pub mod cluster;

pub use cluster::Cluster;
