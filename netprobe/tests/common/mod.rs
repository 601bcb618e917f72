//! Common test utilities for the netprobe integration suites

pub mod fake_executor;

pub use fake_executor::{FailingExecutor, FakeExecutor};

use std::net::{IpAddr, Ipv4Addr};

pub const SERVER_IP: IpAddr = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5));
