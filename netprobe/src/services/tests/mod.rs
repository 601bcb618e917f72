//! Service-specific tests
//!
//! Transports are exercised against local stand-ins (`sh`, `echo`) for the
//! cluster client binaries.

mod executors;

pub mod common {
    use std::time::Duration;

    /// Generous timeout for local commands that should finish at once
    pub const QUICK: Duration = Duration::from_secs(5);
}
