//! Shared logging utilities for consistent tracing across the workspace

use chrono::{DateTime, Utc};
use tracing::{error, info};

/// Crates whose events are shown at the requested level
const WORKSPACE_CRATES: [&str; 3] = ["netprobe", "tester", "shared"];

/// Build the filter directive string for a base level
pub fn filter_directives(log_level: Option<&str>) -> String {
    let base_level = log_level.unwrap_or("info");
    WORKSPACE_CRATES
        .iter()
        .map(|krate| format!("{krate}={base_level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Initialize tracing subscriber with an optional log level.
///
/// `RUST_LOG` takes precedence when set. Events go to stderr; stdout carries
/// reports and rendered configuration.
pub fn init_tracing_with_level(log_level: Option<&str>) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_directives(log_level)));

    fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Get formatted timestamp for consistent logging
pub fn format_timestamp() -> String {
    let now: DateTime<Utc> = Utc::now();
    now.format("%H:%M:%S%.3f").to_string()
}

/// Macro for target-aware info logging
#[macro_export]
macro_rules! target_info {
    ($target:expr, $($arg:tt)*) => {
        tracing::info!(
            target_name = %$target,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for target-aware warning logging
#[macro_export]
macro_rules! target_warn {
    ($target:expr, $($arg:tt)*) => {
        tracing::warn!(
            target_name = %$target,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for target-aware error logging
#[macro_export]
macro_rules! target_error {
    ($target:expr, $($arg:tt)*) => {
        tracing::error!(
            target_name = %$target,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for target-aware debug logging
#[macro_export]
macro_rules! target_debug {
    ($target:expr, $($arg:tt)*) => {
        tracing::debug!(
            target_name = %$target,
            timestamp = $crate::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Contextual logging helper for scenario start
pub fn log_startup(scenario: &str, details: &str) {
    info!(
        scenario = scenario,
        timestamp = format_timestamp(),
        "🚀 Starting {}",
        details
    );
}

/// Contextual logging helper for error conditions
pub fn log_error(context: &str, error: &dyn std::fmt::Display) {
    error!(
        timestamp = format_timestamp(),
        error = %error,
        "❌ {} failed: {}",
        context,
        error
    );
}

/// Contextual logging helper for success conditions
pub fn log_success(message: &str) {
    info!(timestamp = format_timestamp(), "✅ {}", message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directives_default_level() {
        assert_eq!(filter_directives(None), "netprobe=info,tester=info,shared=info");
    }

    #[test]
    fn test_filter_directives_custom_level() {
        let directives = filter_directives(Some("debug"));
        assert!(directives.contains("netprobe=debug"));
        assert!(directives.contains("tester=debug"));
    }

    #[test]
    fn test_timestamp_format() {
        let ts = format_timestamp();
        // HH:MM:SS.mmm
        assert_eq!(ts.len(), 12);
        assert_eq!(&ts[2..3], ":");
        assert_eq!(&ts[8..9], ".");
    }
}
