//! Assertion results for connectivity runs
//!
//! A run collects raw observations into a [`ConnectivityReport`]; the report
//! turns them into named pass/fail checks.

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssertionResult {
    pub success: bool,
    pub message: String,
    pub details: Option<String>,
}

impl AssertionResult {
    pub fn success(message: String) -> Self {
        Self {
            success: true,
            message,
            details: None,
        }
    }

    pub fn failure(message: String, details: Option<String>) -> Self {
        Self {
            success: false,
            message,
            details,
        }
    }

    fn check(success: bool, message: String, failure_details: impl FnOnce() -> String) -> Self {
        if success {
            Self::success(message)
        } else {
            Self::failure(message, Some(failure_details()))
        }
    }
}

/// Observations from one server/client pairing run
#[derive(Debug, Clone, Serialize)]
pub struct ConnectivityReport {
    pub server: String,
    pub client: String,
    pub server_command: String,
    pub client_command: String,
    pub server_confirmed: bool,
    pub client_confirmed: bool,
    /// One pairing check per sample
    pub samples: Vec<bool>,
    /// Both sides gone within the stop budget
    pub stopped_cleanly: bool,
    pub finished_at: DateTime<Utc>,
}

impl ConnectivityReport {
    pub fn new(server: String, client: String, server_command: String, client_command: String) -> Self {
        Self {
            server,
            client,
            server_command,
            client_command,
            server_confirmed: false,
            client_confirmed: false,
            samples: Vec::new(),
            stopped_cleanly: false,
            finished_at: Utc::now(),
        }
    }

    pub fn assertions(&self) -> Vec<AssertionResult> {
        let connected = self.samples.iter().filter(|ok| **ok).count();

        vec![
            AssertionResult::check(
                self.server_confirmed,
                format!("iperf3 server started on {}", self.server),
                || format!("`{}` was not seen running", self.server_command),
            ),
            AssertionResult::check(
                self.client_confirmed,
                format!("iperf3 client started on {}", self.client),
                || format!("`{}` was not seen running", self.client_command),
            ),
            AssertionResult::check(
                !self.samples.is_empty() && connected == self.samples.len(),
                format!("{} -> {} connected", self.client, self.server),
                || format!("{}/{} pairing checks passed", connected, self.samples.len()),
            ),
            AssertionResult::check(self.stopped_cleanly, "both processes stopped".to_string(), || {
                "a process was still running after stop".to_string()
            }),
        ]
    }

    pub fn passed(&self) -> bool {
        self.assertions().iter().all(|a| a.success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> ConnectivityReport {
        let mut report = ConnectivityReport::new(
            "vm/udn-ns/vm-server".to_string(),
            "pod/udn-ns/client-pod:iperf".to_string(),
            "iperf3 --server --port 5201 --one-off".to_string(),
            "iperf3 --client 10.0.0.5 --time 0 --port 5201 --connect-timeout 0".to_string(),
        );
        report.server_confirmed = true;
        report.client_confirmed = true;
        report.samples = vec![true, true];
        report.stopped_cleanly = true;
        report
    }

    #[test]
    fn test_full_run_passes() {
        let report = report();
        assert!(report.passed());
        assert!(report.assertions().iter().all(|a| a.details.is_none()));
    }

    #[test]
    fn test_one_failed_sample_fails_the_run() {
        let mut report = report();
        report.samples = vec![true, false, true];

        let failed: Vec<_> = report.assertions().into_iter().filter(|a| !a.success).collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].details.as_deref(), Some("2/3 pairing checks passed"));
    }

    #[test]
    fn test_no_samples_is_not_connected() {
        let mut report = report();
        report.samples.clear();
        assert!(!report.passed());
    }

    #[test]
    fn test_report_serializes() {
        let json = serde_json::to_value(report()).unwrap();
        assert_eq!(json["samples"], serde_json::json!([true, true]));
        assert_eq!(json["server"], "vm/udn-ns/vm-server");
    }
}
