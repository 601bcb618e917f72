//! Bounded polling and retry
//!
//! Background launches give no PID and no readiness signal, so the only way
//! to confirm a start is to probe until the probe succeeds or a time budget
//! runs out. Both helpers evaluate immediately, then sleep between attempts.

use std::future::Future;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::error::{ProbeError, ProbeResult};

/// Shortest sleep between attempts; a zero interval would spin
pub const MIN_INTERVAL: Duration = Duration::from_millis(10);

/// Total wait budget and the sleep between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub wait_timeout: Duration,
    pub interval: Duration,
}

impl PollPolicy {
    /// Wait for the first non-empty console output
    pub const CONSOLE_OUTPUT: PollPolicy = PollPolicy::new(Duration::from_secs(60), Duration::from_secs(5));

    /// Wait for a container process to be confirmed running
    pub const CONFIRM_RUNNING: PollPolicy = PollPolicy::new(Duration::from_secs(30), Duration::from_secs(2));

    pub const fn new(wait_timeout: Duration, interval: Duration) -> Self {
        Self { wait_timeout, interval }
    }

    fn effective_interval(&self) -> Duration {
        self.interval.max(MIN_INTERVAL)
    }
}

/// Outcome of a single attempt
enum Attempt<T> {
    Done(T),
    Again(Option<String>),
    Abort(ProbeError),
}

async fn drive<T, F, Fut>(policy: PollPolicy, mut attempt: F) -> ProbeResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Attempt<T>>,
{
    let started = Instant::now();
    let deadline = started + policy.wait_timeout;
    let mut attempts: u32 = 0;
    let mut last_error = None;

    loop {
        attempts += 1;
        match attempt().await {
            Attempt::Done(value) => return Ok(value),
            Attempt::Abort(err) => return Err(err),
            Attempt::Again(error) => {
                if error.is_some() {
                    last_error = error;
                }
            }
        }

        let now = Instant::now();
        if now >= deadline {
            return Err(ProbeError::PollTimeoutExpired {
                waited: now - started,
                attempts,
                last_error,
            });
        }

        let pause = policy.effective_interval().min(deadline - now);
        debug!("⏳ Attempt {} unsuccessful, next in {:?}", attempts, pause);
        sleep(pause).await;
    }
}

/// Evaluate `probe` until it yields a value or the budget is exhausted.
///
/// `Ok(None)` and `Err(_)` both count as "not yet"; the most recent error is
/// carried in the resulting [`ProbeError::PollTimeoutExpired`].
pub async fn poll_until<T, F, Fut>(policy: PollPolicy, mut probe: F) -> ProbeResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ProbeResult<Option<T>>>,
{
    drive(policy, || {
        let fut = probe();
        async move {
            match fut.await {
                Ok(Some(value)) => Attempt::Done(value),
                Ok(None) => Attempt::Again(None),
                Err(err) => Attempt::Again(Some(err.to_string())),
            }
        }
    })
    .await
}

/// Run `op` until it succeeds, retrying only errors accepted by `is_retryable`.
///
/// Any other error is returned at once without further attempts.
pub async fn retry<T, F, Fut, P>(policy: PollPolicy, is_retryable: P, mut op: F) -> ProbeResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ProbeResult<T>>,
    P: Fn(&ProbeError) -> bool,
{
    let is_retryable = &is_retryable;
    drive(policy, || {
        let fut = op();
        async move {
            match fut.await {
                Ok(value) => Attempt::Done(value),
                Err(err) if is_retryable(&err) => Attempt::Again(Some(err.to_string())),
                Err(err) => Attempt::Abort(err),
            }
        }
    })
    .await
}
