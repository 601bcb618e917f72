//! In-memory executors standing in for cluster transports
//!
//! `FakeExecutor` keeps a table of launched command lines and answers the
//! `pgrep -fx`/`pkill -fx` commands the process handle sends, so lifecycle
//! behaviour can be checked without a cluster.

use async_trait::async_trait;
use netprobe::{ExecFailure, ProbeError, ProbeResult, RemoteExecutor};
use shared::RemoteTarget;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::Duration;

const PROBE_PREFIX: &str = "pgrep -fx ";
const KILL_PREFIX: &str = "pkill -fx ";

/// Reverse of the single-quoting applied to probe and kill patterns
fn unquote(quoted: &str) -> String {
    quoted
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .unwrap_or(quoted)
        .replace(r"'\''", "'")
}

fn no_match(target: &RemoteTarget, command: &str) -> ProbeError {
    ProbeError::execution(
        target,
        command,
        ExecFailure::NonZeroExit {
            code: Some(1),
            stderr: String::new(),
        },
    )
}

pub struct FakeExecutor {
    target: RemoteTarget,
    /// Running command lines and their pids
    processes: Mutex<HashMap<String, u32>>,
    next_pid: AtomicU32,
    /// Launched processes exit immediately
    crashing: bool,
    launches: AtomicU32,
    history: Mutex<Vec<String>>,
}

impl FakeExecutor {
    pub fn new(target: RemoteTarget) -> Self {
        Self {
            target,
            processes: Mutex::new(HashMap::new()),
            next_pid: AtomicU32::new(4000),
            crashing: false,
            launches: AtomicU32::new(0),
            history: Mutex::new(Vec::new()),
        }
    }

    /// Accept launches but never show the process as running
    pub fn crashing(mut self) -> Self {
        self.crashing = true;
        self
    }

    pub fn running(&self) -> Vec<String> {
        self.processes.lock().unwrap().keys().cloned().collect()
    }

    pub fn launches(&self) -> u32 {
        self.launches.load(Ordering::SeqCst)
    }

    /// Every synchronous command in the order it was received
    pub fn history(&self) -> Vec<String> {
        self.history.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteExecutor for FakeExecutor {
    fn target(&self) -> &RemoteTarget {
        &self.target
    }

    async fn execute(&self, command: &str, _timeout: Duration) -> ProbeResult<String> {
        self.history.lock().unwrap().push(command.to_string());
        let mut processes = self.processes.lock().unwrap();

        if let Some(pattern) = command.strip_prefix(PROBE_PREFIX) {
            return match processes.get(&unquote(pattern)) {
                Some(pid) => Ok(format!("{pid}\n")),
                None => Err(no_match(&self.target, command)),
            };
        }
        if let Some(pattern) = command.strip_prefix(KILL_PREFIX) {
            return match processes.remove(&unquote(pattern)) {
                Some(_) => Ok(String::new()),
                None => Err(no_match(&self.target, command)),
            };
        }
        Ok(String::new())
    }

    async fn execute_background(&self, command: &str) -> ProbeResult<()> {
        self.launches.fetch_add(1, Ordering::SeqCst);
        if !self.crashing {
            let pid = self.next_pid.fetch_add(1, Ordering::SeqCst);
            self.processes.lock().unwrap().insert(command.to_string(), pid);
        }
        Ok(())
    }
}

/// Executor whose transport is always down
pub struct FailingExecutor {
    target: RemoteTarget,
    launches: AtomicU32,
    commands: AtomicU32,
}

impl FailingExecutor {
    pub fn new(target: RemoteTarget) -> Self {
        Self {
            target,
            launches: AtomicU32::new(0),
            commands: AtomicU32::new(0),
        }
    }

    pub fn launches(&self) -> u32 {
        self.launches.load(Ordering::SeqCst)
    }

    pub fn commands(&self) -> u32 {
        self.commands.load(Ordering::SeqCst)
    }

    fn failure(&self, command: &str) -> ProbeError {
        ProbeError::execution(&self.target, command, ExecFailure::Spawn("connection refused".to_string()))
    }
}

#[async_trait]
impl RemoteExecutor for FailingExecutor {
    fn target(&self) -> &RemoteTarget {
        &self.target
    }

    async fn execute(&self, command: &str, _timeout: Duration) -> ProbeResult<String> {
        self.commands.fetch_add(1, Ordering::SeqCst);
        Err(self.failure(command))
    }

    async fn execute_background(&self, command: &str) -> ProbeResult<()> {
        self.launches.fetch_add(1, Ordering::SeqCst);
        Err(self.failure(command))
    }
}
