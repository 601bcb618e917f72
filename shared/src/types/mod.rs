//! Core types describing where remote commands run

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::errors::{SharedError, SharedResult};

/// How commands reach a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// Shell session on a virtual machine
    Console,
    /// Exec session inside a pod container
    Container,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::Console => write!(f, "console"),
            TargetKind::Container => write!(f, "container"),
        }
    }
}

/// An addressable execution context: a VM or a pod container.
///
/// The target itself is managed by the cluster; this is only its address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteTarget {
    pub name: String,
    pub namespace: String,
    pub kind: TargetKind,
    /// Container to exec into (container targets only)
    #[serde(default)]
    pub container: Option<String>,
    /// Login user for console targets
    #[serde(default)]
    pub username: Option<String>,
}

impl RemoteTarget {
    /// Address a virtual machine console
    pub fn vm(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            kind: TargetKind::Console,
            container: None,
            username: None,
        }
    }

    /// Address a container inside a pod
    pub fn pod(namespace: impl Into<String>, name: impl Into<String>, container: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            kind: TargetKind::Container,
            container: Some(container.into()),
            username: None,
        }
    }

    /// Set the console login user (fluent API)
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Check that the address is usable for its kind
    pub fn validate(&self) -> SharedResult<()> {
        if self.name.trim().is_empty() {
            return Err(SharedError::InvalidTarget {
                reason: "target name is empty".to_string(),
            });
        }
        if self.namespace.trim().is_empty() {
            return Err(SharedError::InvalidTarget {
                reason: format!("target '{}' has no namespace", self.name),
            });
        }
        if self.kind == TargetKind::Container && self.container.as_deref().map_or(true, str::is_empty) {
            return Err(SharedError::InvalidTarget {
                reason: format!("container target '{}' has no container name", self.name),
            });
        }
        Ok(())
    }
}

impl fmt::Display for RemoteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.container) {
            (TargetKind::Container, Some(container)) => {
                write!(f, "pod/{}/{}:{}", self.namespace, self.name, container)
            }
            (TargetKind::Container, None) => write!(f, "pod/{}/{}", self.namespace, self.name),
            (TargetKind::Console, _) => write!(f, "vm/{}/{}", self.namespace, self.name),
        }
    }
}

/// Identifier used to correlate log lines of one process handle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandleId(Uuid);

impl HandleId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for HandleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // First block is enough to tell handles apart in a test log
        let full = self.0.to_string();
        write!(f, "{}", &full[..8])
    }
}
