//! Core domain types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Connection endpoint passed through to the transport unchanged
///
/// May be a hostname, `user@host`, or an alias from `~/.ssh/config`; only the
/// transport interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteTarget(pub String);

impl RemoteTarget {
    /// Create a new target
    pub fn new(target: impl Into<String>) -> Self {
        Self(target.into())
    }

    /// Get the raw target string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RemoteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for RemoteTarget {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RemoteTarget {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Result of a non-interactive remote command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteOutput {
    /// Exit status of the remote command (None if killed by a signal)
    pub status: Option<i32>,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl RemoteOutput {
    /// Whether the remote command exited with status zero
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Standard output followed by standard error
    pub fn combined(&self) -> String {
        let mut combined = self.stdout.clone();
        if !self.stderr.is_empty() {
            if !combined.is_empty() && !combined.ends_with('\n') {
                combined.push('\n');
            }
            combined.push_str(&self.stderr);
        }
        combined
    }
}

/// How an interactive remote command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractiveExit {
    /// The remote side exited (or the user detached) with this status
    Exited(Option<i32>),
    /// The local user interrupted the transport process
    Interrupted,
}

impl InteractiveExit {
    /// Whether the remote command exited with status zero
    pub fn success(&self) -> bool {
        matches!(self, InteractiveExit::Exited(Some(0)))
    }
}

impl fmt::Display for InteractiveExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InteractiveExit::Exited(Some(code)) => write!(f, "exited with status {}", code),
            InteractiveExit::Exited(None) => write!(f, "terminated by signal"),
            InteractiveExit::Interrupted => write!(f, "interrupted"),
        }
    }
}
