//! Local tmux integration
//!
//! Reads the name of the active tmux window so sessions can follow the
//! local workspace layout.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::traits::LocalMultiplexer;

/// `tmux display-message` format for the window name
const WINDOW_NAME_FORMAT: &str = "#W";

/// Local multiplexer backed by the `tmux` binary
#[derive(Debug, Clone)]
pub struct TmuxMultiplexer {
    program: String,
    timeout: Duration,
}

impl TmuxMultiplexer {
    /// Query `tmux`, giving up after `timeout`
    pub fn new(timeout: Duration) -> Self {
        Self::with_program("tmux", timeout)
    }

    /// Query a specific tmux binary
    pub fn with_program(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }
}

#[async_trait]
impl LocalMultiplexer for TmuxMultiplexer {
    async fn active_window_name(&self) -> Option<String> {
        let query = Command::new(&self.program)
            .args(["display-message", "-p", WINDOW_NAME_FORMAT])
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output();

        let output = match tokio::time::timeout(self.timeout, query).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("{} is not installed", self.program);
                return None;
            }
            Ok(Err(e)) => {
                tracing::debug!("Failed to run {}: {}", self.program, e);
                return None;
            }
            Err(_) => {
                tracing::debug!("{} did not answer within {:?}", self.program, self.timeout);
                return None;
            }
        };

        if !output.status.success() {
            // Not inside tmux, or no server running
            tracing::debug!(
                "{} query failed: {}",
                self.program,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return None;
        }

        parse_window_name(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Extract the window name from `display-message -p` output
pub fn parse_window_name(stdout: &str) -> Option<String> {
    let name = stdout.lines().next().unwrap_or_default().trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_window_name() {
        assert_eq!(parse_window_name("work\n"), Some("work".to_string()));
        assert_eq!(parse_window_name("  editor  \n"), Some("editor".to_string()));
        assert_eq!(parse_window_name("\n"), None);
        assert_eq!(parse_window_name(""), None);
    }

    #[tokio::test]
    async fn test_missing_binary_yields_none() {
        let tmux = TmuxMultiplexer::with_program(
            "/nonexistent/persist-ssh-test-tmux",
            Duration::from_secs(1),
        );
        assert_eq!(tmux.active_window_name().await, None);
    }

    #[cfg(unix)]
    fn fake_tmux(dir: &std::path::Path, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("fake-tmux");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_reads_window_name() {
        let dir = tempfile::tempdir().unwrap();
        let tmux = TmuxMultiplexer::with_program(
            fake_tmux(dir.path(), "echo work"),
            Duration::from_secs(5),
        );
        assert_eq!(tmux.active_window_name().await, Some("work".to_string()));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_no_server_yields_none() {
        let dir = tempfile::tempdir().unwrap();
        let tmux = TmuxMultiplexer::with_program(
            fake_tmux(dir.path(), "echo 'no server running on /tmp/tmux-1000/default' >&2; exit 1"),
            Duration::from_secs(5),
        );
        assert_eq!(tmux.active_window_name().await, None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_slow_query_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let tmux = TmuxMultiplexer::with_program(
            fake_tmux(dir.path(), "sleep 5; echo late"),
            Duration::from_millis(100),
        );
        assert_eq!(tmux.active_window_name().await, None);
    }
}
