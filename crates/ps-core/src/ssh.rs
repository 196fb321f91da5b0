//! Remote transport backed by the system `ssh` binary
//!
//! Using the system client means host aliases, keys, agents and
//! `ProxyJump` settings from `~/.ssh/config` all apply unchanged.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::config::PersistConfig;
use crate::error::TransportError;
use crate::traits::RemoteTransport;
use crate::types::{InteractiveExit, RemoteOutput, RemoteTarget};

/// Exit status `ssh` reserves for its own failures
pub const SSH_ERROR_STATUS: i32 = 255;

/// Transport running remote scripts through `ssh`
#[derive(Debug, Clone)]
pub struct SshTransport {
    program: String,
    options: Vec<String>,
}

impl SshTransport {
    /// Create a transport using `program` with extra `options`
    pub fn new(program: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            program: program.into(),
            options,
        }
    }

    /// Create a transport from the `ssh_program`/`ssh_options` settings
    pub fn from_config(config: &PersistConfig) -> Self {
        Self::new(config.ssh_program.clone(), config.ssh_options.clone())
    }

    /// Arguments for one remote invocation
    ///
    /// `-t` forces a terminal for interactive use, `-T` disables it for
    /// captured runs. The script is wrapped in `sh -c` as a single argument.
    pub fn args(
        &self,
        target: &RemoteTarget,
        script: &str,
        tty: bool,
    ) -> Result<Vec<String>, TransportError> {
        let mut args = self.options.clone();
        args.push(if tty { "-t" } else { "-T" }.to_string());
        args.push("--".to_string());
        args.push(target.as_str().to_string());
        args.push(ps_protocol::sh_command(script)?);
        Ok(args)
    }

    fn command(
        &self,
        target: &RemoteTarget,
        script: &str,
        tty: bool,
    ) -> Result<Command, TransportError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.args(target, script, tty)?);
        Ok(cmd)
    }

    fn spawn_error(&self, source: std::io::Error) -> TransportError {
        TransportError::Spawn {
            program: self.program.clone(),
            source,
        }
    }
}

#[async_trait]
impl RemoteTransport for SshTransport {
    async fn run_captured(
        &self,
        target: &RemoteTarget,
        script: &str,
    ) -> Result<RemoteOutput, TransportError> {
        tracing::debug!(target = %target, "Running remote script:\n{}", script);

        let output = self
            .command(target, script, false)?
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        let status = output.status.code();

        if status == Some(SSH_ERROR_STATUS) {
            let message = if stderr.trim().is_empty() {
                format!("{} exited with status {}", self.program, SSH_ERROR_STATUS)
            } else {
                stderr.trim().to_string()
            };
            return Err(TransportError::Unreachable {
                target: target.to_string(),
                message,
            });
        }

        tracing::debug!(target = %target, ?status, "Remote script finished");
        Ok(RemoteOutput {
            status,
            stdout,
            stderr,
        })
    }

    async fn run_interactive(
        &self,
        target: &RemoteTarget,
        script: &str,
    ) -> Result<InteractiveExit, TransportError> {
        tracing::debug!(target = %target, "Running interactive remote script:\n{}", script);

        let mut child = self
            .command(target, script, true)?
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        tokio::select! {
            status = child.wait() => {
                let status = status?;
                // stderr belongs to the terminal here, so a remote command that
                // itself exits 255 is also reported as unreachable.
                match status.code() {
                    Some(SSH_ERROR_STATUS) => Err(TransportError::Unreachable {
                        target: target.to_string(),
                        message: format!("{} exited with status {}", self.program, SSH_ERROR_STATUS),
                    }),
                    code => Ok(InteractiveExit::Exited(code)),
                }
            }
            Ok(()) = tokio::signal::ctrl_c() => {
                // Only the local client goes away; the remote helper keeps the session.
                tracing::info!("Interrupted, closing local transport");
                let _ = child.start_kill();
                let _ = child.wait().await;
                Ok(InteractiveExit::Interrupted)
            }
        }
    }
}
