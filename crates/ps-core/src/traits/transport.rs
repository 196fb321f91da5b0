//! Remote transport traits

use async_trait::async_trait;

use crate::error::TransportError;
use crate::types::{InteractiveExit, RemoteOutput, RemoteTarget};

/// Abstraction over remote command execution
///
/// Scripts are POSIX `sh` source; implementations decide how to hand them to
/// the remote side. Both methods return `Err` only when the transport itself
/// failed. A remote command that ran and exited non-zero is a normal result.
#[async_trait]
pub trait RemoteTransport: Send + Sync {
    /// Run a script without a terminal, capturing its output
    async fn run_captured(
        &self,
        target: &RemoteTarget,
        script: &str,
    ) -> Result<RemoteOutput, TransportError>;

    /// Run a script with an allocated terminal attached to local stdio
    ///
    /// Blocks until the remote side exits or the local user interrupts. An
    /// interrupt ends the local transport process only.
    async fn run_interactive(
        &self,
        target: &RemoteTarget,
        script: &str,
    ) -> Result<InteractiveExit, TransportError>;
}
