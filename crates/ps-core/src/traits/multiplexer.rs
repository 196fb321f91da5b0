//! Local terminal multiplexer traits

use async_trait::async_trait;

/// Query interface for the local terminal multiplexer
#[async_trait]
pub trait LocalMultiplexer: Send + Sync {
    /// Display name of the active window
    ///
    /// Returns `None` when the multiplexer is not installed, not running,
    /// slow to answer, or reports an empty name. Never fails.
    async fn active_window_name(&self) -> Option<String>;
}
