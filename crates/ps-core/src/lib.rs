//! ps-core: Core abstractions and configuration for persist-ssh
//!
//! This crate provides the configuration model, the error taxonomy, the
//! collaborator traits used by the orchestrator (remote transport and local
//! terminal multiplexer) and their production implementations backed by the
//! system `ssh` and `tmux` binaries.

pub mod config;
pub mod error;
pub mod setup;
pub mod ssh;
pub mod tmux;
pub mod traits;
pub mod types;

pub use config::{InstallCommands, PersistConfig};
pub use error::{ConfigError, TransportError};
pub use setup::ensure_config_file;
pub use ssh::SshTransport;
pub use tmux::TmuxMultiplexer;
pub use traits::{LocalMultiplexer, RemoteTransport};
pub use types::{InteractiveExit, RemoteOutput, RemoteTarget};
