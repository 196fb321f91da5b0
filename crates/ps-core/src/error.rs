//! Core error types for persist-ssh

use ps_protocol::ProtocolError;
use std::path::PathBuf;
use thiserror::Error;

/// The remote-execution primitive could not run
///
/// A remote command that ran and exited non-zero is not a transport error;
/// it is reported through [`crate::types::RemoteOutput::status`].
#[derive(Error, Debug)]
pub enum TransportError {
    /// The transport binary could not be started
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The transport started but could not reach or authenticate to the host
    #[error("Could not reach {target}: {message}")]
    Unreachable { target: String, message: String },

    /// Remote script could not be built
    #[error("Invalid remote script: {0}")]
    Script(#[from] ProtocolError),

    /// I/O error while talking to the transport process
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// Invalid configuration
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(String),
}
