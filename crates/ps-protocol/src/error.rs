//! Protocol error types

use thiserror::Error;

/// Errors that can occur while building or interpreting remote scripts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Session name cannot be used as a socket file name
    #[error("Invalid session name {name:?}: {reason}")]
    InvalidSessionName { name: String, reason: &'static str },

    /// OS family tag not in the known set
    #[error("Unknown OS family: {0}")]
    UnknownOsFamily(String),

    /// Template references a placeholder that was not supplied
    #[error("Template '{template}' has no value for placeholder @{placeholder}@")]
    UnboundPlaceholder {
        template: &'static str,
        placeholder: String,
    },

    /// Script cannot be quoted for the remote shell
    #[error("Script '{0}' contains a NUL byte and cannot be quoted")]
    UnquotableScript(String),

    /// Template contains an '@' that never closes
    #[error("Template '{template}' has an unterminated placeholder")]
    UnterminatedPlaceholder { template: &'static str },
}
