//! Session identifier type

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ProtocolError;

/// Name of a persistent remote session
///
/// The name doubles as the socket file name inside the remote session
/// directory, so it must be usable as a single path component. Once
/// constructed it is never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionName(String);

impl SessionName {
    /// Validate and wrap a session name
    ///
    /// The name is kept exactly as given. Path separators, NUL and other
    /// control characters are rejected, as are the empty string and the `.`
    /// and `..` directory entries.
    pub fn new(name: impl Into<String>) -> Result<Self, ProtocolError> {
        let name = name.into();

        let reason = if name.is_empty() {
            Some("name is empty")
        } else if name == "." || name == ".." {
            Some("name is a directory entry")
        } else if name.contains('/') {
            Some("name contains a path separator")
        } else if name.chars().any(char::is_control) {
            Some("name contains a control character")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(ProtocolError::InvalidSessionName { name, reason }),
            None => Ok(Self(name)),
        }
    }

    /// Get the raw name
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The name quoted for safe interpolation into a POSIX shell script
    pub fn shell_quoted(&self) -> String {
        // Control characters (including NUL) were rejected in `new`, so quoting cannot fail.
        shlex::try_quote(&self.0)
            .map(|q| q.into_owned())
            .unwrap_or_else(|_| format!("'{}'", self.0.replace('\'', r"'\''")))
    }
}

impl fmt::Display for SessionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SessionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for SessionName {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for SessionName {
    type Error = ProtocolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SessionName> for String {
    fn from(name: SessionName) -> Self {
        name.0
    }
}
