//! Remote OS family classification

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ProtocolError;

/// Remote command whose output feeds [`OsFamily::classify`]
pub const OS_DETECT_COMMAND: &str = "cat /etc/os-release 2>/dev/null || uname";

/// Operating system family of a remote host
///
/// Drives the choice of install command when the helper is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    Ubuntu,
    Debian,
    RedHat,
    Arch,
    Alpine,
    Unknown,
}

impl OsFamily {
    /// Every family, in classification priority order
    pub const ALL: [OsFamily; 6] = [
        OsFamily::Ubuntu,
        OsFamily::Debian,
        OsFamily::RedHat,
        OsFamily::Arch,
        OsFamily::Alpine,
        OsFamily::Unknown,
    ];

    /// Classify system identification text (`/etc/os-release` or `uname`)
    ///
    /// Matching is case-insensitive substring containment, checked in a
    /// fixed order so text mentioning several distributions (e.g. Ubuntu's
    /// `ID_LIKE=debian`) always lands on the first one.
    pub fn classify(text: &str) -> Self {
        let text = text.to_lowercase();

        if text.contains("ubuntu") {
            OsFamily::Ubuntu
        } else if text.contains("debian") {
            OsFamily::Debian
        } else if ["rhel", "centos", "fedora", "red hat"]
            .iter()
            .any(|needle| text.contains(needle))
        {
            OsFamily::RedHat
        } else if text.contains("arch") {
            OsFamily::Arch
        } else if text.contains("alpine") {
            OsFamily::Alpine
        } else {
            OsFamily::Unknown
        }
    }

    /// Lower-case tag, as used for configuration keys
    pub fn as_str(&self) -> &'static str {
        match self {
            OsFamily::Ubuntu => "ubuntu",
            OsFamily::Debian => "debian",
            OsFamily::RedHat => "redhat",
            OsFamily::Arch => "arch",
            OsFamily::Alpine => "alpine",
            OsFamily::Unknown => "unknown",
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OsFamily {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OsFamily::ALL
            .into_iter()
            .find(|family| family.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ProtocolError::UnknownOsFamily(s.to_string()))
    }
}
