//! Per-OS install command tables

use ps_protocol::OsFamily;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Shell command that installs a package on each known OS family
///
/// One field per family, so a table that forgets a family (or names one that
/// does not exist) fails to parse instead of silently missing at install
/// time. `OsFamily::Unknown` deliberately has no entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstallCommands {
    pub ubuntu: String,
    pub debian: String,
    pub redhat: String,
    pub arch: String,
    pub alpine: String,
}

impl InstallCommands {
    /// Built-in commands for installing `dtach`
    pub fn dtach() -> Self {
        Self::for_package("dtach")
    }

    /// Built-in commands for installing `mosh`
    pub fn mosh() -> Self {
        Self::for_package("mosh")
    }

    fn for_package(package: &str) -> Self {
        Self {
            ubuntu: format!("sudo apt update && sudo apt install -y {}", package),
            debian: format!("sudo apt update && sudo apt install -y {}", package),
            redhat: format!(
                "sudo yum install -y {} || sudo dnf install -y {}",
                package, package
            ),
            arch: format!("sudo pacman -S {}", package),
            alpine: format!("sudo apk add {}", package),
        }
    }

    /// Install command for an OS family, `None` for `Unknown`
    pub fn command_for(&self, os: OsFamily) -> Option<&str> {
        match os {
            OsFamily::Ubuntu => Some(&self.ubuntu),
            OsFamily::Debian => Some(&self.debian),
            OsFamily::RedHat => Some(&self.redhat),
            OsFamily::Arch => Some(&self.arch),
            OsFamily::Alpine => Some(&self.alpine),
            OsFamily::Unknown => None,
        }
    }

    /// Reject blank commands
    pub fn validate(&self, table: &str) -> Result<(), ConfigError> {
        for os in OsFamily::ALL {
            if let Some(command) = self.command_for(os) {
                if command.trim().is_empty() {
                    return Err(ConfigError::Invalid(format!(
                        "{}.{} must not be empty",
                        table, os
                    )));
                }
            }
        }
        Ok(())
    }
}
