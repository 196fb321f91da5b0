//! Remote helper bootstrap

use std::fmt;

use ps_core::{InstallCommands, InteractiveExit, RemoteTarget, RemoteTransport, TransportError};
use ps_protocol::os::OS_DETECT_COMMAND;
use ps_protocol::OsFamily;

/// Result of one install attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The install command exited with status zero
    Installed,
    /// The install command ran and failed
    Failed { status: Option<i32> },
    /// The user interrupted the install locally
    Interrupted,
    /// No install command exists for this OS; nothing was run
    UnsupportedOs(OsFamily),
}

/// What happened to the helper before connecting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapStatus {
    /// The probe found the helper
    NotNeeded,
    /// The helper was installed
    Installed(OsFamily),
    /// The install command failed
    Failed { os: OsFamily, status: Option<i32> },
    /// The user cancelled the install
    Cancelled(OsFamily),
    /// The remote OS has no install command
    UnsupportedOs,
    /// The transport failed while installing
    Unavailable(String),
}

impl BootstrapStatus {
    /// A bootstrap was needed and did not succeed
    pub fn required_and_failed(&self) -> bool {
        !matches!(
            self,
            BootstrapStatus::NotNeeded | BootstrapStatus::Installed(_)
        )
    }
}

impl fmt::Display for BootstrapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootstrapStatus::NotNeeded => write!(f, "helper already installed"),
            BootstrapStatus::Installed(os) => write!(f, "helper installed ({})", os),
            BootstrapStatus::Failed { os, status: Some(code) } => {
                write!(f, "install failed on {} (exit status {})", os, code)
            }
            BootstrapStatus::Failed { os, status: None } => {
                write!(f, "install failed on {} (terminated by signal)", os)
            }
            BootstrapStatus::Cancelled(os) => write!(f, "install on {} cancelled by user", os),
            BootstrapStatus::UnsupportedOs => {
                write!(f, "unknown remote OS, manual install required")
            }
            BootstrapStatus::Unavailable(reason) => write!(f, "install could not run: {}", reason),
        }
    }
}

/// Identify the remote OS family
///
/// Never fails: a transport error or a failing command classifies as
/// [`OsFamily::Unknown`].
pub async fn detect_remote_os(transport: &dyn RemoteTransport, target: &RemoteTarget) -> OsFamily {
    match transport.run_captured(target, OS_DETECT_COMMAND).await {
        Ok(output) if output.success() => {
            let os = OsFamily::classify(&output.stdout);
            tracing::debug!(target = %target, os = %os, "Detected remote OS");
            os
        }
        Ok(output) => {
            tracing::warn!(target = %target, status = ?output.status, "OS detection failed");
            OsFamily::Unknown
        }
        Err(e) => {
            tracing::warn!(target = %target, "OS detection failed: {}", e);
            OsFamily::Unknown
        }
    }
}

/// Run the install command for `os` with a terminal allocated
///
/// Install commands may prompt for a sudo password, hence the terminal.
/// There is no retry; the caller decides how to continue.
pub async fn install(
    transport: &dyn RemoteTransport,
    target: &RemoteTarget,
    os: OsFamily,
    commands: &InstallCommands,
) -> Result<InstallOutcome, TransportError> {
    let Some(command) = commands.command_for(os) else {
        tracing::warn!(target = %target, os = %os, "No install command for remote OS");
        return Ok(InstallOutcome::UnsupportedOs(os));
    };

    tracing::info!(target = %target, os = %os, "Installing {}", ps_protocol::HELPER_BINARY);
    match transport.run_interactive(target, command).await? {
        exit if exit.success() => Ok(InstallOutcome::Installed),
        InteractiveExit::Interrupted => {
            tracing::warn!(target = %target, "Install interrupted");
            Ok(InstallOutcome::Interrupted)
        }
        InteractiveExit::Exited(status) => {
            tracing::warn!(target = %target, ?status, "Install command failed");
            Ok(InstallOutcome::Failed { status })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_and_failed() {
        assert!(!BootstrapStatus::NotNeeded.required_and_failed());
        assert!(!BootstrapStatus::Installed(OsFamily::Ubuntu).required_and_failed());
        assert!(BootstrapStatus::UnsupportedOs.required_and_failed());
        assert!(BootstrapStatus::Failed {
            os: OsFamily::Arch,
            status: Some(1)
        }
        .required_and_failed());
        assert!(BootstrapStatus::Unavailable("gone".into()).required_and_failed());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(
            BootstrapStatus::Failed {
                os: OsFamily::Debian,
                status: Some(100)
            }
            .to_string(),
            "install failed on debian (exit status 100)"
        );
        assert_eq!(
            BootstrapStatus::UnsupportedOs.to_string(),
            "unknown remote OS, manual install required"
        );
    }

    #[test]
    fn test_cancelled_display() {
        let status = BootstrapStatus::Cancelled(OsFamily::Ubuntu);
        assert!(status.required_and_failed());
        assert_eq!(status.to_string(), "install on ubuntu cancelled by user");
    }
}
