//! Connect command implementation

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use ps_core::{InteractiveExit, PersistConfig, SshTransport, TmuxMultiplexer};
use ps_orchestrator::{BootstrapStatus, ConnectRequest, Coordinator, RunError, RunEvent, RunReport};
use ps_protocol::{OsFamily, DETACH_KEY_LABEL, HELPER_BINARY};

use crate::output::{print_error, print_info, print_success, print_warning};

/// Execute the connect command
///
/// Resolves the session, bootstraps the helper if needed, and blocks for the
/// whole interactive session.
pub async fn connect_command(
    config: Arc<PersistConfig>,
    host: &str,
    session: Option<&str>,
    force_tmux: bool,
) -> Result<ExitCode> {
    let transport = SshTransport::from_config(&config);
    let tmux = TmuxMultiplexer::new(config.tmux_query_timeout);
    let coordinator = Coordinator::new(transport, tmux, config);

    let mut request = ConnectRequest::new(host).with_forced_tmux(force_tmux);
    if let Some(session) = session {
        request = request.with_session(session);
    }

    match coordinator.run(&request, &mut report_event).await {
        Ok(report) => {
            if report.exit == InteractiveExit::Interrupted {
                print_info("Disconnected.");
            }
            if report.bootstrap.required_and_failed() {
                print_warning(&format!(
                    "{} is still missing on {}, the session did not persist",
                    HELPER_BINARY, host
                ));
            }
            Ok(ExitCode::from(exit_status(&report)))
        }
        Err(RunError::Transport { step, source }) => {
            print_error(&format!("Could not reach {} during {}: {}", host, step, source));
            Ok(ExitCode::FAILURE)
        }
        Err(e) => {
            print_error(&e.to_string());
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Process exit status for a completed run
///
/// Detaching, interrupting and the remote shell's own exit status all count
/// as success. Only a bootstrap that was needed and did not succeed fails.
pub fn exit_status(report: &RunReport) -> u8 {
    if report.bootstrap.required_and_failed() {
        1
    } else {
        0
    }
}

/// Print a progress event for the user
pub fn report_event(event: &RunEvent) {
    match event {
        RunEvent::SessionResolved(resolved) => {
            tracing::debug!(
                session = %resolved.name,
                source = %resolved.source,
                window = ?resolved.tmux_window,
                "Session selected"
            );
        }
        RunEvent::HelperMissing => {
            print_warning(&format!("{} is not installed on the remote host", HELPER_BINARY));
        }
        RunEvent::OsDetected(OsFamily::Unknown) => {
            print_warning(&format!(
                "Could not identify the remote OS, install {} manually",
                HELPER_BINARY
            ));
        }
        RunEvent::OsDetected(os) => {
            print_info(&format!("Remote OS: {}", os));
        }
        RunEvent::Installing { command, .. } => {
            print_info(&format!("Installing {}: {}", HELPER_BINARY, command));
            print_info("You may be asked for your password");
        }
        RunEvent::BootstrapFinished(BootstrapStatus::Installed(_)) => {
            print_success(&format!("{} installed", HELPER_BINARY));
        }
        RunEvent::BootstrapFinished(BootstrapStatus::NotNeeded) => {}
        RunEvent::BootstrapFinished(status) => {
            print_warning(&format!("Bootstrap did not complete: {}", status));
        }
        RunEvent::Connecting {
            session,
            helper_present: true,
        } => {
            print_info(&format!(
                "Attaching to session '{}' (detach with {})",
                session, DETACH_KEY_LABEL
            ));
        }
        RunEvent::Connecting {
            helper_present: false,
            ..
        } => {
            print_warning("Starting a plain shell, this session will not persist");
        }
    }
}
