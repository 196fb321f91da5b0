//! Session connector

use ps_core::{InteractiveExit, RemoteTarget, RemoteTransport, TransportError};
use ps_protocol::{script, SessionName};

/// Attach to (or create) `session` on the remote host
///
/// The remote script re-checks the session directory and the helper, since
/// the host may have changed since the probe, and falls back to a plain
/// login shell when the helper is missing. Blocks for the whole interactive
/// session. Detaching or interrupting leaves the remote session running.
pub async fn connect(
    transport: &dyn RemoteTransport,
    target: &RemoteTarget,
    session: &SessionName,
) -> Result<InteractiveExit, TransportError> {
    let script = script::connect_script(session)?;
    tracing::info!(
        target = %target,
        session = %session,
        socket = %script::socket_path(session),
        "Attaching to session"
    );

    let exit = transport.run_interactive(target, &script).await?;
    tracing::debug!(target = %target, session = %session, exit = %exit, "Session ended");
    Ok(exit)
}
