//! Remote session listing

use ps_core::{RemoteTarget, RemoteTransport};
use ps_protocol::{parse_session_listing, script, SessionName};

use crate::error::{RunError, Step};

/// A session socket found on the remote host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSession {
    /// Session name (socket file name)
    pub name: String,
    /// Socket path as used by the connect script
    pub socket_path: String,
}

impl RemoteSession {
    fn new(name: String) -> Self {
        let socket_path = match SessionName::new(name.as_str()) {
            Ok(session) => script::socket_path(&session),
            Err(_) => format!("{}/{}", script::SESSION_DIR, name),
        };
        Self { name, socket_path }
    }
}

/// List the sessions stored on the remote host, sorted by name
pub async fn list_sessions(
    transport: &dyn RemoteTransport,
    target: &RemoteTarget,
) -> Result<Vec<RemoteSession>, RunError> {
    let script = script::list_script()?;
    let output = transport
        .run_captured(target, &script)
        .await
        .map_err(RunError::transport(Step::List))?;

    let listing = parse_session_listing(&output.stdout);
    if !listing.complete {
        return Err(RunError::IncompleteListing {
            status: output.status,
        });
    }

    tracing::debug!(target = %target, count = listing.sessions.len(), "Listed sessions");
    Ok(listing.sessions.into_iter().map(RemoteSession::new).collect())
}
