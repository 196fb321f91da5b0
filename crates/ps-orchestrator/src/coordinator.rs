//! Invocation coordinator
//!
//! Runs the steps of one invocation strictly in order: resolve the session
//! name, probe the remote host, bootstrap the helper if it is missing, then
//! connect. Only a transport failure during the probe or the connect step
//! ends the run early; every other problem degrades to a plain shell.

use std::sync::Arc;

use ps_core::{InteractiveExit, LocalMultiplexer, PersistConfig, RemoteTarget, RemoteTransport};
use ps_protocol::OsFamily;

use crate::bootstrap::{self, BootstrapStatus, InstallOutcome};
use crate::connector;
use crate::error::{RunError, Step};
use crate::listing::{self, RemoteSession};
use crate::prober::{self, EnvironmentProbe};
use crate::resolver::{ResolvedSession, SessionResolver};

/// Parameters of one connect invocation
#[derive(Debug, Clone)]
pub struct ConnectRequest {
    /// Host to connect to
    pub target: RemoteTarget,
    /// Explicit session name
    pub session_override: Option<String>,
    /// Use the tmux window name even if the configuration disables it
    pub force_tmux: bool,
}

impl ConnectRequest {
    /// Request with no override and no forced tmux lookup
    pub fn new(target: impl Into<RemoteTarget>) -> Self {
        Self {
            target: target.into(),
            session_override: None,
            force_tmux: false,
        }
    }

    /// Set the session override
    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session_override = Some(session.into());
        self
    }

    /// Force the tmux lookup
    pub fn with_forced_tmux(mut self, force: bool) -> Self {
        self.force_tmux = force;
        self
    }
}

/// Progress notifications emitted while a run proceeds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    /// The session name is known
    SessionResolved(ResolvedSession),
    /// The probe did not find the helper
    HelperMissing,
    /// OS detection finished
    OsDetected(OsFamily),
    /// An install command is about to run
    Installing { os: OsFamily, command: String },
    /// The bootstrap step finished
    BootstrapFinished(BootstrapStatus),
    /// The interactive session is about to start
    Connecting { session: String, helper_present: bool },
}

/// Summary of a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// The session that was attached to
    pub session: ResolvedSession,
    /// Probe result
    pub probe: EnvironmentProbe,
    /// Bootstrap result
    pub bootstrap: BootstrapStatus,
    /// How the interactive session ended
    pub exit: InteractiveExit,
}

/// Sequences the orchestration steps over injected collaborators
pub struct Coordinator<T, M> {
    transport: T,
    multiplexer: M,
    config: Arc<PersistConfig>,
    resolver: SessionResolver,
}

impl<T, M> Coordinator<T, M>
where
    T: RemoteTransport,
    M: LocalMultiplexer,
{
    /// Create a coordinator
    pub fn new(transport: T, multiplexer: M, config: Arc<PersistConfig>) -> Self {
        let resolver = SessionResolver::new(Arc::clone(&config));
        Self {
            transport,
            multiplexer,
            config,
            resolver,
        }
    }

    /// The transport in use
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Resolve the session name for a request
    pub async fn resolve_session(
        &self,
        request: &ConnectRequest,
    ) -> Result<ResolvedSession, RunError> {
        let resolved = self
            .resolver
            .resolve(
                request.session_override.as_deref(),
                request.force_tmux,
                &self.multiplexer,
            )
            .await?;
        tracing::debug!(
            session = %resolved.name,
            source = %resolved.source,
            "Resolved session name"
        );
        Ok(resolved)
    }

    /// Install the helper after a negative probe
    ///
    /// Never fails: every problem is folded into the returned status.
    pub async fn bootstrap(
        &self,
        target: &RemoteTarget,
        on_event: &mut (dyn FnMut(&RunEvent) + Send),
    ) -> BootstrapStatus {
        let os = bootstrap::detect_remote_os(&self.transport, target).await;
        on_event(&RunEvent::OsDetected(os));

        let commands = &self.config.dtach_install_command;
        if let Some(command) = commands.command_for(os) {
            on_event(&RunEvent::Installing {
                os,
                command: command.to_string(),
            });
        }

        match bootstrap::install(&self.transport, target, os, commands).await {
            Ok(InstallOutcome::Installed) => BootstrapStatus::Installed(os),
            Ok(InstallOutcome::Failed { status }) => BootstrapStatus::Failed { os, status },
            Ok(InstallOutcome::Interrupted) => BootstrapStatus::Cancelled(os),
            Ok(InstallOutcome::UnsupportedOs(_)) => BootstrapStatus::UnsupportedOs,
            Err(e) => {
                tracing::warn!(target = %target, "Install could not run: {}", e);
                BootstrapStatus::Unavailable(e.to_string())
            }
        }
    }

    /// Run a full connect invocation
    pub async fn run(
        &self,
        request: &ConnectRequest,
        on_event: &mut (dyn FnMut(&RunEvent) + Send),
    ) -> Result<RunReport, RunError> {
        let target = &request.target;

        let session = self.resolve_session(request).await?;
        on_event(&RunEvent::SessionResolved(session.clone()));

        let probe = prober::probe(&self.transport, target)
            .await
            .map_err(RunError::transport(Step::Probe))?;

        let bootstrap = if probe.helper_present {
            BootstrapStatus::NotNeeded
        } else {
            on_event(&RunEvent::HelperMissing);
            let status = self.bootstrap(target, on_event).await;
            on_event(&RunEvent::BootstrapFinished(status.clone()));
            status
        };

        on_event(&RunEvent::Connecting {
            session: session.name.to_string(),
            helper_present: probe.helper_present || matches!(bootstrap, BootstrapStatus::Installed(_)),
        });

        let exit = connector::connect(&self.transport, target, &session.name)
            .await
            .map_err(RunError::transport(Step::Connect))?;

        Ok(RunReport {
            session,
            probe,
            bootstrap,
            exit,
        })
    }

    /// List the sessions on a host
    pub async fn list(&self, target: &RemoteTarget) -> Result<Vec<RemoteSession>, RunError> {
        listing::list_sessions(&self.transport, target).await
    }
}
