//! Orchestration error types

use std::fmt;

use ps_core::TransportError;
use ps_protocol::ProtocolError;
use thiserror::Error;

/// Remote step that was running when a transport failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Probe,
    Connect,
    List,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Probe => write!(f, "probe"),
            Step::Connect => write!(f, "connect"),
            Step::List => write!(f, "list"),
        }
    }
}

/// Failures that end an invocation
///
/// Everything else (missing helper, unknown OS, failed install) degrades to
/// a plain shell and is reported through [`crate::RunReport`].
#[derive(Error, Debug)]
pub enum RunError {
    /// The transport could not run a mandatory step
    #[error("{step} failed: {source}")]
    Transport {
        step: Step,
        #[source]
        source: TransportError,
    },

    /// The session name or a remote script is invalid
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The remote listing stopped before its completion marker
    #[error("Session listing was cut short (remote status {status:?})")]
    IncompleteListing { status: Option<i32> },
}

impl RunError {
    pub(crate) fn transport(step: Step) -> impl FnOnce(TransportError) -> RunError {
        move |source| RunError::Transport { step, source }
    }
}
