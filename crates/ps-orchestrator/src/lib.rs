//! ps-orchestrator: Session continuity orchestration
//!
//! Decides which session to attach to, checks (and if needed bootstraps) the
//! remote helper, and attaches to or creates the session. Each step talks to
//! the outside world only through the `ps-core` collaborator traits, so the
//! whole flow can run against in-memory fakes.

pub mod bootstrap;
pub mod connector;
pub mod coordinator;
pub mod error;
pub mod listing;
pub mod prober;
pub mod resolver;

pub use bootstrap::{BootstrapStatus, InstallOutcome};
pub use coordinator::{ConnectRequest, Coordinator, RunEvent, RunReport};
pub use error::{RunError, Step};
pub use listing::RemoteSession;
pub use prober::EnvironmentProbe;
pub use resolver::{ResolvedSession, SessionResolver, SessionSource};
