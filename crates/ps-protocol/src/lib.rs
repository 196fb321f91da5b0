//! ps-protocol: Remote script protocol for persist-ssh
//!
//! This crate defines the small shell protocol spoken with the remote host:
//! the session identifier, the OS family classifier, the sentinel markers
//! emitted by remote scripts, and the script templates themselves. Nothing
//! here performs I/O, so building commands and parsing their output can be
//! tested independently.

pub mod error;
pub mod marker;
pub mod os;
pub mod script;
pub mod session;

pub use error::ProtocolError;
pub use marker::{parse_probe_output, parse_session_listing, ProbeMarkers, SessionListing};
pub use os::OsFamily;
pub use script::{sh_command, ScriptTemplate, DETACH_KEY, DETACH_KEY_LABEL, HELPER_BINARY};
pub use session::SessionName;
