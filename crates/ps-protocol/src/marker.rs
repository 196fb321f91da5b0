//! Sentinel markers emitted by remote scripts
//!
//! Remote scripts print these tokens on lines of their own so that their
//! results can be recovered from output that may also contain login banners,
//! MOTD text or shell noise.

/// Printed by the probe when the helper binary is on the remote `PATH`
pub const HELPER_PRESENT: &str = "__PERSIST_SSH_HELPER_PRESENT__";

/// Printed by the probe when the helper binary is missing
pub const HELPER_ABSENT: &str = "__PERSIST_SSH_HELPER_ABSENT__";

/// Printed by the probe once the session directory exists
pub const DIR_READY: &str = "__PERSIST_SSH_DIR_READY__";

/// Prefix of each line of the session listing
pub const SESSION_ENTRY: &str = "__PERSIST_SSH_SESSION__";

/// Printed when the session listing completed
pub const LIST_DONE: &str = "__PERSIST_SSH_LIST_DONE__";

/// Markers recovered from probe output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeMarkers {
    /// The helper was found on the remote `PATH`
    pub helper_present: bool,
    /// The probe explicitly reported the helper as missing
    pub helper_absent: bool,
    /// The session directory step completed
    pub directory_ready: bool,
}

/// Parse the combined output of the environment probe
///
/// A marker only counts when it is alone on its line. Missing markers parse
/// as `false`; a presence marker wins over an absence marker.
pub fn parse_probe_output(output: &str) -> ProbeMarkers {
    let mut markers = ProbeMarkers::default();

    for line in output.lines().map(str::trim) {
        match line {
            HELPER_PRESENT => markers.helper_present = true,
            HELPER_ABSENT => markers.helper_absent = true,
            DIR_READY => markers.directory_ready = true,
            _ => {}
        }
    }

    if markers.helper_present && markers.helper_absent {
        tracing::warn!("Probe reported the helper both present and absent; treating as present");
        markers.helper_absent = false;
    }

    markers
}

/// Session names recovered from the listing script
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionListing {
    /// Sorted, de-duplicated socket names
    pub sessions: Vec<String>,
    /// Whether the completion marker was seen
    pub complete: bool,
}

/// Parse the output of the session listing script
pub fn parse_session_listing(output: &str) -> SessionListing {
    let mut listing = SessionListing::default();

    for line in output.lines().map(str::trim) {
        if line == LIST_DONE {
            listing.complete = true;
        } else if let Some(rest) = line.strip_prefix(SESSION_ENTRY) {
            let name = rest.trim();
            if !name.is_empty() {
                listing.sessions.push(name.to_string());
            }
        }
    }

    listing.sessions.sort();
    listing.sessions.dedup();
    listing
}
