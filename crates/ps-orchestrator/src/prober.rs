//! Remote environment probe

use ps_core::{RemoteTarget, RemoteTransport, TransportError};
use ps_protocol::{parse_probe_output, script};

/// What one probe round trip found on the remote host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentProbe {
    /// The helper binary is on the remote `PATH`
    pub helper_present: bool,
    /// The session directory exists
    pub directory_ready: bool,
    /// Combined stdout and stderr of the probe
    pub raw_output: String,
}

/// Check the helper and prepare the session directory in one round trip
///
/// A missing helper is a successful probe with `helper_present == false`;
/// `Err` means the transport itself failed.
pub async fn probe(
    transport: &dyn RemoteTransport,
    target: &RemoteTarget,
) -> Result<EnvironmentProbe, TransportError> {
    let script = script::probe_script()?;
    let output = transport.run_captured(target, &script).await?;

    let raw_output = output.combined();
    let markers = parse_probe_output(&raw_output);

    if !markers.helper_present && !markers.helper_absent {
        tracing::warn!(target = %target, "Probe output carried no helper marker, assuming it is missing");
    }
    if !markers.directory_ready {
        tracing::warn!(target = %target, "Remote session directory could not be prepared");
    }
    tracing::debug!(
        target = %target,
        helper_present = markers.helper_present,
        directory_ready = markers.directory_ready,
        "Probe finished"
    );

    Ok(EnvironmentProbe {
        helper_present: markers.helper_present,
        directory_ready: markers.directory_ready,
        raw_output,
    })
}
