//! List command implementation

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use ps_core::{PersistConfig, RemoteTarget, SshTransport, TmuxMultiplexer};
use ps_orchestrator::Coordinator;

use crate::output::{format_sessions, print_error};

/// Execute the list command
pub async fn list_command(config: Arc<PersistConfig>, host: &str) -> Result<ExitCode> {
    let transport = SshTransport::from_config(&config);
    let tmux = TmuxMultiplexer::new(config.tmux_query_timeout);
    let coordinator = Coordinator::new(transport, tmux, config);

    let sessions = match coordinator.list(&RemoteTarget::new(host)).await {
        Ok(s) => s,
        Err(e) => {
            print_error(&format!("Could not list sessions: {}", e));
            return Ok(ExitCode::FAILURE);
        }
    };

    println!("Sessions on {}:", host);
    println!("{}", format_sessions(&sessions));
    Ok(ExitCode::SUCCESS)
}
