//! persist-ssh CLI
//!
//! Opens a terminal on a remote host inside a dtach session that survives
//! disconnects, installing dtach first when the host lacks it.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use persist_ssh::commands;
use persist_ssh::output::{print_error, print_info, print_warning};
use ps_core::config::default_config_path;
use ps_core::{ensure_config_file, PersistConfig};

#[derive(Parser)]
#[command(name = "persist-ssh")]
#[command(author, version, about = "Persistent remote terminal sessions over ssh")]
struct Cli {
    /// Remote host (any destination ssh accepts, e.g. user@host or a config alias)
    host: String,

    /// Session name (overrides the tmux window name and the default)
    #[arg(short, long)]
    session: Option<String>,

    /// List the sessions stored on the host instead of connecting
    #[arg(short, long)]
    list: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Name the session after the current tmux window
    #[arg(short, long)]
    tmux: bool,

    /// Path to configuration file
    #[arg(long, env = "PERSIST_SSH_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            print_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = Arc::new(load_config(cli.config.as_ref())?);

    if cli.list {
        commands::list_command(config, &cli.host).await
    } else {
        commands::connect_command(config, &cli.host, cli.session.as_deref(), cli.tmux).await
    }
}

/// Load the configuration
///
/// An explicit path must exist. The default path is created with commented
/// defaults on first run; if that fails the built-in defaults are used.
fn load_config(explicit: Option<&PathBuf>) -> Result<PersistConfig> {
    if let Some(path) = explicit {
        tracing::debug!("Using config file {:?}", path);
        return PersistConfig::load(path)
            .with_context(|| format!("Failed to load config from {:?}", path));
    }

    let path = default_config_path();
    tracing::debug!("Using config file {:?}", path);

    match ensure_config_file(&path) {
        Ok(true) => print_info(&format!("Created default configuration at {:?}", path)),
        Ok(false) => {}
        Err(e) => {
            print_warning(&format!("{:#}, using built-in defaults", e));
            return Ok(PersistConfig::default());
        }
    }

    PersistConfig::load(&path).with_context(|| format!("Failed to load config from {:?}", path))
}
