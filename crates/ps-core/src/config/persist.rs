//! persist-ssh configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::serde_utils::duration_secs;
use super::InstallCommands;
use crate::error::ConfigError;

/// Configuration for one persist-ssh invocation
///
/// Built once, validated, and then shared read-only. Every key is optional in
/// the TOML file; missing keys take the values of [`PersistConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistConfig {
    /// Derive the session name from the current tmux window
    pub session_from_tmux_pane: bool,

    /// Session name used when no override or tmux name is available
    pub default_session_name: String,

    /// Upper bound on the local tmux query
    #[serde(with = "duration_secs")]
    pub tmux_query_timeout: Duration,

    /// Transport binary
    pub ssh_program: String,

    /// Extra arguments passed to the transport before the target
    pub ssh_options: Vec<String>,

    /// Commands installing the session helper, per OS family
    pub dtach_install_command: InstallCommands,

    /// Commands installing mosh, per OS family
    ///
    /// Parsed so existing configuration files keep loading; the interactive
    /// session always runs over ssh.
    pub mosh_install_command: InstallCommands,
}

impl Default for PersistConfig {
    fn default() -> Self {
        Self {
            session_from_tmux_pane: true,
            default_session_name: "main".to_string(),
            tmux_query_timeout: Duration::from_secs(2),
            ssh_program: "ssh".to_string(),
            ssh_options: Vec::new(),
            dtach_install_command: InstallCommands::dtach(),
            mosh_install_command: InstallCommands::mosh(),
        }
    }
}

impl PersistConfig {
    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: PersistConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate the configuration file at `path`
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config: PersistConfig = super::load_config(path)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Check invariants serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_session_name.trim().is_empty() {
            return Err(ConfigError::MissingField("default_session_name".to_string()));
        }
        if ps_protocol::SessionName::new(self.default_session_name.as_str()).is_err() {
            return Err(ConfigError::Invalid(format!(
                "default_session_name {:?} is not a valid session name",
                self.default_session_name
            )));
        }
        if self.ssh_program.trim().is_empty() {
            return Err(ConfigError::MissingField("ssh_program".to_string()));
        }
        self.dtach_install_command.validate("dtach_install_command")?;
        self.mosh_install_command.validate("mosh_install_command")?;
        Ok(())
    }
}
