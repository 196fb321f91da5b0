//! Configuration management for persist-ssh

mod install;
mod persist;
pub mod serde_utils;

pub use install::InstallCommands;
pub use persist::PersistConfig;

use crate::error::ConfigError;
use std::path::{Path, PathBuf};

/// File name of the configuration file
pub const CONFIG_FILE_NAME: &str = "persist-ssh.toml";

/// Get the default configuration directory (`~/.config`)
pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
}

/// Get the default configuration file path
pub fn default_config_path() -> PathBuf {
    default_config_dir().join(CONFIG_FILE_NAME)
}

/// Load configuration from a file
pub fn load_config<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Invalid(format!("Failed to read config: {}", e)))?;

    let config: T = toml::from_str(&content)?;
    Ok(config)
}
