//! First-run setup for persist-ssh
//!
//! Writes a commented configuration file so users can discover the
//! available settings.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::PersistConfig;

/// Create the configuration file at `path` if it does not exist
///
/// Returns `true` when a new file was written. The generated file parses to
/// [`PersistConfig::default`].
pub fn ensure_config_file(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }

    fs::write(path, generate_default_config())
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    tracing::info!("Created default configuration at {:?}", path);
    Ok(true)
}

/// Generate default configuration content
pub fn generate_default_config() -> String {
    let defaults = PersistConfig::default();
    let dtach = &defaults.dtach_install_command;
    let mosh = &defaults.mosh_install_command;

    format!(
        r#"# persist-ssh configuration

# Use current tmux window name as session name
session_from_tmux_pane = {from_tmux}

# Default session name when not in tmux
default_session_name = "{default_name}"

# Seconds to wait for tmux to report the window name
tmux_query_timeout = {timeout}

# Transport binary and extra arguments placed before the host
ssh_program = "{ssh}"
ssh_options = []

# Commands to install dtach on different systems
[dtach_install_command]
ubuntu = "{d_ubuntu}"
debian = "{d_debian}"
redhat = "{d_redhat}"
arch = "{d_arch}"
alpine = "{d_alpine}"

# Commands to install mosh on different systems (kept for older configs; sessions run over ssh)
[mosh_install_command]
ubuntu = "{m_ubuntu}"
debian = "{m_debian}"
redhat = "{m_redhat}"
arch = "{m_arch}"
alpine = "{m_alpine}"
"#,
        from_tmux = defaults.session_from_tmux_pane,
        default_name = defaults.default_session_name,
        timeout = defaults.tmux_query_timeout.as_secs(),
        ssh = defaults.ssh_program,
        d_ubuntu = dtach.ubuntu,
        d_debian = dtach.debian,
        d_redhat = dtach.redhat,
        d_arch = dtach.arch,
        d_alpine = dtach.alpine,
        m_ubuntu = mosh.ubuntu,
        m_debian = mosh.debian,
        m_redhat = mosh.redhat,
        m_arch = mosh.arch,
        m_alpine = mosh.alpine,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_matches_defaults() {
        let config = PersistConfig::from_toml(&generate_default_config()).unwrap();
        assert_eq!(config, PersistConfig::default());
    }

    #[test]
    fn test_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("persist-ssh.toml");

        assert!(ensure_config_file(&path).unwrap());
        assert!(path.exists());
        assert!(PersistConfig::load(&path).is_ok());
    }

    #[test]
    fn test_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("persist-ssh.toml");
        fs::write(&path, "default_session_name = \"mine\"\n").unwrap();

        assert!(!ensure_config_file(&path).unwrap());
        let config = PersistConfig::load(&path).unwrap();
        assert_eq!(config.default_session_name, "mine");
    }
}
