//! persist-ssh: command-line front end
//!
//! Wires the production `ssh` transport and `tmux` query into the
//! orchestrator and turns its progress events and results into terminal
//! output and an exit code.

pub mod commands;
pub mod output;
