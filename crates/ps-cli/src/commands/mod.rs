//! CLI command implementations

mod connect;
mod list;

pub use connect::{connect_command, report_event};
pub use list::list_command;
