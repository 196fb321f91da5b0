//! Terminal output helpers
//!
//! Coloured status lines and the session table. Status lines are separate
//! from `tracing` logs, which only appear with `--debug` or `RUST_LOG`.

use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use tabled::{settings::Style, Table, Tabled};

use ps_orchestrator::RemoteSession;

/// Format remote sessions as a table
///
/// Returns "No sessions" for an empty slice.
pub fn format_sessions(sessions: &[RemoteSession]) -> String {
    if sessions.is_empty() {
        return "No sessions".to_string();
    }

    #[derive(Tabled)]
    struct SessionRow {
        #[tabled(rename = "SESSION")]
        name: String,
        #[tabled(rename = "SOCKET")]
        socket: String,
    }

    let rows: Vec<SessionRow> = sessions
        .iter()
        .map(|s| SessionRow {
            name: s.name.clone(),
            socket: s.socket_path.clone(),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

fn print_tagged(mut out: impl std::io::Write, color: Color, tag: &str, msg: &str) {
    let _ = crossterm::execute!(
        out,
        SetForegroundColor(color),
        Print(tag),
        ResetColor,
        Print(msg),
        Print("\n")
    );
}

/// Print a green success line to stderr
pub fn print_success(msg: &str) {
    print_tagged(std::io::stderr(), Color::Green, "✓ ", msg);
}

/// Print a red error line to stderr
pub fn print_error(msg: &str) {
    print_tagged(std::io::stderr(), Color::Red, "✗ ", msg);
}

/// Print a yellow warning line to stderr
pub fn print_warning(msg: &str) {
    print_tagged(std::io::stderr(), Color::Yellow, "⚠ ", msg);
}

/// Print a cyan info line to stderr
///
/// Everything goes to stderr so stdout stays clean for `--list` output.
pub fn print_info(msg: &str) {
    print_tagged(std::io::stderr(), Color::Cyan, "ℹ ", msg);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_empty() {
        assert_eq!(format_sessions(&[]), "No sessions");
    }

    #[test]
    fn test_format_sessions_table() {
        let sessions = vec![
            RemoteSession {
                name: "dev".to_string(),
                socket_path: "\"$HOME\"/.dtach/dev".to_string(),
            },
            RemoteSession {
                name: "work".to_string(),
                socket_path: "\"$HOME\"/.dtach/work".to_string(),
            },
        ];
        let table = format_sessions(&sessions);
        assert!(table.contains("SESSION"));
        assert!(table.contains("dev"));
        assert!(table.contains("work"));
        assert!(table.find("dev") < table.find("work"));
    }
}
