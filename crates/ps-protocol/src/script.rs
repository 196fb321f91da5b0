//! Remote script templates
//!
//! Every remote command is a POSIX `sh` script kept as data: a fixed body
//! with `@name@` substitution points. Values are inserted verbatim, so
//! callers pass already shell-safe fragments (see [`SessionName::shell_quoted`]).

use crate::error::ProtocolError;
use crate::marker::{DIR_READY, HELPER_ABSENT, HELPER_PRESENT, LIST_DONE, SESSION_ENTRY};
use crate::session::SessionName;

/// The remote session persistence helper
pub const HELPER_BINARY: &str = "dtach";

/// Detach key passed to the helper (Ctrl-\)
pub const DETACH_KEY: &str = r"^\";

/// Human-readable form of [`DETACH_KEY`]
pub const DETACH_KEY_LABEL: &str = r"Ctrl+\";

/// Session directory on the remote host, as a shell word
///
/// `$HOME` is quoted so home directories containing spaces still work.
pub const SESSION_DIR: &str = r#""$HOME"/.dtach"#;

/// A shell script with named substitution points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptTemplate {
    name: &'static str,
    body: &'static str,
}

/// Checks the helper and prepares the session directory.
pub const PROBE: ScriptTemplate = ScriptTemplate::new(
    "probe",
    r#"if command -v @helper@ >/dev/null 2>&1; then echo @present@; else echo @absent@; fi
mkdir -p @dir@ && chmod 700 @dir@ 2>/dev/null
[ -d @dir@ ] && echo @ready@
"#,
);

/// Attaches to (or creates) a session, falling back to a plain login shell.
pub const CONNECT: ScriptTemplate = ScriptTemplate::new(
    "connect",
    r#"mkdir -p @dir@ && chmod 700 @dir@ 2>/dev/null
if command -v @helper@ >/dev/null 2>&1; then
  exec @helper@ -A @socket@ -e '@detach@' -r winch -z "${SHELL:-/bin/sh}" -l
fi
echo "persist-ssh: @helper@ not found on remote host, starting a plain shell (this session will not persist)" >&2
exec "${SHELL:-/bin/sh}" -l
"#,
);

/// Lists the sockets in the session directory.
pub const LIST: ScriptTemplate = ScriptTemplate::new(
    "list",
    r#"for f in @dir@/*; do
  [ -S "$f" ] && echo "@entry@ ${f##*/}"
done
echo @done@
"#,
);

impl ScriptTemplate {
    /// Create a template from a name (used in errors and logs) and a body
    pub const fn new(name: &'static str, body: &'static str) -> Self {
        Self { name, body }
    }

    /// Substitute every `@name@` placeholder
    ///
    /// Fails if the body references a placeholder missing from `values`.
    /// Unused values are ignored.
    pub fn render(&self, values: &[(&str, &str)]) -> Result<String, ProtocolError> {
        let mut out = String::with_capacity(self.body.len());
        let mut rest = self.body;

        while let Some(start) = rest.find('@') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let end = after
                .find('@')
                .ok_or(ProtocolError::UnterminatedPlaceholder {
                    template: self.name,
                })?;
            let key = &after[..end];

            let value = values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| *value)
                .ok_or_else(|| ProtocolError::UnboundPlaceholder {
                    template: self.name,
                    placeholder: key.to_string(),
                })?;

            out.push_str(value);
            rest = &after[end + 1..];
        }

        out.push_str(rest);
        Ok(out)
    }
}

/// Socket path of a session on the remote host, as a shell word
///
/// Pure function of the name: the same session always maps to the same path.
pub fn socket_path(session: &SessionName) -> String {
    format!("{}/{}", SESSION_DIR, session.shell_quoted())
}

/// Wrap a script so the remote login shell hands it to `sh`
///
/// The remote account may use any login shell; the scripts only assume POSIX
/// `sh`.
pub fn sh_command(script: &str) -> Result<String, ProtocolError> {
    let quoted = shlex::try_quote(script).map_err(|_| {
        ProtocolError::UnquotableScript(script.lines().next().unwrap_or_default().to_string())
    })?;
    Ok(format!("sh -c {}", quoted))
}

/// Build the environment probe script
pub fn probe_script() -> Result<String, ProtocolError> {
    PROBE.render(&[
        ("helper", HELPER_BINARY),
        ("dir", SESSION_DIR),
        ("present", HELPER_PRESENT),
        ("absent", HELPER_ABSENT),
        ("ready", DIR_READY),
    ])
}

/// Build the attach-or-create script for a session
pub fn connect_script(session: &SessionName) -> Result<String, ProtocolError> {
    let socket = socket_path(session);
    CONNECT.render(&[
        ("helper", HELPER_BINARY),
        ("dir", SESSION_DIR),
        ("socket", &socket),
        ("detach", DETACH_KEY),
    ])
}

/// Build the session listing script
pub fn list_script() -> Result<String, ProtocolError> {
    LIST.render(&[
        ("dir", SESSION_DIR),
        ("entry", SESSION_ENTRY),
        ("done", LIST_DONE),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::parse_probe_output;

    #[test]
    fn test_render_substitutes_all_placeholders() {
        let template = ScriptTemplate::new("t", "echo @a@ and @b@ and @a@");
        let out = template.render(&[("a", "x"), ("b", "y")]).unwrap();
        assert_eq!(out, "echo x and y and x");
    }

    #[test]
    fn test_render_missing_value() {
        let template = ScriptTemplate::new("t", "echo @missing@");
        let err = template.render(&[]).unwrap_err();
        assert_eq!(
            err,
            ProtocolError::UnboundPlaceholder {
                template: "t",
                placeholder: "missing".to_string(),
            }
        );
    }

    #[test]
    fn test_render_unterminated() {
        let template = ScriptTemplate::new("t", "echo @oops");
        assert!(matches!(
            template.render(&[]),
            Err(ProtocolError::UnterminatedPlaceholder { template: "t" })
        ));
    }

    #[test]
    fn test_builtin_templates_render() {
        let session = SessionName::new("dev").unwrap();
        assert!(probe_script().is_ok());
        assert!(connect_script(&session).is_ok());
        assert!(list_script().is_ok());
    }

    #[test]
    fn test_probe_script_emits_known_markers() {
        let script = probe_script().unwrap();
        assert!(script.contains(HELPER_PRESENT));
        assert!(script.contains(HELPER_ABSENT));
        assert!(script.contains(DIR_READY));
        assert!(script.contains("command -v dtach"));
        assert!(script.contains("mkdir -p \"$HOME\"/.dtach"));
        assert!(!script.contains('@'));

        // The script text itself must not parse as a positive probe result.
        assert!(!parse_probe_output(&script).helper_present);
    }

    #[test]
    fn test_connect_script_contents() {
        let session = SessionName::new("dev").unwrap();
        let script = connect_script(&session).unwrap();

        assert!(script.contains("mkdir -p \"$HOME\"/.dtach"));
        assert!(script.contains("exec dtach -A \"$HOME\"/.dtach/dev -e '^\\'"));
        assert!(script.contains("\"${SHELL:-/bin/sh}\" -l"));
        assert!(script.contains("plain shell"));
    }

    #[test]
    fn test_connect_script_is_deterministic() {
        let session = SessionName::new("dev").unwrap();
        assert_eq!(
            connect_script(&session).unwrap(),
            connect_script(&session).unwrap()
        );
        assert_eq!(socket_path(&session), socket_path(&session));
    }

    #[test]
    fn test_distinct_sessions_distinct_paths() {
        let a = SessionName::new("dev").unwrap();
        let b = SessionName::new("work").unwrap();
        assert_ne!(socket_path(&a), socket_path(&b));
    }

    #[test]
    fn test_socket_path_quotes_names() {
        let session = SessionName::new("it's mine").unwrap();
        let path = socket_path(&session);
        assert!(path.starts_with("\"$HOME\"/.dtach/"));
        assert_ne!(path, "\"$HOME\"/.dtach/it's mine");
    }

    #[test]
    fn test_detach_key_identical_across_sessions() {
        let one = connect_script(&SessionName::new("one").unwrap()).unwrap();
        let two = connect_script(&SessionName::new("two").unwrap()).unwrap();
        let needle = format!("-e '{}'", DETACH_KEY);
        assert!(one.contains(&needle));
        assert!(two.contains(&needle));
    }

    #[test]
    fn test_sh_command_quotes_script() {
        let wrapped = sh_command("echo 'hi'; exit 0").unwrap();
        assert!(wrapped.starts_with("sh -c "));
        assert_ne!(wrapped, "sh -c echo 'hi'; exit 0");
        assert!(sh_command("bad\0script").is_err());
    }

    #[test]
    fn test_list_script_contents() {
        let script = list_script().unwrap();
        assert!(script.contains(SESSION_ENTRY));
        assert!(script.contains(LIST_DONE));
        assert!(script.contains("[ -S \"$f\" ]"));
    }
}
