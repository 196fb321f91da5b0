//! Session identity resolution

use std::fmt;
use std::sync::Arc;

use ps_core::{LocalMultiplexer, PersistConfig};
use ps_protocol::{ProtocolError, SessionName};

/// Where a resolved session name came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSource {
    /// Explicit `--session` override
    Override,
    /// Active tmux window name
    Tmux,
    /// `default_session_name` from the configuration
    Default,
}

impl fmt::Display for SessionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionSource::Override => write!(f, "override"),
            SessionSource::Tmux => write!(f, "tmux window"),
            SessionSource::Default => write!(f, "default"),
        }
    }
}

/// Outcome of session name resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSession {
    /// The session to attach to
    pub name: SessionName,
    /// Which rule produced it
    pub source: SessionSource,
    /// Window name reported by tmux, when it was queried
    pub tmux_window: Option<String>,
}

/// Computes the session name for an invocation
///
/// Precedence: explicit override, then the tmux window name (when enabled by
/// configuration or forced by the caller), then the configured default.
#[derive(Debug, Clone)]
pub struct SessionResolver {
    config: Arc<PersistConfig>,
}

impl SessionResolver {
    /// Create a resolver over an immutable configuration
    pub fn new(config: Arc<PersistConfig>) -> Self {
        Self { config }
    }

    /// Resolve the session name
    ///
    /// An empty override counts as absent; any other override is used
    /// verbatim and is an error if it is not a valid name. The tmux window
    /// name is trimmed, and an unusable one silently falls through to the
    /// default.
    pub async fn resolve(
        &self,
        session_override: Option<&str>,
        force_tmux: bool,
        multiplexer: &dyn LocalMultiplexer,
    ) -> Result<ResolvedSession, ProtocolError> {
        if let Some(name) = session_override.filter(|s| !s.is_empty()) {
            return Ok(ResolvedSession {
                name: SessionName::new(name)?,
                source: SessionSource::Override,
                tmux_window: None,
            });
        }

        let mut tmux_window = None;
        if self.config.session_from_tmux_pane || force_tmux {
            tmux_window = multiplexer
                .active_window_name()
                .await
                .map(|window| window.trim().to_string())
                .filter(|window| !window.is_empty());
            tracing::debug!(window = ?tmux_window, "Queried tmux window name");

            if let Some(window) = &tmux_window {
                match SessionName::new(window.as_str()) {
                    Ok(name) => {
                        return Ok(ResolvedSession {
                            name,
                            source: SessionSource::Tmux,
                            tmux_window,
                        });
                    }
                    Err(e) => tracing::warn!("Ignoring tmux window name: {}", e),
                }
            }
        }

        Ok(ResolvedSession {
            name: SessionName::new(self.config.default_session_name.as_str())?,
            source: SessionSource::Default,
            tmux_window,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeTmux {
        window: Option<&'static str>,
        queries: AtomicUsize,
    }

    impl FakeTmux {
        fn new(window: Option<&'static str>) -> Self {
            Self {
                window,
                queries: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl LocalMultiplexer for FakeTmux {
        async fn active_window_name(&self) -> Option<String> {
            self.queries.fetch_add(1, Ordering::SeqCst);
            self.window.map(str::to_string)
        }
    }

    fn resolver(from_tmux: bool) -> SessionResolver {
        SessionResolver::new(Arc::new(PersistConfig {
            session_from_tmux_pane: from_tmux,
            default_session_name: "main".to_string(),
            ..PersistConfig::default()
        }))
    }

    #[tokio::test]
    async fn test_override_wins_everywhere() {
        for from_tmux in [true, false] {
            for force in [true, false] {
                for window in [None, Some("work")] {
                    let tmux = FakeTmux::new(window);
                    let resolved = resolver(from_tmux)
                        .resolve(Some("dev"), force, &tmux)
                        .await
                        .unwrap();
                    assert_eq!(resolved.name.as_str(), "dev");
                    assert_eq!(resolved.source, SessionSource::Override);
                    assert_eq!(tmux.queries.load(Ordering::SeqCst), 0);
                }
            }
        }
    }

    #[tokio::test]
    async fn test_default_when_tmux_disabled() {
        for window in [None, Some("work")] {
            let tmux = FakeTmux::new(window);
            let resolved = resolver(false).resolve(None, false, &tmux).await.unwrap();
            assert_eq!(resolved.name.as_str(), "main");
            assert_eq!(resolved.source, SessionSource::Default);
            assert_eq!(tmux.queries.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn test_tmux_name_when_enabled() {
        let tmux = FakeTmux::new(Some("work"));
        let resolved = resolver(true).resolve(None, false, &tmux).await.unwrap();
        assert_eq!(resolved.name.as_str(), "work");
        assert_eq!(resolved.source, SessionSource::Tmux);
        assert_eq!(resolved.tmux_window.as_deref(), Some("work"));
    }

    #[tokio::test]
    async fn test_forced_tmux_overrides_config() {
        let tmux = FakeTmux::new(Some("work"));
        let resolved = resolver(false).resolve(None, true, &tmux).await.unwrap();
        assert_eq!(resolved.name.as_str(), "work");
        assert_eq!(resolved.source, SessionSource::Tmux);
    }

    #[tokio::test]
    async fn test_tmux_unavailable_falls_back() {
        let tmux = FakeTmux::new(None);
        let resolved = resolver(true).resolve(None, false, &tmux).await.unwrap();
        assert_eq!(resolved.name.as_str(), "main");
        assert_eq!(resolved.source, SessionSource::Default);
        assert_eq!(tmux.queries.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unusable_tmux_name_falls_back() {
        let tmux = FakeTmux::new(Some("src/lib"));
        let resolved = resolver(true).resolve(None, false, &tmux).await.unwrap();
        assert_eq!(resolved.name.as_str(), "main");
        assert_eq!(resolved.tmux_window.as_deref(), Some("src/lib"));
    }

    #[tokio::test]
    async fn test_empty_override_is_absent() {
        let tmux = FakeTmux::new(None);
        let resolved = resolver(false).resolve(Some(""), false, &tmux).await.unwrap();
        assert_eq!(resolved.source, SessionSource::Default);
    }

    #[tokio::test]
    async fn test_override_used_verbatim() {
        let tmux = FakeTmux::new(Some("work"));
        let resolved = resolver(true).resolve(Some(" dev "), false, &tmux).await.unwrap();
        assert_eq!(resolved.name.as_str(), " dev ");
        assert_eq!(resolved.source, SessionSource::Override);

        let resolved = resolver(true).resolve(Some("   "), false, &tmux).await.unwrap();
        assert_eq!(resolved.name.as_str(), "   ");
        assert_eq!(resolved.source, SessionSource::Override);
        assert_eq!(tmux.queries.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_tmux_name_is_trimmed() {
        let tmux = FakeTmux::new(Some("  work \n"));
        let resolved = resolver(true).resolve(None, false, &tmux).await.unwrap();
        assert_eq!(resolved.name.as_str(), "work");
        assert_eq!(resolved.source, SessionSource::Tmux);
    }

    #[tokio::test]
    async fn test_invalid_override_is_error() {
        let tmux = FakeTmux::new(None);
        assert!(resolver(false)
            .resolve(Some("../etc"), false, &tmux)
            .await
            .is_err());
    }
}
