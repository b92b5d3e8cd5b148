//! Tracing configuration for the command-line tool
//!
//! The library only emits events; the binary installs the subscriber. Events
//! go to stderr so that stdout carries nothing but the report lines.

use std::io::IsTerminal;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Tracing configuration builder
#[derive(Debug)]
pub struct TracingConfig {
    /// Verbosity level (maps to log levels)
    pub verbosity: u8,
    /// Emit ANSI colors
    pub ansi: bool,
    /// Environment filter string (overrides verbosity if set)
    pub env_filter: Option<String>,
    /// Session ID for correlation
    pub session_id: Option<String>,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            verbosity: 0,
            ansi: true,
            env_filter: None,
            session_id: None,
        }
    }
}

impl TracingConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity level (0-2+)
    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Disable colors, e.g. when stderr is redirected to a file
    #[must_use]
    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// Set custom environment filter
    #[must_use]
    pub fn with_env_filter<S: Into<String>>(mut self, filter: S) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Set session ID for run correlation
    #[must_use]
    pub fn with_session_id<S: Into<String>>(mut self, session_id: S) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Convert verbosity level to tracing filter string
    #[must_use]
    pub fn verbosity_to_filter(&self) -> &'static str {
        match self.verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }

    /// Initialize the global tracing subscriber
    pub fn init(self) -> anyhow::Result<()> {
        let filter = if let Some(env_filter) = &self.env_filter {
            EnvFilter::try_new(env_filter)?
        } else {
            EnvFilter::try_new(self.verbosity_to_filter())?
        };

        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(self.ansi)
            .with_target(false)
            .with_level(true)
            .compact();
        Registry::default().with(filter).with(fmt_layer).try_init()?;

        if let Some(session_id) = &self.session_id {
            tracing::info!(session_id = %session_id, "hoverloon image session started");
        }

        Ok(())
    }
}

/// Initialize tracing with CLI-friendly defaults.
///
/// `RUST_LOG` takes precedence over the verbosity flag when set.
pub fn init_cli_tracing(verbosity: u8) -> anyhow::Result<()> {
    let session_id = uuid::Uuid::new_v4().to_string();

    let mut config = TracingConfig::new()
        .with_verbosity(verbosity)
        .with_ansi(std::io::stderr().is_terminal())
        .with_session_id(session_id);

    if let Ok(filter) = std::env::var(EnvFilter::DEFAULT_ENV) {
        if !filter.is_empty() {
            config = config.with_env_filter(filter);
        }
    }

    config.init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_mapping() {
        assert_eq!(TracingConfig::new().verbosity_to_filter(), "warn");
        assert_eq!(
            TracingConfig::new().with_verbosity(1).verbosity_to_filter(),
            "info"
        );
        assert_eq!(
            TracingConfig::new().with_verbosity(2).verbosity_to_filter(),
            "debug"
        );
        assert_eq!(
            TracingConfig::new().with_verbosity(9).verbosity_to_filter(),
            "trace"
        );
    }

    #[test]
    fn test_builder() {
        let config = TracingConfig::new()
            .with_ansi(false)
            .with_env_filter("hoverloon_images=debug")
            .with_session_id("abc");
        assert!(!config.ansi);
        assert_eq!(config.env_filter.as_deref(), Some("hoverloon_images=debug"));
        assert_eq!(config.session_id.as_deref(), Some("abc"));
    }
}
