//! Structured logging configuration.

use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable selecting the log format (`pretty` or `json`).
pub const LOG_FORMAT_VAR: &str = "NOTION_SYNC_LOG_FORMAT";

/// Environment variable naming a file to append logs to.
pub const LOG_FILE_VAR: &str = "NOTION_SYNC_LOG_FILE";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parses a format name, case-insensitively.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Some(Self::Pretty),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Logging configuration.
#[derive(Debug)]
pub struct LoggingConfig {
    /// Output format.
    pub format: LogFormat,
    /// Event filter.
    pub filter: EnvFilter,
    /// Append to this file instead of stderr.
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    /// Builds the configuration from the process environment.
    ///
    /// `RUST_LOG` wins when set; otherwise only warnings are shown, or debug
    /// events from this crate when `verbose` is set.
    #[must_use]
    pub fn from_env(verbose: bool) -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), verbose)
    }

    /// Builds the configuration from an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F, verbose: bool) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let format = lookup(LOG_FORMAT_VAR)
            .and_then(|v| LogFormat::parse(&v))
            .unwrap_or_default();
        let file = lookup(LOG_FILE_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        let filter = lookup(EnvFilter::DEFAULT_ENV)
            .and_then(|directives| EnvFilter::try_new(directives).ok())
            .unwrap_or_else(|| EnvFilter::new(default_directive(verbose)));

        Self {
            format,
            filter,
            file,
        }
    }
}

const fn default_directive(verbose: bool) -> &'static str {
    if verbose { "notion_sync=debug" } else { "warn" }
}
