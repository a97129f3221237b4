//! Configuration management.
//!
//! All settings come from the process environment, optionally seeded from a
//! `.env` file. The resulting [`NotionConfig`] is built once by the binary and
//! handed by reference to everything that talks to the API.
//!
//! | Variable | Required | Default |
//! |----------|----------|---------|
//! | `DATABASE_ID` | Yes | - |
//! | `NOTION_TOKEN` | Yes | - |
//! | `NOTION_API_URL` | No | `https://api.notion.com/v1` |
//! | `NOTION_SYNC_TIMEOUT_MS` | No | client default |
//! | `NOTION_SYNC_CONNECT_TIMEOUT_MS` | No | client default |

use crate::{Error, Result};
use secrecy::SecretString;
use std::path::Path;

/// Environment variable holding the target database id.
pub const DATABASE_ID_VAR: &str = "DATABASE_ID";

/// Environment variable holding the integration token.
pub const NOTION_TOKEN_VAR: &str = "NOTION_TOKEN";

/// Environment variable overriding the API base URL.
pub const API_URL_VAR: &str = "NOTION_API_URL";

/// Connection settings for the Notion API.
#[derive(Debug, Clone)]
pub struct NotionConfig {
    /// Database the importer writes into and the exporter reads from.
    pub database_id: String,
    /// Integration token sent as a bearer credential.
    pub token: SecretString,
    /// API base URL, without a trailing slash.
    pub api_url: String,
    /// HTTP client settings.
    pub http: HttpConfig,
}

impl NotionConfig {
    /// Default API endpoint.
    pub const DEFAULT_API_URL: &'static str = "https://api.notion.com/v1";

    /// API version pinned in the `Notion-Version` header.
    pub const NOTION_VERSION: &'static str = "2022-06-28";

    /// Creates a configuration for the given database and token.
    #[must_use]
    pub fn new(database_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            database_id: database_id.into(),
            token: SecretString::from(token.into()),
            api_url: Self::DEFAULT_API_URL.to_string(),
            http: HttpConfig::default(),
        }
    }

    /// Sets the API base URL.
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets the HTTP client settings.
    #[must_use]
    pub const fn with_http_config(mut self, http: HttpConfig) -> Self {
        self.http = http;
        self
    }

    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `DATABASE_ID` or `NOTION_TOKEN` is missing
    /// or blank.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming every missing required variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_id = non_blank(DATABASE_ID_VAR);
        let token = non_blank(NOTION_TOKEN_VAR);

        let (database_id, token) = match (database_id, token) {
            (Some(database_id), Some(token)) => (database_id, token),
            (database_id, token) => {
                let missing: Vec<&str> = [
                    database_id.is_none().then_some(DATABASE_ID_VAR),
                    token.is_none().then_some(NOTION_TOKEN_VAR),
                ]
                .into_iter()
                .flatten()
                .collect();
                return Err(Error::Config(format!(
                    "missing required environment variables: {}; set them in the environment or in a .env file",
                    missing.join(", ")
                )));
            },
        };

        let mut config = Self::new(database_id.trim(), token.trim())
            .with_http_config(HttpConfig::default().with_overrides(&lookup));
        if let Some(api_url) = non_blank(API_URL_VAR) {
            config = config.with_api_url(api_url.trim());
        }
        Ok(config)
    }

    /// Loads a `.env` file into the process environment.
    ///
    /// With no path, a `.env` in the working directory (or a parent) is loaded
    /// when present and silently skipped otherwise. An explicit path must
    /// exist. Variables already set in the environment are not overridden.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if an explicit file cannot be read or parsed.
    pub fn load_env_file(path: Option<&Path>) -> Result<()> {
        match path {
            Some(path) => dotenvy::from_path(path).map_err(|e| {
                Error::Config(format!("cannot load env file {}: {e}", path.display()))
            }),
            None => match dotenvy::dotenv() {
                Ok(path) => {
                    tracing::debug!(path = %path.display(), "Loaded .env file");
                    Ok(())
                },
                Err(e) if e.not_found() => Ok(()),
                Err(e) => Err(Error::Config(format!("cannot load .env file: {e}"))),
            },
        }
    }
}

/// HTTP client settings for API requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HttpConfig {
    /// Request timeout in milliseconds (0 keeps the client default).
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds (0 keeps the client default).
    pub connect_timeout_ms: u64,
}

impl HttpConfig {
    /// Applies `NOTION_SYNC_TIMEOUT_MS` / `NOTION_SYNC_CONNECT_TIMEOUT_MS`
    /// from the given lookup. Unparseable values are ignored.
    #[must_use]
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(timeout_ms) = lookup("NOTION_SYNC_TIMEOUT_MS").and_then(|v| v.parse().ok()) {
            self.timeout_ms = timeout_ms;
        }
        if let Some(connect_timeout_ms) =
            lookup("NOTION_SYNC_CONNECT_TIMEOUT_MS").and_then(|v| v.parse().ok())
        {
            self.connect_timeout_ms = connect_timeout_ms;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_complete() {
        let config = NotionConfig::from_lookup(lookup_from(&[
            ("DATABASE_ID", "abc123"),
            ("NOTION_TOKEN", "secret_xyz"),
        ]))
        .unwrap();

        assert_eq!(config.database_id, "abc123");
        assert_eq!(config.token.expose_secret(), "secret_xyz");
        assert_eq!(config.api_url, NotionConfig::DEFAULT_API_URL);
        assert_eq!(config.http, HttpConfig::default());
    }

    #[test]
    fn test_from_lookup_missing_both() {
        let err = NotionConfig::from_lookup(lookup_from(&[])).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("DATABASE_ID"));
        assert!(message.contains("NOTION_TOKEN"));
    }

    #[test]
    fn test_from_lookup_blank_token_is_missing() {
        let err = NotionConfig::from_lookup(lookup_from(&[
            ("DATABASE_ID", "abc123"),
            ("NOTION_TOKEN", "   "),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::Config(ref m) if m.contains("NOTION_TOKEN") && !m.contains("DATABASE_ID")));
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = NotionConfig::from_lookup(lookup_from(&[
            ("DATABASE_ID", "abc123"),
            ("NOTION_TOKEN", "secret_xyz"),
            ("NOTION_API_URL", "http://127.0.0.1:9999/v1/"),
            ("NOTION_SYNC_TIMEOUT_MS", "5000"),
            ("NOTION_SYNC_CONNECT_TIMEOUT_MS", "not-a-number"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "http://127.0.0.1:9999/v1");
        assert_eq!(config.http.timeout_ms, 5000);
        assert_eq!(config.http.connect_timeout_ms, 0);
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = NotionConfig::new("abc123", "secret_xyz");
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret_xyz"));
    }

    #[test]
    fn test_load_missing_explicit_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = NotionConfig::load_env_file(Some(&dir.path().join("absent.env")));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
