//! Blocking HTTP implementation of [`NotionApi`].

use super::NotionApi;
use crate::config::{HttpConfig, NotionConfig};
use crate::models::{CreatePageRequest, CreatedPage, QueryRequest, QueryResponse};
use crate::{Error, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Notion client over `reqwest::blocking`.
pub struct HttpNotionClient {
    /// API base URL.
    api_url: String,
    /// Integration token.
    token: SecretString,
    /// HTTP client.
    client: reqwest::blocking::Client,
}

impl HttpNotionClient {
    /// Creates a client from the process configuration.
    #[must_use]
    pub fn new(config: &NotionConfig) -> Self {
        Self {
            api_url: config.api_url.clone(),
            token: config.token.clone(),
            client: build_http_client(config.http),
        }
    }

    /// Sends one JSON POST and decodes the success body.
    fn post<B, T>(&self, operation: &str, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}/{path}", self.api_url);
        tracing::debug!(operation, url = %url, "Sending Notion API request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.token.expose_secret())
            .header("Notion-Version", NotionConfig::NOTION_VERSION)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .map_err(|e| {
                let error_kind = if e.is_timeout() {
                    "timeout"
                } else if e.is_connect() {
                    "connect"
                } else if e.is_request() {
                    "request"
                } else {
                    "unknown"
                };
                tracing::error!(
                    operation,
                    error = %e,
                    error_kind,
                    "Notion API request failed"
                );
                Error::OperationFailed {
                    operation: operation.to_string(),
                    cause: format!("{error_kind} error: {e}"),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            tracing::error!(
                operation,
                status = status.as_u16(),
                body = %body,
                "Notion API returned error status"
            );
            return Err(api_error(status.as_u16(), body));
        }

        response.json().map_err(|e| {
            tracing::error!(operation, error = %e, "Failed to parse Notion API response");
            Error::OperationFailed {
                operation: operation.to_string(),
                cause: e.to_string(),
            }
        })
    }
}

impl NotionApi for HttpNotionClient {
    fn create_page(&self, request: &CreatePageRequest) -> Result<CreatedPage> {
        self.post("create_page", "pages", request)
    }

    fn query_database(
        &self,
        database_id: &str,
        start_cursor: Option<&str>,
    ) -> Result<QueryResponse> {
        let request = QueryRequest {
            start_cursor: start_cursor.map(str::to_string),
        };
        self.post(
            "query_database",
            &format!("databases/{database_id}/query"),
            &request,
        )
    }
}

/// Builds the API error, lifting `message` out of a JSON error body.
fn api_error(status: u16, body: String) -> Error {
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string));
    Error::Api {
        status,
        message,
        body,
    }
}

/// Builds a blocking HTTP client with the configured timeouts.
#[must_use]
pub fn build_http_client(config: HttpConfig) -> reqwest::blocking::Client {
    let mut builder = reqwest::blocking::Client::builder()
        .user_agent(format!("notion-sync/{}", env!("CARGO_PKG_VERSION")));
    if config.timeout_ms > 0 {
        builder = builder.timeout(Duration::from_millis(config.timeout_ms));
    }
    if config.connect_timeout_ms > 0 {
        builder = builder.connect_timeout(Duration::from_millis(config.connect_timeout_ms));
    }

    builder.build().unwrap_or_else(|err| {
        tracing::warn!("Failed to build HTTP client: {err}");
        reqwest::blocking::Client::new()
    })
}
