//! # notion-sync
//!
//! Moves structured records between local JSON files and a Notion database.
//!
//! Two independent pipelines share the crate:
//!
//! - **Import** reads one entry (a JSON object) or many (a JSON array), maps
//!   each entry onto the database's property schema and creates one page per
//!   entry.
//! - **Export** pages through the whole database, flattens every row back
//!   into a plain record and writes a timestamped JSON snapshot.
//!
//! The interesting part lives in [`mapping`]: the rules that translate
//! between the flat entry shape and Notion's nested property/block shape.
//!
//! ## Example
//!
//! ```rust,ignore
//! use notion_sync::{HttpNotionClient, ImportOptions, ImportService, NotionConfig};
//! use std::sync::Arc;
//!
//! let config = NotionConfig::from_env()?;
//! let client = Arc::new(HttpNotionClient::new(&config));
//! let service = ImportService::new(client, &config);
//! let batch = notion_sync::io::load_entries("entries.json".as_ref())?;
//! let result = service.import_batch(batch, ImportOptions::default(), None);
//! println!("{} created, {} failed", result.succeeded, result.failed);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
// multiple_crate_versions is inherently crate-level (detects duplicate transitive dependencies).
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod client;
pub mod config;
pub mod io;
pub mod mapping;
pub mod models;
pub mod observability;
pub mod services;

// Re-exports for convenience
pub use client::{HttpNotionClient, NotionApi, QueryOutcome, fetch_all_pages};
pub use config::{HttpConfig, NotionConfig};
pub use mapping::{EntryMapper, export_page};
pub use models::{ContentBlock, Entry, EntryBatch, EntryDate, Page, PropertyValue, Snapshot};
pub use services::{
    ExportReport, ExportService, ImportEvent, ImportFailure, ImportOptions, ImportResult,
    ImportService,
};

/// Error type for notion-sync operations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `Config` | `DATABASE_ID` / `NOTION_TOKEN` missing or blank, env file unreadable |
/// | `InvalidInput` | Malformed JSON, entries of the wrong shape |
/// | `OperationFailed` | File I/O, transport failures, undecodable responses |
/// | `Api` | The Notion API answered with a non-success status |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Required configuration is missing or unusable.
    ///
    /// Raised before any network call is attempted.
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - The entry file is not valid JSON
    /// - The top-level value is neither an object nor an array
    /// - An entry field has the wrong type (e.g. `Pinned: "yes"`)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - Reading the entry file or writing the snapshot fails
    /// - The HTTP request could not be sent (DNS, connect, timeout)
    /// - A success response body could not be decoded
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// The remote API returned a non-success status.
    #[error("API returned status {status}: {}", .message.as_deref().unwrap_or(.body.as_str()))]
    Api {
        /// HTTP status code.
        status: u16,
        /// The `message` field of the error body, when present.
        message: Option<String>,
        /// Raw response body.
        body: String,
    },
}

/// Result type alias for notion-sync operations.
pub type Result<T> = std::result::Result<T, Error>;
