//! Export snapshot document.

use chrono::{DateTime, Local, SecondsFormat};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Property name summarized in the export report.
pub const CATEGORY_PROPERTY: &str = "Category";

/// A flattened property value in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Title, rich text, select, date start, url, created time.
    Text(String),
    /// Checkbox.
    Flag(bool),
    /// File names or relation ids.
    List(Vec<String>),
    /// An unset url.
    Null,
    /// Unmapped property types, verbatim.
    Raw(Value),
}

impl FieldValue {
    /// Returns the text, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// One row of the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedPage {
    /// Provider-assigned id.
    pub id: String,
    /// Creation timestamp.
    pub created_time: String,
    /// Last modification timestamp.
    pub last_edited_time: String,
    /// Flattened properties keyed by name.
    pub properties: BTreeMap<String, FieldValue>,
}

impl ExportedPage {
    /// Returns a property as text, if present and textual.
    #[must_use]
    pub fn text(&self, property: &str) -> Option<&str> {
        self.properties.get(property).and_then(FieldValue::as_text)
    }
}

/// The whole export file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Source database id.
    pub database_id: String,
    /// Capture time (RFC 3339, local offset).
    pub download_time: String,
    /// Number of rows in `pages`.
    pub total_pages: usize,
    /// Rows in query order.
    pub pages: Vec<ExportedPage>,
}

impl Snapshot {
    /// Builds a snapshot captured at `captured_at`.
    #[must_use]
    pub fn new(
        database_id: impl Into<String>,
        captured_at: DateTime<Local>,
        pages: Vec<ExportedPage>,
    ) -> Self {
        Self {
            database_id: database_id.into(),
            download_time: captured_at.to_rfc3339_opts(SecondsFormat::Micros, false),
            total_pages: pages.len(),
            pages,
        }
    }

    /// Counts rows per non-empty `Category` value, sorted by category.
    #[must_use]
    pub fn category_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for category in self
            .pages
            .iter()
            .filter_map(|page| page.text(CATEGORY_PROPERTY))
            .filter(|category| !category.is_empty())
        {
            *counts.entry(category.to_string()).or_insert(0) += 1;
        }
        counts
    }
}
