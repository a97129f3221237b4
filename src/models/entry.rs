//! Entry records: the flat JSON side of the sync.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use super::page::BlockKind;

/// One record as written by hand in an import file.
///
/// Every field is optional. An absent field (or an explicit `null`) means
/// "leave this property unset", never "set it to an empty value".
///
/// # Field Mapping
///
/// | JSON key | Notion property type |
/// |----------|----------------------|
/// | `Name` | title |
/// | `Description` | rich text |
/// | `Category` | select (commas rewritten) |
/// | `Location` | select |
/// | `Role` | select |
/// | `Date` | date (single or range) |
/// | `URL` | url |
/// | `Show Page Contents` | checkbox |
/// | `Pinned` | checkbox |
/// | `page_content` | child blocks |
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Page title.
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Free-text description.
    #[serde(
        rename = "Description",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    /// Category from the external taxonomy, possibly containing commas.
    #[serde(rename = "Category", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Location, conventionally "City ST".
    #[serde(rename = "Location", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Role held (e.g. "PI", "Panel Chair").
    #[serde(rename = "Role", default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Single date or date range.
    #[serde(rename = "Date", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<EntryDate>,

    /// Related link.
    #[serde(rename = "URL", default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Whether the page body should be displayed.
    #[serde(
        rename = "Show Page Contents",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub show_page_contents: Option<bool>,

    /// Whether the entry is pinned.
    #[serde(rename = "Pinned", default, skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,

    /// Ordered body content.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub page_content: Vec<ContentBlock>,

    /// Keys the entry schema does not recognize. Never sent to the API.
    #[serde(flatten, default, skip_serializing_if = "BTreeMap::is_empty")]
    pub unknown_fields: BTreeMap<String, Value>,
}

impl Entry {
    /// Name used in progress output.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }

    /// Sets the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the date.
    #[must_use]
    pub fn with_date(mut self, date: EntryDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Appends a content block.
    #[must_use]
    pub fn with_block(mut self, block: ContentBlock) -> Self {
        self.page_content.push(block);
        self
    }
}

/// The two accepted shapes of the `Date` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryDate {
    /// `"2023-01-01"`
    Single(String),
    /// `{"start": "2011-01-01", "end": "present"}`
    Range(DateRange),
}

impl EntryDate {
    /// Creates a range date.
    #[must_use]
    pub fn range(start: Option<&str>, end: Option<&str>) -> Self {
        Self::Range(DateRange {
            start: start.map(str::to_string),
            end: end.map(str::to_string),
        })
    }
}

/// A date range; either bound may be missing.
///
/// `end` may hold an ongoing token such as `"present"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Range start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// Range end, or an ongoing token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

/// One unit of page body content.
///
/// Types other than the four supported ones deserialize into
/// [`ContentBlock::Unsupported`] and are dropped when mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    /// Plain paragraph.
    #[serde(rename = "paragraph")]
    Paragraph {
        /// Block text.
        text: String,
    },
    /// Top-level heading.
    #[serde(rename = "heading_1")]
    Heading1 {
        /// Block text.
        text: String,
    },
    /// Second-level heading.
    #[serde(rename = "heading_2")]
    Heading2 {
        /// Block text.
        text: String,
    },
    /// Third-level heading.
    #[serde(rename = "heading_3")]
    Heading3 {
        /// Block text.
        text: String,
    },
    /// Any other `type` value.
    #[serde(other)]
    Unsupported,
}

impl ContentBlock {
    /// Returns the Notion block kind and text, or `None` for unsupported blocks.
    #[must_use]
    pub fn parts(&self) -> Option<(BlockKind, &str)> {
        match self {
            Self::Paragraph { text } => Some((BlockKind::Paragraph, text.as_str())),
            Self::Heading1 { text } => Some((BlockKind::Heading1, text.as_str())),
            Self::Heading2 { text } => Some((BlockKind::Heading2, text.as_str())),
            Self::Heading3 { text } => Some((BlockKind::Heading3, text.as_str())),
            Self::Unsupported => None,
        }
    }
}

/// Contents of an import file: a single object or an array of objects.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryBatch {
    /// The file held one JSON object.
    Single(Entry),
    /// The file held a JSON array.
    Many(Vec<Entry>),
}

impl EntryBatch {
    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Many(entries) => entries.len(),
        }
    }

    /// Returns `true` for an empty array.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the entries in file order.
    #[must_use]
    pub fn into_entries(self) -> Vec<Entry> {
        match self {
            Self::Single(entry) => vec![entry],
            Self::Many(entries) => entries,
        }
    }
}
