//! Notion-side shapes: pages read from a database query and the payloads
//! sent to create new pages.

use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

// ============================================================================
// Create payloads
// ============================================================================

/// Body of a `POST /pages` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatePageRequest {
    /// Database the page is created in.
    pub parent: Parent,
    /// Property values keyed by property name.
    pub properties: BTreeMap<String, PropertyPayload>,
    /// Page body, in order.
    pub children: Vec<BlockPayload>,
}

/// Parent reference for a new page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parent {
    /// Target database id.
    pub database_id: String,
}

/// A property value as written by the create call.
///
/// Serializes externally tagged, e.g. `{"select": {"name": "..."}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyPayload {
    /// Title property.
    Title(Vec<RichTextPayload>),
    /// Rich text property.
    RichText(Vec<RichTextPayload>),
    /// Single select property.
    Select(SelectPayload),
    /// Date property.
    Date(DatePayload),
    /// URL property.
    Url(String),
    /// Checkbox property.
    Checkbox(bool),
}

/// One rich text run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RichTextPayload {
    /// Always `"text"`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Run content.
    pub text: TextContent,
}

impl RichTextPayload {
    /// Creates a plain text run holding the whole string.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: "text",
            text: TextContent {
                content: content.into(),
            },
        }
    }
}

/// Text content of a rich text run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextContent {
    /// The text.
    pub content: String,
}

/// Selected option, by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectPayload {
    /// Option name.
    pub name: String,
}

/// Date value; an absent `end` makes an open-ended (or single) date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatePayload {
    /// Start date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    /// End date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

/// The block types the importer can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// `paragraph`
    Paragraph,
    /// `heading_1`
    Heading1,
    /// `heading_2`
    Heading2,
    /// `heading_3`
    Heading3,
}

impl BlockKind {
    /// Notion's type tag for this block.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Heading1 => "heading_1",
            Self::Heading2 => "heading_2",
            Self::Heading3 => "heading_3",
        }
    }
}

/// A child block in a create request.
///
/// Serializes as `{"object": "block", "type": T, T: {"rich_text": [...]}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockPayload {
    /// Block type.
    pub kind: BlockKind,
    /// Block text runs.
    pub rich_text: Vec<RichTextPayload>,
}

#[derive(Serialize)]
struct BlockBody<'a> {
    rich_text: &'a [RichTextPayload],
}

impl Serialize for BlockPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("object", "block")?;
        map.serialize_entry("type", self.kind.as_str())?;
        map.serialize_entry(
            self.kind.as_str(),
            &BlockBody {
                rich_text: &self.rich_text,
            },
        )?;
        map.end()
    }
}

/// Response of a successful create call (only the fields we report).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreatedPage {
    /// New page id.
    #[serde(default)]
    pub id: String,
    /// Public page URL.
    #[serde(default)]
    pub url: Option<String>,
}

// ============================================================================
// Query results
// ============================================================================

/// Body of a `POST /databases/{id}/query` request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QueryRequest {
    /// Continuation cursor from the previous page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
}

/// One page of query results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryResponse {
    /// Rows on this page.
    #[serde(default)]
    pub results: Vec<Page>,
    /// Whether another page follows.
    #[serde(default)]
    pub has_more: bool,
    /// Cursor for the next page.
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// A database row as returned by a query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Page {
    /// Provider-assigned id.
    #[serde(default)]
    pub id: String,
    /// Creation timestamp.
    #[serde(default)]
    pub created_time: String,
    /// Last modification timestamp.
    #[serde(default)]
    pub last_edited_time: String,
    /// Public page URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Typed property values keyed by name.
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyValue>,
}

/// A property value read back from the API.
///
/// Closed over the types the exporter flattens; everything else, and any
/// known type whose payload does not parse, is kept verbatim in
/// [`PropertyValue::Opaque`].
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    /// `title`
    Title(Vec<RichText>),
    /// `rich_text`
    RichText(Vec<RichText>),
    /// `select`; `None` when no option is chosen.
    Select(Option<SelectOption>),
    /// `date`; `None` when unset.
    Date(Option<DateValue>),
    /// `url`; `None` when unset.
    Url(Option<String>),
    /// `checkbox`
    Checkbox(bool),
    /// `files`
    Files(Vec<FileRef>),
    /// `relation`
    Relation(Vec<RelationRef>),
    /// `created_time`
    CreatedTime(String),
    /// Any other type, as received.
    Opaque(Value),
}

impl PropertyValue {
    /// Classifies a raw property object by its `type` tag.
    #[must_use]
    pub fn from_raw(raw: Value) -> Self {
        let kind = raw.get("type").and_then(Value::as_str).unwrap_or_default();
        let typed = match kind {
            "title" => typed_field(&raw, "title").map(Self::Title),
            "rich_text" => typed_field(&raw, "rich_text").map(Self::RichText),
            "select" => typed_field(&raw, "select").map(Self::Select),
            "date" => typed_field(&raw, "date").map(Self::Date),
            "url" => typed_field(&raw, "url").map(Self::Url),
            "checkbox" => typed_field(&raw, "checkbox").map(Self::Checkbox),
            "files" => typed_field(&raw, "files").map(Self::Files),
            "relation" => typed_field(&raw, "relation").map(Self::Relation),
            "created_time" => typed_field(&raw, "created_time").map(Self::CreatedTime),
            _ => None,
        };
        typed.unwrap_or(Self::Opaque(raw))
    }
}

/// Reads `raw[key]` as `T`; missing or `null` yields `T::default()`,
/// a payload of the wrong shape yields `None`.
fn typed_field<T: DeserializeOwned + Default>(raw: &Value, key: &str) -> Option<T> {
    match raw.get(key) {
        None | Some(Value::Null) => Some(T::default()),
        Some(value) => serde_json::from_value(value.clone()).ok(),
    }
}

impl<'de> Deserialize<'de> for PropertyValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_raw)
    }
}

/// A rich text run as read back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RichText {
    /// Present for `text` runs.
    #[serde(default)]
    pub text: Option<TextContent>,
    /// Rendered text, present for every run type.
    #[serde(default)]
    pub plain_text: Option<String>,
}

impl RichText {
    /// Run content, falling back to the rendered text for non-text runs.
    #[must_use]
    pub fn content(&self) -> &str {
        self.text
            .as_ref()
            .map(|t| t.content.as_str())
            .or(self.plain_text.as_deref())
            .unwrap_or_default()
    }
}

/// A chosen select option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SelectOption {
    /// Option name.
    #[serde(default)]
    pub name: String,
}

/// A date value as read back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DateValue {
    /// Start date.
    #[serde(default)]
    pub start: Option<String>,
    /// End date.
    #[serde(default)]
    pub end: Option<String>,
}

/// A file attachment; only metadata is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FileRef {
    /// File name.
    #[serde(default)]
    pub name: String,
}

/// A related page reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RelationRef {
    /// Related page id.
    #[serde(default)]
    pub id: String,
}
