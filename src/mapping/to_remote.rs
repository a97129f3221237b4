//! Entry → Notion create payload.

use super::normalize::{resolve_end_date, sanitize_category};
use crate::models::{
    BlockPayload, CreatePageRequest, DatePayload, Entry, EntryDate, Parent, PropertyPayload,
    RichTextPayload, SelectPayload,
};
use chrono::{Local, NaiveDate};
use std::collections::BTreeMap;

/// Maps entries onto create requests for one database.
#[derive(Debug, Clone)]
pub struct EntryMapper {
    database_id: String,
    /// Fixed "today" for ongoing date ends; the local date at mapping time when unset.
    today: Option<NaiveDate>,
}

impl EntryMapper {
    /// Creates a mapper targeting `database_id`.
    #[must_use]
    pub fn new(database_id: impl Into<String>) -> Self {
        Self {
            database_id: database_id.into(),
            today: None,
        }
    }

    /// Pins the date that ongoing range ends resolve to.
    #[must_use]
    pub const fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Target database id.
    #[must_use]
    pub fn database_id(&self) -> &str {
        &self.database_id
    }

    /// Builds the full create request for `entry`.
    #[must_use]
    pub fn map(&self, entry: &Entry) -> CreatePageRequest {
        CreatePageRequest {
            parent: Parent {
                database_id: self.database_id.clone(),
            },
            properties: self.properties(entry),
            children: blocks(entry),
        }
    }

    /// Builds the property set. Fields absent from the entry are absent here.
    #[must_use]
    pub fn properties(&self, entry: &Entry) -> BTreeMap<String, PropertyPayload> {
        let mut properties = BTreeMap::new();
        let mut set = |name: &str, payload: PropertyPayload| {
            properties.insert(name.to_string(), payload);
        };

        if let Some(name) = &entry.name {
            set("Name", PropertyPayload::Title(vec![RichTextPayload::text(name)]));
        }
        if let Some(description) = &entry.description {
            set(
                "Description",
                PropertyPayload::RichText(vec![RichTextPayload::text(description)]),
            );
        }
        if let Some(category) = &entry.category {
            set("Category", select(sanitize_category(category)));
        }
        if let Some(location) = &entry.location {
            set("Location", select(location.clone()));
        }
        if let Some(role) = &entry.role {
            set("Role", select(role.clone()));
        }
        if let Some(date) = &entry.date {
            set("Date", PropertyPayload::Date(self.date(date)));
        }
        if let Some(url) = &entry.url {
            set("URL", PropertyPayload::Url(url.clone()));
        }
        if let Some(show) = entry.show_page_contents {
            set("Show Page Contents", PropertyPayload::Checkbox(show));
        }
        if let Some(pinned) = entry.pinned {
            set("Pinned", PropertyPayload::Checkbox(pinned));
        }

        properties
    }

    fn date(&self, date: &EntryDate) -> DatePayload {
        match date {
            EntryDate::Single(start) => DatePayload {
                start: Some(start.clone()),
                end: None,
            },
            EntryDate::Range(range) => DatePayload {
                start: range.start.clone(),
                end: range
                    .end
                    .as_deref()
                    .map(|end| resolve_end_date(end, self.today())),
            },
        }
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

fn select(name: String) -> PropertyPayload {
    PropertyPayload::Select(SelectPayload { name })
}

/// Builds the ordered child blocks; unsupported block types are dropped.
#[must_use]
pub fn blocks(entry: &Entry) -> Vec<BlockPayload> {
    entry
        .page_content
        .iter()
        .filter_map(|block| match block.parts() {
            Some((kind, text)) => Some(BlockPayload {
                kind,
                rich_text: vec![RichTextPayload::text(text)],
            }),
            None => {
                tracing::debug!(?block, "Dropping unsupported content block");
                None
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlockKind, ContentBlock};
    use serde_json::json;

    fn mapper() -> EntryMapper {
        EntryMapper::new("db-1").with_today(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())
    }

    fn entry(value: serde_json::Value) -> Entry {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_full_entry_payload() {
        let request = mapper().map(&entry(json!({
            "Name": "ACM SIGGRAPH Award",
            "Description": "Recipient of ACM SIGGRAPH Award, presented in Los Angeles, CA.",
            "Category": "1.3.6 Awards, Lectureships, Prizes",
            "Location": "Los Angeles CA",
            "Role": "Recipient",
            "URL": "https://siggraph.org",
            "Date": "2023-08-01",
            "Pinned": true,
            "Show Page Contents": false
        })));

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "parent": {"database_id": "db-1"},
                "properties": {
                    "Name": {"title": [{"type": "text", "text": {"content": "ACM SIGGRAPH Award"}}]},
                    "Description": {"rich_text": [{"type": "text", "text": {"content": "Recipient of ACM SIGGRAPH Award, presented in Los Angeles, CA."}}]},
                    "Category": {"select": {"name": "1.3.6 Awards / Lectureships / Prizes"}},
                    "Location": {"select": {"name": "Los Angeles CA"}},
                    "Role": {"select": {"name": "Recipient"}},
                    "URL": {"url": "https://siggraph.org"},
                    "Date": {"date": {"start": "2023-08-01"}},
                    "Pinned": {"checkbox": true},
                    "Show Page Contents": {"checkbox": false}
                },
                "children": []
            })
        );
    }

    #[test]
    fn test_empty_entry_has_no_properties() {
        let request = mapper().map(&Entry::default());
        assert!(request.properties.is_empty());
        assert!(request.children.is_empty());
        assert_eq!(request.parent.database_id, "db-1");
    }

    #[test]
    fn test_description_is_not_rewritten() {
        let props = mapper().properties(&entry(json!({"Description": "a, b, c"})));
        assert_eq!(
            props["Description"],
            PropertyPayload::RichText(vec![RichTextPayload::text("a, b, c")])
        );
    }

    #[test]
    fn test_present_end_resolves_to_today() {
        let props = mapper().properties(&entry(json!({
            "Date": {"start": "2011-01-01", "end": "present"}
        })));
        assert_eq!(
            props["Date"],
            PropertyPayload::Date(DatePayload {
                start: Some("2011-01-01".to_string()),
                end: Some("2026-10-16".to_string()),
            })
        );
    }

    #[test]
    fn test_range_without_end_has_start_only() {
        let props = mapper().properties(&entry(json!({"Date": {"start": "2011-01-01"}})));
        assert_eq!(
            serde_json::to_value(&props["Date"]).unwrap(),
            json!({"date": {"start": "2011-01-01"}})
        );
    }

    #[test]
    fn test_range_with_explicit_end() {
        let props = mapper().properties(&entry(json!({
            "Date": {"start": "2011-01-01", "end": "2023-12-31"}
        })));
        assert_eq!(
            serde_json::to_value(&props["Date"]).unwrap(),
            json!({"date": {"start": "2011-01-01", "end": "2023-12-31"}})
        );
    }

    #[test]
    fn test_range_without_start() {
        let props = mapper().properties(&entry(json!({"Date": {"end": "now"}})));
        assert_eq!(
            serde_json::to_value(&props["Date"]).unwrap(),
            json!({"date": {"end": "2026-10-16"}})
        );
    }

    #[test]
    fn test_unpinned_today_uses_local_date() {
        let props = EntryMapper::new("db")
            .properties(&entry(json!({"Date": {"start": "2011-01-01", "end": "Ongoing"}})));
        let expected = Local::now().date_naive().format("%Y-%m-%d").to_string();
        match &props["Date"] {
            PropertyPayload::Date(date) => assert_eq!(date.end.as_deref(), Some(expected.as_str())),
            other => panic!("unexpected payload: {other:?}"),
        }
    }

    #[test]
    fn test_blocks_keep_order_and_drop_unsupported() {
        let e = Entry::default()
            .with_block(ContentBlock::Heading1 {
                text: "Title".to_string(),
            })
            .with_block(ContentBlock::Unsupported)
            .with_block(ContentBlock::Paragraph {
                text: "Body".to_string(),
            })
            .with_block(ContentBlock::Heading3 {
                text: "Small".to_string(),
            });

        let kinds: Vec<BlockKind> = blocks(&e).iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![BlockKind::Heading1, BlockKind::Paragraph, BlockKind::Heading3]
        );
        assert_eq!(blocks(&e)[1].rich_text, vec![RichTextPayload::text("Body")]);
    }
}
