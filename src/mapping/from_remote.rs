//! Notion page → flat export record.
//!
//! Dates export their start only: the end of a range is dropped, so an
//! exported snapshot is not a faithful re-import source for ranges.

use crate::models::{ExportedPage, FieldValue, Page, PropertyValue, RichText};

/// Flattens one database row.
#[must_use]
pub fn export_page(page: &Page) -> ExportedPage {
    ExportedPage {
        id: page.id.clone(),
        created_time: page.created_time.clone(),
        last_edited_time: page.last_edited_time.clone(),
        properties: page
            .properties
            .iter()
            .map(|(name, value)| (name.clone(), export_value(value)))
            .collect(),
    }
}

/// Flattens one property value.
#[must_use]
pub fn export_value(value: &PropertyValue) -> FieldValue {
    match value {
        PropertyValue::Title(runs) | PropertyValue::RichText(runs) => first_run(runs),
        PropertyValue::Select(option) => FieldValue::Text(
            option
                .as_ref()
                .map(|option| option.name.clone())
                .unwrap_or_default(),
        ),
        PropertyValue::Date(date) => FieldValue::Text(
            date.as_ref()
                .and_then(|date| date.start.clone())
                .unwrap_or_default(),
        ),
        PropertyValue::Url(url) => url.clone().map_or(FieldValue::Null, FieldValue::Text),
        PropertyValue::Checkbox(checked) => FieldValue::Flag(*checked),
        PropertyValue::Files(files) => {
            FieldValue::List(files.iter().map(|file| file.name.clone()).collect())
        },
        PropertyValue::Relation(relations) => {
            FieldValue::List(relations.iter().map(|rel| rel.id.clone()).collect())
        },
        PropertyValue::CreatedTime(timestamp) => FieldValue::Text(timestamp.clone()),
        PropertyValue::Opaque(raw) => FieldValue::Raw(raw.clone()),
    }
}

fn first_run(runs: &[RichText]) -> FieldValue {
    FieldValue::Text(
        runs.first()
            .map(|run| run.content().to_string())
            .unwrap_or_default(),
    )
}
