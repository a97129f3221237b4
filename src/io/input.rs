//! Entry file loading.

use crate::models::{Entry, EntryBatch};
use crate::{Error, Result};
use serde_json::Value;
use std::path::Path;

/// Reads and parses an entry file.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the file does not exist or does not
/// hold an entry object / array of entry objects, and
/// [`Error::OperationFailed`] for other read failures.
pub fn load_entries(path: &Path) -> Result<EntryBatch> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::InvalidInput(format!("file '{}' not found", path.display()))
        } else {
            Error::OperationFailed {
                operation: "read_entry_file".to_string(),
                cause: format!("{}: {e}", path.display()),
            }
        }
    })?;

    parse_entries(&content).map_err(|e| match e {
        Error::InvalidInput(msg) => {
            Error::InvalidInput(format!("file '{}': {msg}", path.display()))
        },
        other => other,
    })
}

/// Parses entry JSON: an object is one entry, an array is an ordered batch.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for malformed JSON, any other top-level
/// value, or an entry with a field of the wrong type.
pub fn parse_entries(content: &str) -> Result<EntryBatch> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| Error::InvalidInput(format!("invalid JSON: {e}")))?;

    match value {
        object @ Value::Object(_) => parse_entry(object)
            .map(EntryBatch::Single)
            .map_err(|e| Error::InvalidInput(format!("invalid entry: {e}"))),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                parse_entry(item)
                    .map_err(|e| Error::InvalidInput(format!("entry {}: {e}", i + 1)))
            })
            .collect::<Result<Vec<_>>>()
            .map(EntryBatch::Many),
        other => Err(Error::InvalidInput(format!(
            "expected an entry object or an array of entries, found {}",
            json_type_name(&other)
        ))),
    }
}

fn parse_entry(value: Value) -> std::result::Result<Entry, String> {
    if !value.is_object() {
        return Err(format!("expected an object, found {}", json_type_name(&value)));
    }
    let entry: Entry = serde_json::from_value(value).map_err(|e| e.to_string())?;
    if !entry.unknown_fields.is_empty() {
        let keys: Vec<&str> = entry.unknown_fields.keys().map(String::as_str).collect();
        tracing::warn!(
            entry = entry.display_name(),
            fields = ?keys,
            "Ignoring unrecognized entry fields"
        );
    }
    Ok(entry)
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
