//! Snapshot file naming and writing.

use crate::models::Snapshot;
use crate::{Error, Result};
use chrono::{DateTime, Local};
use std::io::Write;
use std::path::Path;

/// Prefix of generated snapshot file names.
pub const SNAPSHOT_PREFIX: &str = "notion_database_export_";

/// Builds `notion_database_export_YYYYMMDD_HHMMSS.json` for `now`.
#[must_use]
pub fn snapshot_file_name(now: DateTime<Local>) -> String {
    format!("{SNAPSHOT_PREFIX}{}.json", now.format("%Y%m%d_%H%M%S"))
}

/// Writes `snapshot` as indented UTF-8 JSON, returning the file size.
///
/// # Errors
///
/// Returns [`Error::OperationFailed`] if the file cannot be created or written.
pub fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<u64> {
    let fail = |operation: &str, cause: String| Error::OperationFailed {
        operation: operation.to_string(),
        cause: format!("{}: {cause}", path.display()),
    };

    let file = std::fs::File::create(path).map_err(|e| fail("create_snapshot_file", e.to_string()))?;
    let mut writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, snapshot)
        .map_err(|e| fail("write_snapshot", e.to_string()))?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .map_err(|e| fail("write_snapshot", e.to_string()))?;
    drop(writer);

    std::fs::metadata(path)
        .map(|m| m.len())
        .map_err(|e| fail("stat_snapshot_file", e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExportedPage, FieldValue};
    use chrono::TimeZone;
    use std::collections::BTreeMap;

    #[test]
    fn test_file_name_format() {
        let now = Local.with_ymd_and_hms(2026, 10, 16, 9, 5, 7).unwrap();
        assert_eq!(
            snapshot_file_name(now),
            "notion_database_export_20261016_090507.json"
        );
    }

    #[test]
    fn test_write_is_indented_and_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");

        let mut properties = BTreeMap::new();
        properties.insert("Name".to_string(), FieldValue::Text("Zürich talk".to_string()));
        let snapshot = Snapshot::new(
            "db",
            Local::now(),
            vec![ExportedPage {
                id: "p1".to_string(),
                created_time: String::new(),
                last_edited_time: String::new(),
                properties,
            }],
        );

        let size = write_snapshot(&path, &snapshot).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();

        assert_eq!(size, written.len() as u64);
        assert!(written.contains("Zürich talk"));
        assert!(written.contains("\n  \"database_id\": \"db\""));
        let back: Snapshot = serde_json::from_str(&written).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("out.json");
        let snapshot = Snapshot::new("db", Local::now(), Vec::new());
        assert!(matches!(
            write_snapshot(&path, &snapshot),
            Err(Error::OperationFailed { .. })
        ));
    }
}
