//! File I/O for both pipelines.
//!
//! | Direction | File | Shape |
//! |-----------|------|-------|
//! | Import | user-supplied | one entry object, or an array of them |
//! | Export | `notion_database_export_YYYYMMDD_HHMMSS.json` | [`Snapshot`](crate::models::Snapshot) |

pub mod input;
pub mod snapshot;

pub use input::{load_entries, parse_entries};
pub use snapshot::{SNAPSHOT_PREFIX, snapshot_file_name, write_snapshot};
