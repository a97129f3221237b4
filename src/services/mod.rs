//! Sync services.
//!
//! Each service drives one direction of the sync through a [`NotionApi`](crate::client::NotionApi).

mod export;
mod import;

pub use export::{ExportReport, ExportService};
pub use import::{
    EntryOutcome, ImportEvent, ImportFailure, ImportOptions, ImportResult, ImportService,
};
