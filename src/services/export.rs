//! Database export service.
//!
//! Pulls every row of the configured database, flattens it, and writes a
//! JSON snapshot.

use crate::client::{NotionApi, fetch_all_pages};
use crate::config::NotionConfig;
use crate::io::write_snapshot;
use crate::mapping::export_page;
use crate::models::Snapshot;
use crate::Result;
use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Result of an export run.
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// The snapshot, possibly partial.
    pub snapshot: Snapshot,
    /// Why the fetch stopped early, if it did.
    pub fetch_error: Option<String>,
    /// Query requests issued.
    pub requests: usize,
    /// Row counts per non-empty category.
    pub categories: BTreeMap<String, usize>,
    /// Where the snapshot was written, if it was.
    pub output_path: Option<PathBuf>,
    /// Size of the written file in bytes.
    pub bytes_written: u64,
    /// Wall time spent fetching and writing.
    pub elapsed_ms: u128,
}

impl ExportReport {
    /// Returns `true` if every row was retrieved.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.fetch_error.is_none()
    }
}

/// Service for exporting a database to a snapshot.
pub struct ExportService {
    api: Arc<dyn NotionApi>,
    database_id: String,
}

impl ExportService {
    /// Creates an export service reading the configured database.
    #[must_use]
    pub fn new(api: Arc<dyn NotionApi>, config: &NotionConfig) -> Self {
        Self {
            api,
            database_id: config.database_id.clone(),
        }
    }

    /// Fetches and flattens every row, stamping the snapshot with `captured_at`.
    ///
    /// Never fails: a fetch error leaves a partial snapshot and is reported
    /// in [`ExportReport::fetch_error`].
    pub fn collect_at(
        &self,
        captured_at: DateTime<Local>,
        progress: Option<&dyn Fn(usize)>,
    ) -> ExportReport {
        let start = Instant::now();
        let outcome = fetch_all_pages(self.api.as_ref(), &self.database_id, progress);
        let pages = outcome.pages.iter().map(export_page).collect();
        let snapshot = Snapshot::new(self.database_id.clone(), captured_at, pages);
        let categories = snapshot.category_counts();

        ExportReport {
            snapshot,
            fetch_error: outcome.error,
            requests: outcome.requests,
            categories,
            output_path: None,
            bytes_written: 0,
            elapsed_ms: start.elapsed().as_millis(),
        }
    }

    /// Fetches and flattens every row, stamped with the current local time.
    pub fn collect(&self, progress: Option<&dyn Fn(usize)>) -> ExportReport {
        self.collect_at(Local::now(), progress)
    }

    /// Collects the snapshot and writes it to `path`.
    ///
    /// The file is written even when the fetch stopped early.
    ///
    /// # Errors
    ///
    /// Returns an error only if the snapshot file cannot be written.
    pub fn export_to_file(
        &self,
        path: &Path,
        progress: Option<&dyn Fn(usize)>,
    ) -> Result<ExportReport> {
        let start = Instant::now();
        let mut report = self.collect(progress);
        report.bytes_written = write_snapshot(path, &report.snapshot)?;
        report.output_path = Some(path.to_path_buf());
        report.elapsed_ms = start.elapsed().as_millis();

        tracing::info!(
            path = %path.display(),
            pages = report.snapshot.total_pages,
            bytes = report.bytes_written,
            complete = report.is_complete(),
            "Snapshot written"
        );
        Ok(report)
    }
}
