//! Entry import service.
//!
//! Creates one Notion page per entry. Entries are independent: a failed
//! create is recorded and the batch moves on. Nothing is retried and pages
//! already created stay in place.

use crate::client::NotionApi;
use crate::config::NotionConfig;
use crate::mapping::EntryMapper;
use crate::models::{CreatePageRequest, CreatedPage, Entry, EntryBatch};
use crate::{Error, Result};
use std::sync::Arc;

/// Options for entry import.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    /// Map entries without sending anything.
    pub dry_run: bool,
}

impl ImportOptions {
    /// Enables or disables dry run mode.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Per-entry notifications during a batch.
#[derive(Debug)]
pub enum ImportEvent<'a> {
    /// About to process entry `index` (1-based) of `total`.
    Started {
        /// Position in the batch, 1-based.
        index: usize,
        /// Batch size.
        total: usize,
        /// The entry.
        entry: &'a Entry,
    },
    /// The page was created.
    Created {
        /// Position in the batch, 1-based.
        index: usize,
        /// The entry.
        entry: &'a Entry,
        /// The API's answer.
        page: &'a CreatedPage,
    },
    /// Dry run: the request that would have been sent.
    Mapped {
        /// Position in the batch, 1-based.
        index: usize,
        /// The mapped request.
        request: &'a CreatePageRequest,
    },
    /// The create call failed.
    Failed {
        /// Position in the batch, 1-based.
        index: usize,
        /// The entry.
        entry: &'a Entry,
        /// Why it failed.
        error: &'a Error,
    },
}

/// One entry that could not be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFailure {
    /// Position in the batch, 1-based.
    pub index: usize,
    /// Entry name, or `Unknown`.
    pub name: String,
    /// HTTP status, when the API answered.
    pub status: Option<u16>,
    /// Error description.
    pub error: String,
}

/// Result of an import run.
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    /// Entries created (or mapped, in a dry run).
    pub succeeded: usize,
    /// Entries whose create call failed.
    pub failed: usize,
    /// Entries processed.
    pub total: usize,
    /// Pages created, in batch order.
    pub created: Vec<CreatedPage>,
    /// Failure details, in batch order.
    pub failures: Vec<ImportFailure>,
}

impl ImportResult {
    /// Returns whether any entry failed.
    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// What happened to a single entry.
#[derive(Debug, Clone)]
pub enum EntryOutcome {
    /// The page was created.
    Created(CreatedPage),
    /// Dry run: the request was built but not sent.
    Mapped(CreatePageRequest),
}

/// Service for importing entries into a database.
pub struct ImportService {
    api: Arc<dyn NotionApi>,
    mapper: EntryMapper,
}

impl ImportService {
    /// Creates an import service writing into the configured database.
    #[must_use]
    pub fn new(api: Arc<dyn NotionApi>, config: &NotionConfig) -> Self {
        Self {
            api,
            mapper: EntryMapper::new(config.database_id.clone()),
        }
    }

    /// Replaces the entry mapper.
    #[must_use]
    pub fn with_mapper(mut self, mapper: EntryMapper) -> Self {
        self.mapper = mapper;
        self
    }

    /// Maps one entry and, unless dry-running, creates its page.
    ///
    /// # Errors
    ///
    /// Returns the API client's error if the create call fails.
    pub fn import_entry(&self, entry: &Entry, options: ImportOptions) -> Result<EntryOutcome> {
        let request = self.mapper.map(entry);

        if let Some(category) = &entry.category {
            tracing::debug!(
                original = %category,
                sanitized = ?request.properties.get("Category"),
                "Category normalized"
            );
        }

        if options.dry_run {
            return Ok(EntryOutcome::Mapped(request));
        }

        let page = self.api.create_page(&request)?;
        tracing::info!(
            entry = entry.display_name(),
            page_id = %page.id,
            "Created page"
        );
        Ok(EntryOutcome::Created(page))
    }

    /// Imports every entry of a batch in order.
    ///
    /// Never stops early: each failure is recorded in the result.
    pub fn import_batch(
        &self,
        batch: EntryBatch,
        options: ImportOptions,
        progress: Option<&dyn Fn(&ImportEvent<'_>)>,
    ) -> ImportResult {
        let entries = batch.into_entries();
        let total = entries.len();
        let mut result = ImportResult {
            total,
            ..ImportResult::default()
        };
        let notify = |event: &ImportEvent<'_>| {
            if let Some(cb) = progress {
                cb(event);
            }
        };

        for (i, entry) in entries.iter().enumerate() {
            let index = i + 1;
            notify(&ImportEvent::Started {
                index,
                total,
                entry,
            });

            match self.import_entry(entry, options) {
                Ok(EntryOutcome::Created(page)) => {
                    result.succeeded += 1;
                    notify(&ImportEvent::Created {
                        index,
                        entry,
                        page: &page,
                    });
                    result.created.push(page);
                },
                Ok(EntryOutcome::Mapped(request)) => {
                    result.succeeded += 1;
                    notify(&ImportEvent::Mapped {
                        index,
                        request: &request,
                    });
                },
                Err(error) => {
                    tracing::warn!(
                        entry = entry.display_name(),
                        index,
                        error = %error,
                        "Failed to create page"
                    );
                    result.failed += 1;
                    notify(&ImportEvent::Failed {
                        index,
                        entry,
                        error: &error,
                    });
                    result.failures.push(ImportFailure {
                        index,
                        name: entry.display_name().to_string(),
                        status: match error {
                            Error::Api { status, .. } => Some(status),
                            _ => None,
                        },
                        error: error.to_string(),
                    });
                },
            }
        }

        result
    }
}
