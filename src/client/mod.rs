//! Notion API client abstraction.
//!
//! The services only see the [`NotionApi`] trait; [`HttpNotionClient`] is the
//! blocking `reqwest` implementation used by the binary.

mod http;
mod pagination;

pub use http::{HttpNotionClient, build_http_client};
pub use pagination::{QueryOutcome, fetch_all_pages};

use crate::Result;
use crate::models::{CreatePageRequest, CreatedPage, QueryResponse};

/// The two API operations the sync needs.
pub trait NotionApi: Send + Sync {
    /// Creates one page.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Api`] for a non-success status and
    /// [`crate::Error::OperationFailed`] when the request cannot be sent or
    /// the response cannot be decoded.
    fn create_page(&self, request: &CreatePageRequest) -> Result<CreatedPage>;

    /// Fetches one page of database rows, starting at `start_cursor`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`NotionApi::create_page`].
    fn query_database(
        &self,
        database_id: &str,
        start_cursor: Option<&str>,
    ) -> Result<QueryResponse>;
}

/// In-memory API used by unit tests; answers are queued in call order.
#[cfg(test)]
pub struct MockNotionApi {
    create_responses: std::sync::Mutex<std::collections::VecDeque<Result<CreatedPage>>>,
    query_responses: std::sync::Mutex<std::collections::VecDeque<Result<QueryResponse>>>,
    /// Create requests received.
    pub created: std::sync::Mutex<Vec<CreatePageRequest>>,
    /// Cursors received by `query_database`.
    pub cursors: std::sync::Mutex<Vec<Option<String>>>,
}

#[cfg(test)]
impl MockNotionApi {
    /// Creates a mock with no queued responses.
    pub fn new() -> Self {
        Self {
            create_responses: std::sync::Mutex::new(std::collections::VecDeque::new()),
            query_responses: std::sync::Mutex::new(std::collections::VecDeque::new()),
            created: std::sync::Mutex::new(Vec::new()),
            cursors: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Queues the answer to the next create call.
    pub fn queue_create(&self, result: Result<CreatedPage>) {
        self.create_responses.lock().expect("lock").push_back(result);
    }

    /// Queues the answer to the next query call.
    pub fn queue_query(&self, result: Result<QueryResponse>) {
        self.query_responses.lock().expect("lock").push_back(result);
    }

    /// Number of create calls made.
    pub fn create_count(&self) -> usize {
        self.created.lock().expect("lock").len()
    }
}

#[cfg(test)]
impl NotionApi for MockNotionApi {
    fn create_page(&self, request: &CreatePageRequest) -> Result<CreatedPage> {
        self.created.lock().expect("lock").push(request.clone());
        self.create_responses
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| Ok(CreatedPage::default()))
    }

    fn query_database(
        &self,
        _database_id: &str,
        start_cursor: Option<&str>,
    ) -> Result<QueryResponse> {
        self.cursors
            .lock()
            .expect("lock")
            .push(start_cursor.map(str::to_string));
        self.query_responses
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| Ok(QueryResponse::default()))
    }
}
