//! Cursor-driven fetch of a whole database.

use super::NotionApi;
use crate::models::Page;

/// Everything a fetch loop managed to collect.
///
/// A fetch never fails as a whole: when a request errors the rows gathered
/// so far are kept and `error` says why the loop stopped early.
#[derive(Debug, Clone, Default)]
pub struct QueryOutcome {
    /// Rows in query order.
    pub pages: Vec<Page>,
    /// Query requests issued, including a failed one.
    pub requests: usize,
    /// Why the loop stopped before the provider reported the last page.
    pub error: Option<String>,
}

impl QueryOutcome {
    /// Returns `true` if every page was retrieved.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Queries `database_id` page after page until `has_more` is false.
///
/// `progress` receives the running row count after each successful page.
pub fn fetch_all_pages(
    api: &dyn NotionApi,
    database_id: &str,
    progress: Option<&dyn Fn(usize)>,
) -> QueryOutcome {
    let mut outcome = QueryOutcome::default();
    let mut cursor: Option<String> = None;

    loop {
        outcome.requests += 1;
        let response = match api.query_database(database_id, cursor.as_deref()) {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(
                    database_id,
                    request = outcome.requests,
                    pages = outcome.pages.len(),
                    error = %e,
                    "Database query failed; keeping pages fetched so far"
                );
                outcome.error = Some(e.to_string());
                break;
            },
        };

        outcome.pages.extend(response.results);
        tracing::info!(
            database_id,
            pages = outcome.pages.len(),
            "Retrieved database page"
        );
        if let Some(cb) = progress {
            cb(outcome.pages.len());
        }

        if !response.has_more {
            break;
        }
        match response.next_cursor {
            Some(next) => cursor = Some(next),
            None => {
                tracing::warn!(
                    database_id,
                    "Query reported more results without a cursor; stopping"
                );
                outcome.error =
                    Some("query reported more results without a continuation cursor".to_string());
                break;
            },
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::client::MockNotionApi;
    use crate::models::QueryResponse;

    fn response(ids: &[&str], next: Option<&str>) -> QueryResponse {
        QueryResponse {
            results: ids
                .iter()
                .map(|id| Page {
                    id: (*id).to_string(),
                    ..Page::default()
                })
                .collect(),
            has_more: next.is_some(),
            next_cursor: next.map(str::to_string),
        }
    }

    #[test]
    fn test_follows_cursors_until_done() {
        let api = MockNotionApi::new();
        api.queue_query(Ok(response(&["a", "b"], Some("c1"))));
        api.queue_query(Ok(response(&["c"], Some("c2"))));
        api.queue_query(Ok(response(&["d"], None)));

        let outcome = fetch_all_pages(&api, "db", None);

        assert!(outcome.is_complete());
        assert_eq!(outcome.requests, 3);
        let ids: Vec<&str> = outcome.pages.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
        assert_eq!(
            *api.cursors.lock().unwrap(),
            vec![None, Some("c1".to_string()), Some("c2".to_string())]
        );
    }

    #[test]
    fn test_error_keeps_partial_results() {
        let api = MockNotionApi::new();
        api.queue_query(Ok(response(&["a"], Some("c1"))));
        api.queue_query(Err(Error::Api {
            status: 500,
            message: None,
            body: "boom".to_string(),
        }));

        let outcome = fetch_all_pages(&api, "db", None);

        assert!(!outcome.is_complete());
        assert_eq!(outcome.pages.len(), 1);
        assert!(outcome.error.as_deref().unwrap().contains("500"));
    }

    #[test]
    fn test_missing_cursor_stops_loop() {
        let api = MockNotionApi::new();
        api.queue_query(Ok(QueryResponse {
            results: Vec::new(),
            has_more: true,
            next_cursor: None,
        }));

        let outcome = fetch_all_pages(&api, "db", None);

        assert_eq!(outcome.requests, 1);
        assert!(!outcome.is_complete());
    }

    #[test]
    fn test_progress_reports_running_total() {
        let api = MockNotionApi::new();
        api.queue_query(Ok(response(&["a", "b"], Some("c1"))));
        api.queue_query(Ok(response(&["c"], None)));

        let seen = std::cell::RefCell::new(Vec::new());
        let record = |count: usize| seen.borrow_mut().push(count);
        let _ = fetch_all_pages(&api, "db", Some(&record));

        assert_eq!(seen.into_inner(), vec![2, 3]);
    }
}
