//! Wire-format tests for the HTTP client against a mock server.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use mockito::{Matcher, Server};
use notion_sync::models::PropertyValue;
use notion_sync::{EntryMapper, Entry, Error, HttpNotionClient, NotionApi, NotionConfig};
use serde_json::json;

fn client_for(server: &Server) -> HttpNotionClient {
    let config = NotionConfig::new("db-1", "secret-token").with_api_url(format!("{}/", server.url()));
    HttpNotionClient::new(&config)
}

#[test]
fn test_create_page_sends_headers_and_payload() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/pages")
        .match_header("authorization", "Bearer secret-token")
        .match_header("notion-version", "2022-06-28")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "parent": {"database_id": "db-1"},
            "properties": {
                "Name": {"title": [{"type": "text", "text": {"content": "Keynote"}}]},
                "Category": {"select": {"name": "1.3 Talks / Invited"}}
            }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"object":"page","id":"page-42","url":"https://www.notion.so/page-42"}"#)
        .create();

    let entry = Entry::default()
        .with_name("Keynote")
        .with_category("1.3 Talks, Invited");
    let request = EntryMapper::new("db-1").map(&entry);
    let created = client_for(&server).create_page(&request).unwrap();

    mock.assert();
    assert_eq!(created.id, "page-42");
    assert_eq!(created.url.as_deref(), Some("https://www.notion.so/page-42"));
}

#[test]
fn test_create_page_error_status() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/pages")
        .with_status(400)
        .with_body(
            r#"{"object":"error","status":400,"code":"validation_error","message":"Pinned is expected to be checkbox."}"#,
        )
        .create();

    let request = EntryMapper::new("db-1").map(&Entry::default().with_name("x"));
    let err = client_for(&server).create_page(&request).unwrap_err();

    mock.assert();
    match err {
        Error::Api {
            status, message, ..
        } => {
            assert_eq!(status, 400);
            assert_eq!(message.as_deref(), Some("Pinned is expected to be checkbox."));
        },
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_query_without_cursor_sends_empty_body() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/databases/db-1/query")
        .match_body(Matcher::Json(json!({})))
        .with_status(200)
        .with_body(
            json!({
                "object": "list",
                "results": [{
                    "object": "page",
                    "id": "row-1",
                    "created_time": "2024-03-01T10:00:00.000Z",
                    "last_edited_time": "2024-03-02T10:00:00.000Z",
                    "properties": {
                        "Name": {"id": "title", "type": "title", "title": [
                            {"type": "text", "text": {"content": "Row one"}, "plain_text": "Row one"}
                        ]},
                        "Pinned": {"id": "p", "type": "checkbox", "checkbox": true}
                    }
                }],
                "has_more": true,
                "next_cursor": "cursor-2"
            })
            .to_string(),
        )
        .create();

    let response = client_for(&server).query_database("db-1", None).unwrap();

    mock.assert();
    assert!(response.has_more);
    assert_eq!(response.next_cursor.as_deref(), Some("cursor-2"));
    assert_eq!(response.results.len(), 1);
    assert_eq!(
        response.results[0].properties.get("Pinned"),
        Some(&PropertyValue::Checkbox(true))
    );
}

#[test]
fn test_query_with_cursor() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/databases/db-1/query")
        .match_body(Matcher::Json(json!({"start_cursor": "cursor-2"})))
        .with_status(200)
        .with_body(r#"{"results":[],"has_more":false,"next_cursor":null}"#)
        .create();

    let response = client_for(&server)
        .query_database("db-1", Some("cursor-2"))
        .unwrap();

    mock.assert();
    assert!(!response.has_more);
    assert!(response.results.is_empty());
}

#[test]
fn test_undecodable_success_body() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", "/databases/db-1/query")
        .with_status(200)
        .with_body("not json")
        .create();

    let err = client_for(&server).query_database("db-1", None).unwrap_err();
    assert!(matches!(err, Error::OperationFailed { ref operation, .. } if operation == "query_database"));
}

#[test]
fn test_connection_refused() {
    // Nothing listens on port 9 in the test environment.
    let config = NotionConfig::new("db-1", "t").with_api_url("http://127.0.0.1:9");
    let err = HttpNotionClient::new(&config)
        .query_database("db-1", None)
        .unwrap_err();
    assert!(matches!(err, Error::OperationFailed { .. }));
}
