//! Shared test helpers for Dropbox API integration tests
//!
//! Provides wiremock-based mock server setup for Dropbox API endpoints.
//! Each helper mounts the necessary mock endpoints and returns a
//! configured DbxClient pointing at the mock server.

use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use boxhaul_dropbox::client::DbxClient;

/// Starts a mock server and returns a client whose RPC and content base
/// URLs both point at it.
pub async fn setup_dbx_mock() -> (MockServer, DbxClient) {
    let server = MockServer::start().await;
    let client = DbxClient::with_base_urls("test-access-token", server.uri(), server.uri());
    (server, client)
}

/// Mounts a `get_current_account` endpoint that accepts any token.
pub async fn mount_current_account(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/2/users/get_current_account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "account_id": "dbid:test-account",
            "name": { "display_name": "Test User" },
            "email": "test@example.com"
        })))
        .mount(server)
        .await;
}

/// Mounts a listing endpoint that returns a single page with the given
/// entries and no continuation.
pub async fn mount_list_single_page(server: &MockServer, entries: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/2/files/list_folder"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "entries": entries,
            "cursor": "cursor-final",
            "has_more": false
        })))
        .mount(server)
        .await;
}

/// Mounts a two-page listing: the initial call returns page 1 with
/// `has_more`, and the continue endpoint serves page 2 for its cursor.
pub async fn mount_list_paginated(
    server: &MockServer,
    page1_entries: serde_json::Value,
    page2_entries: serde_json::Value,
) {
    Mock::given(method("POST"))
        .and(path("/2/files/list_folder"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "entries": page1_entries,
            "cursor": "cursor-page-2",
            "has_more": true
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/2/files/list_folder/continue"))
        .and(body_json(serde_json::json!({"cursor": "cursor-page-2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "entries": page2_entries,
            "cursor": "cursor-final",
            "has_more": false
        })))
        .expect(1)
        .mount(server)
        .await;
}

/// Matches a header by comparing its raw value byte-for-byte.
///
/// wiremock's built-in `header` matcher splits incoming values on commas
/// (multi-valued header support), so it can never match a JSON value
/// containing a comma, such as a `Dropbox-API-Arg` with a `rev` field.
struct RawHeaderMatcher(&'static str, String);

impl wiremock::Match for RawHeaderMatcher {
    fn matches(&self, request: &wiremock::Request) -> bool {
        request
            .headers
            .get(self.0)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == self.1)
    }
}

/// Mounts a download endpoint answering only the exact `Dropbox-API-Arg`
/// header value with the given bytes.
pub async fn mount_download(server: &MockServer, api_arg: &str, content: &[u8]) {
    Mock::given(method("POST"))
        .and(path("/2/files/download"))
        .and(RawHeaderMatcher("Dropbox-API-Arg", api_arg.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content.to_vec()))
        .mount(server)
        .await;
}
