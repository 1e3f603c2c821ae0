//! Integration tests for folder listing and pagination
//!
//! Verifies against the mock server that:
//! - entries arrive in received order across pages
//! - pagination terminates exactly when `has_more` is false
//! - the `include_deleted` flag reaches the wire
//! - a listing failure surfaces as an error

use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use boxhaul_core::domain::RemoteFolder;
use boxhaul_core::ports::remote_store::RemoteEntry;
use boxhaul_dropbox::list;

use crate::common;

#[tokio::test]
async fn test_single_page_listing() {
    let (server, client) = common::setup_dbx_mock().await;

    common::mount_list_single_page(
        &server,
        serde_json::json!([
            {".tag": "folder", "path_display": "/A", "path_lower": "/a"},
            {
                ".tag": "file",
                "path_display": "/A/Report.pdf",
                "path_lower": "/a/report.pdf",
                "size": 4096
            }
        ]),
    )
    .await;

    let folder = RemoteFolder::new("/A").unwrap();
    let page = list::list_folder(&client, &folder, false)
        .await
        .expect("listing failed");

    assert_eq!(page.entries.len(), 2);
    assert!(!page.has_more);
    assert!(matches!(page.entries[0], RemoteEntry::Folder { .. }));
    assert_eq!(page.entries[1].path_display(), "/A/Report.pdf");
}

#[tokio::test]
async fn test_pagination_preserves_order_and_terminates() {
    let (server, client) = common::setup_dbx_mock().await;

    common::mount_list_paginated(
        &server,
        serde_json::json!([
            {".tag": "file", "path_display": "/d/1.txt", "path_lower": "/d/1.txt", "size": 1},
            {".tag": "file", "path_display": "/d/2.txt", "path_lower": "/d/2.txt", "size": 2}
        ]),
        serde_json::json!([
            {".tag": "file", "path_display": "/d/3.txt", "path_lower": "/d/3.txt", "size": 3}
        ]),
    )
    .await;

    let folder = RemoteFolder::new("/d").unwrap();
    let mut all = Vec::new();

    let mut page = list::list_folder(&client, &folder, false).await.unwrap();
    loop {
        all.extend(page.entries);
        if !page.has_more {
            break;
        }
        page = list::list_folder_continue(&client, &page.cursor).await.unwrap();
    }

    let paths: Vec<&str> = all.iter().map(|e| e.path_display()).collect();
    assert_eq!(paths, vec!["/d/1.txt", "/d/2.txt", "/d/3.txt"]);
    // The .expect(1) on each mock verifies the continue endpoint was hit
    // exactly once, i.e. pagination stopped when has_more went false.
    server.verify().await;
}

#[tokio::test]
async fn test_include_deleted_reaches_the_wire() {
    let (server, client) = common::setup_dbx_mock().await;

    Mock::given(method("POST"))
        .and(path("/2/files/list_folder"))
        .and(body_partial_json(serde_json::json!({
            "path": "/photos",
            "recursive": true,
            "include_deleted": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "entries": [
                {".tag": "deleted", "path_display": "/photos/Old.jpg", "path_lower": "/photos/old.jpg"}
            ],
            "cursor": "c",
            "has_more": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let folder = RemoteFolder::new("/photos").unwrap();
    let page = list::list_folder(&client, &folder, true).await.unwrap();

    assert_eq!(page.entries.len(), 1);
    assert!(matches!(page.entries[0], RemoteEntry::Deleted { .. }));
    server.verify().await;
}

#[tokio::test]
async fn test_listing_error_surfaces() {
    let server = MockServer::start().await;
    let client =
        boxhaul_dropbox::client::DbxClient::with_base_urls("token", server.uri(), server.uri());

    Mock::given(method("POST"))
        .and(path("/2/files/list_folder"))
        .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
            "error_summary": "path/not_found/",
            "error": {".tag": "path", "path": {".tag": "not_found"}}
        })))
        .mount(&server)
        .await;

    let folder = RemoteFolder::new("/missing").unwrap();
    let err = list::list_folder(&client, &folder, false)
        .await
        .expect_err("expected listing failure");

    assert!(err.to_string().contains("path/not_found"));
}
