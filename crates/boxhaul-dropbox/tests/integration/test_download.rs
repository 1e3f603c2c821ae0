//! Integration tests for content download and revision listing

use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use boxhaul_dropbox::files;

use crate::common;

#[tokio::test]
async fn test_download_current_content() {
    let (server, client) = common::setup_dbx_mock().await;

    common::mount_download(&server, r#"{"path":"/a/b.txt"}"#, b"hello from dropbox").await;

    let bytes = files::download(&client, "/a/b.txt", None)
        .await
        .expect("download failed");

    assert_eq!(bytes, b"hello from dropbox");
}

#[tokio::test]
async fn test_download_by_revision() {
    let (server, client) = common::setup_dbx_mock().await;

    common::mount_download(
        &server,
        r#"{"path":"/a/b.txt","rev":"rev-0042"}"#,
        b"old content",
    )
    .await;

    let bytes = files::download(&client, "/a/b.txt", Some("rev-0042"))
        .await
        .expect("revision download failed");

    assert_eq!(bytes, b"old content");
}

#[tokio::test]
async fn test_download_missing_file_is_an_error() {
    let (server, client) = common::setup_dbx_mock().await;

    Mock::given(method("POST"))
        .and(path("/2/files/download"))
        .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
            "error_summary": "path/not_found/"
        })))
        .mount(&server)
        .await;

    let err = files::download(&client, "/gone.txt", None)
        .await
        .expect_err("expected download failure");

    assert!(err.to_string().contains("path/not_found"));
}

#[tokio::test]
async fn test_latest_revision_present() {
    let (server, client) = common::setup_dbx_mock().await;

    Mock::given(method("POST"))
        .and(path("/2/files/list_revisions"))
        .and(body_partial_json(serde_json::json!({
            "path": "/a/deleted.txt",
            "limit": 1
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "is_deleted": true,
            "entries": [
                {"rev": "rev-latest", "size": 512, "client_modified": "2024-02-01T12:00:00Z"}
            ]
        })))
        .mount(&server)
        .await;

    let revision = files::latest_revision(&client, "/a/deleted.txt")
        .await
        .expect("list_revisions failed")
        .expect("expected a revision");

    assert_eq!(revision.rev, "rev-latest");
    assert_eq!(revision.size, 512);
}

#[tokio::test]
async fn test_latest_revision_none_when_no_revisions() {
    let (server, client) = common::setup_dbx_mock().await;

    Mock::given(method("POST"))
        .and(path("/2/files/list_revisions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "is_deleted": true,
            "entries": []
        })))
        .mount(&server)
        .await;

    let revision = files::latest_revision(&client, "/a/empty.txt")
        .await
        .expect("list_revisions failed");

    assert!(revision.is_none());
}
