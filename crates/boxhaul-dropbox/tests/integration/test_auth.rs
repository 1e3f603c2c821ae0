//! Integration tests for the authorization probe, refresh-and-retry,
//! and token revocation

use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use boxhaul_core::domain::credentials::{Credentials, RefreshKeys};
use boxhaul_dropbox::auth;

use crate::common;

fn refreshable_credentials(access_token: &str) -> Credentials {
    Credentials {
        access_token: access_token.to_string(),
        refresh: Some(RefreshKeys {
            refresh_token: "rt-12345".to_string(),
            app_key: "app-key".to_string(),
            app_secret: "app-secret".to_string(),
        }),
    }
}

fn expired_token_response() -> ResponseTemplate {
    ResponseTemplate::new(401).set_body_json(serde_json::json!({
        "error_summary": "expired_access_token/...",
        "error": {".tag": "expired_access_token"}
    }))
}

#[tokio::test]
async fn test_authorize_with_valid_token() {
    let (server, _client) = common::setup_dbx_mock().await;
    common::mount_current_account(&server).await;

    let authorized = auth::authorize_with_base_urls(
        Credentials::from_token("valid-token"),
        server.uri(),
        server.uri(),
    )
    .await
    .expect("authorize failed");

    assert!(!authorized.refreshed);
    assert_eq!(authorized.account.account_id, "dbid:test-account");
    assert_eq!(authorized.credentials.access_token, "valid-token");
}

#[tokio::test]
async fn test_expired_token_triggers_exactly_one_refresh_and_retry() {
    let server = MockServer::start().await;

    // The stale token always gets 401 expired_access_token.
    Mock::given(method("POST"))
        .and(path("/2/users/get_current_account"))
        .and(header("authorization", "Bearer stale-token"))
        .respond_with(expired_token_response())
        .expect(1)
        .mount(&server)
        .await;

    // The token endpoint exchanges the refresh token exactly once.
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=rt-12345"))
        .and(body_string_contains("client_id=app-key"))
        .and(body_string_contains("client_secret=app-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "sl.fresh-token",
            "token_type": "bearer",
            "expires_in": 14400
        })))
        .expect(1)
        .mount(&server)
        .await;

    // Only the refreshed token passes the retried probe.
    Mock::given(method("POST"))
        .and(path("/2/users/get_current_account"))
        .and(header("authorization", "Bearer sl.fresh-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "account_id": "dbid:refreshed",
            "name": { "display_name": "Test User" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let authorized = auth::authorize_with_base_urls(
        refreshable_credentials("stale-token"),
        server.uri(),
        server.uri(),
    )
    .await
    .expect("authorize should recover via refresh");

    assert!(authorized.refreshed);
    assert_eq!(authorized.credentials.access_token, "sl.fresh-token");
    assert!(authorized.credentials.can_refresh());
    server.verify().await;
}

#[tokio::test]
async fn test_other_auth_failure_propagates_without_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/2/users/get_current_account"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error_summary": "invalid_access_token/...",
            "error": {".tag": "invalid_access_token"}
        })))
        .mount(&server)
        .await;

    // The token endpoint must never be touched.
    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = auth::authorize_with_base_urls(
        refreshable_credentials("revoked-token"),
        server.uri(),
        server.uri(),
    )
    .await
    .expect_err("expected auth failure");

    assert!(err.is_auth());
    assert!(!err.is_expired_token());
    server.verify().await;
}

#[tokio::test]
async fn test_expired_token_without_refresh_keys_propagates() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/2/users/get_current_account"))
        .respond_with(expired_token_response())
        .mount(&server)
        .await;

    let err = auth::authorize_with_base_urls(
        Credentials::from_token("stale-static-token"),
        server.uri(),
        server.uri(),
    )
    .await
    .expect_err("expected expiry to propagate");

    assert!(err.is_expired_token());
}

#[tokio::test]
async fn test_revoke_token() {
    let (server, client) = common::setup_dbx_mock().await;

    Mock::given(method("POST"))
        .and(path("/2/auth/token/revoke"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    auth::revoke_token(&client).await.expect("revoke failed");
    server.verify().await;
}

#[tokio::test]
async fn test_revoke_with_bad_token_fails() {
    let (server, client) = common::setup_dbx_mock().await;

    Mock::given(method("POST"))
        .and(path("/2/auth/token/revoke"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error_summary": "invalid_access_token/..."
        })))
        .mount(&server)
        .await;

    let err = auth::revoke_token(&client).await.expect_err("expected failure");
    assert!(err.is_auth());
}
