//! Dropbox API HTTP client
//!
//! Provides a typed HTTP client for the Dropbox API. Dropbox splits its
//! surface across two hosts: `api.dropboxapi.com` for JSON RPC endpoints
//! and `content.dropboxapi.com` for content transfer, where the request
//! arguments travel in the `Dropbox-API-Arg` header.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use boxhaul_dropbox::client::DbxClient;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = DbxClient::new("access-token-here");
//! let account = client.get_current_account().await?;
//! println!("Hello, {}", account.display_name);
//! # Ok(())
//! # }
//! ```

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::DbxError;

/// Base URL for Dropbox RPC endpoints
const API_BASE_URL: &str = "https://api.dropboxapi.com";

/// Base URL for Dropbox content endpoints
const CONTENT_BASE_URL: &str = "https://content.dropboxapi.com";

// ============================================================================
// Dropbox API response types
// ============================================================================

/// Error body returned by the Dropbox API on failures
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    /// Human-oriented summary, e.g. `expired_access_token/...`
    error_summary: String,
}

/// Response from `/2/users/get_current_account`
#[derive(Debug, Deserialize)]
struct CurrentAccountResponse {
    account_id: String,
    name: AccountName,
    email: Option<String>,
}

/// Name facet of the current-account response
#[derive(Debug, Deserialize)]
struct AccountName {
    display_name: String,
}

/// Identity of the authenticated account
#[derive(Debug, Clone)]
pub struct AccountInfo {
    /// Dropbox account ID
    pub account_id: String,
    /// User's display name
    pub display_name: String,
    /// User's email, when the scope allows reading it
    pub email: Option<String>,
}

// ============================================================================
// DbxClient
// ============================================================================

/// HTTP client for Dropbox API calls
///
/// Wraps `reqwest::Client` with bearer authentication and base URL
/// construction for both the RPC and content hosts.
#[derive(Debug)]
pub struct DbxClient {
    /// The underlying HTTP client
    http: Client,
    /// Base URL for RPC endpoints
    api_base: String,
    /// Base URL for content endpoints
    content_base: String,
    /// Current OAuth2 access token
    access_token: String,
}

impl DbxClient {
    /// Creates a new DbxClient with the given access token
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_base_urls(access_token, API_BASE_URL, CONTENT_BASE_URL)
    }

    /// Creates a new DbxClient with custom base URLs (useful for testing)
    pub fn with_base_urls(
        access_token: impl Into<String>,
        api_base: impl Into<String>,
        content_base: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            api_base: api_base.into(),
            content_base: content_base.into(),
            access_token: access_token.into(),
        }
    }

    /// Updates the access token (e.g., after a token refresh)
    pub fn set_access_token(&mut self, token: impl Into<String>) {
        self.access_token = token.into();
        debug!("Updated DbxClient access token");
    }

    /// Returns a reference to the current access token
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Returns the base URL for RPC endpoints
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Returns the base URL for content endpoints
    pub fn content_base(&self) -> &str {
        &self.content_base
    }

    /// Returns a reference to the underlying HTTP client
    ///
    /// Used by the auth module for the token endpoint, which takes form
    /// data instead of bearer-authenticated JSON.
    pub(crate) fn http_client(&self) -> &Client {
        &self.http
    }

    /// Creates an authenticated POST builder for an RPC endpoint
    ///
    /// All Dropbox RPC endpoints are POST with a JSON body.
    pub(crate) fn rpc_request(&self, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.api_base, path);
        self.http.post(&url).bearer_auth(&self.access_token)
    }

    /// Calls an RPC endpoint and deserializes the JSON response
    pub(crate) async fn rpc<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, DbxError> {
        let response = self.rpc_request(path).json(body).send().await?;
        let response = Self::check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| DbxError::InvalidResponse(format!("{path}: {e}")))
    }

    /// Calls an RPC endpoint whose response body is irrelevant
    pub(crate) async fn rpc_empty(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<(), DbxError> {
        let response = self.rpc_request(path).json(body).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    /// Calls a content endpoint and returns the raw response bytes
    ///
    /// The request argument is JSON-encoded into the `Dropbox-API-Arg`
    /// header, as the content host requires.
    pub(crate) async fn content_download(
        &self,
        path: &str,
        arg: &impl Serialize,
    ) -> Result<Vec<u8>, DbxError> {
        let url = format!("{}{}", self.content_base, path);
        let arg_json = serde_json::to_string(arg)
            .map_err(|e| DbxError::InvalidResponse(format!("encoding Dropbox-API-Arg: {e}")))?;

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.access_token)
            .header("Dropbox-API-Arg", arg_json)
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let bytes = response.bytes().await?;
        debug!(bytes = bytes.len(), path, "content download complete");
        Ok(bytes.to_vec())
    }

    /// Maps a non-success response to a typed [`DbxError`]
    ///
    /// The Dropbox API reports failures as JSON with an `error_summary`
    /// field; when the body is not JSON (e.g. proxy errors), the raw text
    /// is used instead.
    async fn check_status(response: Response) -> Result<Response, DbxError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let summary = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.error_summary)
            .unwrap_or(body);

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(DbxError::Auth { summary });
        }
        Err(DbxError::Api {
            status: status.as_u16(),
            summary,
        })
    }

    /// Retrieves the identity of the authenticated account
    ///
    /// `POST /2/users/get_current_account`. Used as the authentication
    /// probe: an expired token surfaces here before any real work starts.
    pub async fn get_current_account(&self) -> Result<AccountInfo, DbxError> {
        debug!("Probing /2/users/get_current_account");
        let account: CurrentAccountResponse = self
            .rpc("/2/users/get_current_account", &serde_json::Value::Null)
            .await?;

        Ok(AccountInfo {
            account_id: account.account_id,
            display_name: account.name.display_name,
            email: account.email,
        })
    }
}
