//! Boxhaul Dropbox - Dropbox API adapter
//!
//! Provides an async client for the Dropbox HTTP API:
//! - Account probing and token revocation
//! - Access-token refresh via the OAuth2 token endpoint
//! - Recursive, paginated folder listing (optionally including deleted
//!   entries)
//! - File content download, current or by revision
//!
//! ## Modules
//!
//! - [`client`] - the HTTP client for RPC and content endpoints
//! - [`auth`] - authorization probe, refresh-and-retry, revocation
//! - [`list`] - folder listing and pagination
//! - [`files`] - content download and revision listing
//! - [`provider`] - the [`IRemoteStore`] adapter over the client
//!
//! [`IRemoteStore`]: boxhaul_core::ports::remote_store::IRemoteStore

pub mod auth;
pub mod client;
pub mod files;
pub mod list;
pub mod provider;

use thiserror::Error;

/// Substring in an `error_summary` that identifies an expired access token.
const EXPIRED_TOKEN_MARKER: &str = "expired_access_token";

/// Errors that can occur when communicating with the Dropbox API
#[derive(Debug, Error)]
pub enum DbxError {
    /// Authentication failed (HTTP 401)
    #[error("Authentication failed: {summary}")]
    Auth {
        /// The `error_summary` from the API response body
        summary: String,
    },

    /// The API rejected the request (non-auth 4xx/5xx)
    #[error("API error ({status}): {summary}")]
    Api {
        /// HTTP status code
        status: u16,
        /// The `error_summary` from the API response body, or the raw body
        summary: String,
    },

    /// A network-level error occurred
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API response could not be parsed or was malformed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl DbxError {
    /// Whether this is an authentication failure.
    #[must_use]
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    /// Whether this is an authentication failure caused by an expired
    /// access token, the one case the refresh-and-retry path recovers
    /// from.
    #[must_use]
    pub fn is_expired_token(&self) -> bool {
        matches!(self, Self::Auth { summary } if summary.contains(EXPIRED_TOKEN_MARKER))
    }
}
