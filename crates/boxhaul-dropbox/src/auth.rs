//! Authorization: probe, refresh-and-retry, revocation
//!
//! A working client is obtained by probing a privileged endpoint first.
//! When the probe fails because the access token has expired and refresh
//! keys are available, the refresh token is exchanged for a new access
//! token at the OAuth2 token endpoint and the probe is retried exactly
//! once. Any other authentication failure propagates unmodified.
//!
//! Credentials flow through by value: [`authorize`] consumes a
//! [`Credentials`] and returns the (possibly renewed) holder inside the
//! [`Authorized`] result. Nothing is written back to the environment.

use serde::Deserialize;
use tracing::{debug, info, warn};

use boxhaul_core::domain::credentials::{Credentials, RefreshKeys};

use crate::client::{AccountInfo, DbxClient};
use crate::DbxError;

/// Path of the OAuth2 token endpoint on the API host
const OAUTH2_TOKEN_PATH: &str = "/oauth2/token";

/// Path of the token revocation endpoint
const TOKEN_REVOKE_PATH: &str = "/2/auth/token/revoke";

// ============================================================================
// Token refresh
// ============================================================================

/// Response from the OAuth2 token endpoint
#[derive(Debug, Deserialize)]
struct RefreshResponse {
    /// The new short-lived access token
    access_token: String,
    /// Seconds until the new token expires
    #[allow(dead_code)]
    expires_in: Option<u64>,
}

/// Exchanges a refresh token for a new access token.
///
/// `POST /oauth2/token` with form fields `grant_type=refresh_token`,
/// `refresh_token`, `client_id` and `client_secret`, per the Dropbox
/// OAuth2 contract. No backoff and no retry; the caller decides what a
/// failure means.
pub async fn refresh_access_token(
    client: &DbxClient,
    keys: &RefreshKeys,
) -> Result<String, DbxError> {
    info!("Refreshing access token");

    let url = format!("{}{}", client.api_base(), OAUTH2_TOKEN_PATH);
    let params = [
        ("grant_type", "refresh_token"),
        ("refresh_token", keys.refresh_token.as_str()),
        ("client_id", keys.app_key.as_str()),
        ("client_secret", keys.app_secret.as_str()),
    ];

    let response = client.http_client().post(&url).form(&params).send().await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "Token refresh rejected");
        return Err(DbxError::Api {
            status: status.as_u16(),
            summary: body,
        });
    }

    let refreshed: RefreshResponse = response
        .json()
        .await
        .map_err(|e| DbxError::InvalidResponse(format!("token endpoint: {e}")))?;

    info!("Successfully refreshed access token");
    Ok(refreshed.access_token)
}

// ============================================================================
// Authorization probe
// ============================================================================

/// Result of a successful authorization
#[derive(Debug)]
pub struct Authorized {
    /// A client whose token passed the probe
    pub client: DbxClient,
    /// The credential holder, renewed if a refresh occurred
    pub credentials: Credentials,
    /// Identity of the authenticated account
    pub account: AccountInfo,
    /// Whether a token refresh happened on the way
    pub refreshed: bool,
}

/// Obtains a working client against the production endpoints.
pub async fn authorize(credentials: Credentials) -> Result<Authorized, DbxError> {
    let client = DbxClient::new(&credentials.access_token);
    probe_and_refresh(client, credentials).await
}

/// Obtains a working client against custom endpoints (useful for testing).
pub async fn authorize_with_base_urls(
    credentials: Credentials,
    api_base: impl Into<String>,
    content_base: impl Into<String>,
) -> Result<Authorized, DbxError> {
    let client = DbxClient::with_base_urls(&credentials.access_token, api_base, content_base);
    probe_and_refresh(client, credentials).await
}

/// Probe with `get_current_account`; on an expired-token failure with
/// refresh keys available, refresh and retry once.
async fn probe_and_refresh(
    mut client: DbxClient,
    credentials: Credentials,
) -> Result<Authorized, DbxError> {
    match client.get_current_account().await {
        Ok(account) => {
            debug!(account = %account.account_id, "Authorization probe succeeded");
            Ok(Authorized {
                client,
                credentials,
                account,
                refreshed: false,
            })
        }
        Err(err) if err.is_expired_token() => {
            let Some(keys) = credentials.refresh.as_ref() else {
                warn!("Access token expired and no refresh keys are configured");
                return Err(err);
            };

            let new_token = refresh_access_token(&client, keys).await?;
            client.set_access_token(&new_token);
            let credentials = credentials.with_access_token(new_token);

            // Single retry; a second failure propagates.
            let account = client.get_current_account().await?;
            info!(account = %account.account_id, "Authorization succeeded after refresh");
            Ok(Authorized {
                client,
                credentials,
                account,
                refreshed: true,
            })
        }
        Err(err) => Err(err),
    }
}

// ============================================================================
// Token revocation
// ============================================================================

/// Invalidates the client's access token.
///
/// `POST /2/auth/token/revoke`. The endpoint returns an empty body.
pub async fn revoke_token(client: &DbxClient) -> Result<(), DbxError> {
    info!("Revoking access token");
    client
        .rpc_empty(TOKEN_REVOKE_PATH, &serde_json::Value::Null)
        .await?;
    info!("Access token revoked");
    Ok(())
}
