//! Explicit credential holder
//!
//! Credentials are loaded once from the environment and passed by value
//! through the call chain. A token refresh produces a *new* `Credentials`
//! value; nothing here mutates shared state or writes back to the
//! environment.

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// Environment variable holding the access token.
pub const ENV_ACCESS_TOKEN: &str = "DROPBOX_ACCESS_TOKEN";
/// Environment variable holding the refresh token.
pub const ENV_REFRESH_TOKEN: &str = "DROPBOX_REFRESH_TOKEN";
/// Environment variable holding the app key (OAuth client id).
pub const ENV_APP_KEY: &str = "DROPBOX_APP_KEY";
/// Environment variable holding the app secret (OAuth client secret).
pub const ENV_APP_SECRET: &str = "DROPBOX_APP_SECRET";

/// The key material needed to exchange a refresh token for a new
/// access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshKeys {
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// App key, sent as `client_id`.
    pub app_key: String,
    /// App secret, sent as `client_secret`.
    pub app_secret: String,
}

/// Credentials for one invocation.
///
/// `refresh` is `None` for the static-token configuration, in which case
/// an expired access token is unrecoverable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Bearer token for authenticating API requests.
    pub access_token: String,
    /// Optional refresh key material.
    pub refresh: Option<RefreshKeys>,
}

impl Credentials {
    /// Create credentials from a static access token.
    pub fn from_token(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh: None,
        }
    }

    /// Load credentials from environment variables.
    ///
    /// `DROPBOX_ACCESS_TOKEN` is required. The refresh keys are picked up
    /// only when all three of `DROPBOX_REFRESH_TOKEN`, `DROPBOX_APP_KEY`
    /// and `DROPBOX_APP_SECRET` are set.
    pub fn from_env() -> Result<Self, DomainError> {
        let access_token = std::env::var(ENV_ACCESS_TOKEN)
            .map_err(|_| DomainError::MissingEnvVar(ENV_ACCESS_TOKEN.to_string()))?;

        let refresh = match (
            std::env::var(ENV_REFRESH_TOKEN),
            std::env::var(ENV_APP_KEY),
            std::env::var(ENV_APP_SECRET),
        ) {
            (Ok(refresh_token), Ok(app_key), Ok(app_secret)) => Some(RefreshKeys {
                refresh_token,
                app_key,
                app_secret,
            }),
            _ => None,
        };

        Ok(Self {
            access_token,
            refresh,
        })
    }

    /// Whether these credentials can recover from an expired access token.
    #[must_use]
    pub fn can_refresh(&self) -> bool {
        self.refresh.is_some()
    }

    /// Return a copy of these credentials with a new access token,
    /// keeping the refresh keys.
    #[must_use]
    pub fn with_access_token(&self, access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh: self.refresh.clone(),
        }
    }
}
