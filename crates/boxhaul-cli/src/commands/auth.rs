//! Auth commands - Status and Revoke for the Dropbox access token
//!
//! Provides the `boxhaul auth` CLI subcommands which:
//! 1. `status` - Probes the API with the configured token (refreshing it
//!    once if expired) and shows the authenticated account.
//! 2. `revoke` - Invalidates the configured access token.

use anyhow::{Context, Result};
use clap::Subcommand;
use tracing::info;

use boxhaul_core::domain::credentials::Credentials;
use boxhaul_dropbox::auth::{authorize, revoke_token};
use boxhaul_dropbox::client::DbxClient;

use crate::output::{get_formatter, OutputFormat, OutputFormatter};

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Check that the configured token works and show the account
    Status,
    /// Invalidate the configured access token
    Revoke,
}

impl AuthCommand {
    pub async fn execute(&self, format: OutputFormat) -> Result<()> {
        let fmt = get_formatter(format);
        match self {
            AuthCommand::Status => self.execute_status(&*fmt, format).await,
            AuthCommand::Revoke => self.execute_revoke(&*fmt).await,
        }
    }

    /// Probe the API and report the authenticated account.
    async fn execute_status(&self, fmt: &dyn OutputFormatter, format: OutputFormat) -> Result<()> {
        let credentials = Credentials::from_env()
            .context("Set DROPBOX_ACCESS_TOKEN (and optionally the refresh variables)")?;
        let can_refresh = credentials.can_refresh();

        let authorized = authorize(credentials)
            .await
            .context("Dropbox authorization failed")?;

        if format.is_json() {
            fmt.print_json(&serde_json::json!({
                "authenticated": true,
                "account_id": authorized.account.account_id,
                "display_name": authorized.account.display_name,
                "email": authorized.account.email,
                "refreshable": can_refresh,
                "token_refreshed": authorized.refreshed,
            }));
        } else {
            fmt.success(&format!(
                "Authenticated as {}",
                authorized.account.display_name
            ));
            if let Some(email) = &authorized.account.email {
                fmt.info(&format!("Email:      {email}"));
            }
            fmt.info(&format!("Account ID: {}", authorized.account.account_id));
            fmt.info(&format!(
                "Refresh:    {}",
                if can_refresh { "configured" } else { "not configured" }
            ));
            if authorized.refreshed {
                fmt.info("Access token was expired and has been refreshed");
            }
        }

        Ok(())
    }

    /// Revoke the access token. The token is dead afterwards even if it
    /// was never valid for anything else.
    async fn execute_revoke(&self, fmt: &dyn OutputFormatter) -> Result<()> {
        let credentials = Credentials::from_env().context("Set DROPBOX_ACCESS_TOKEN")?;

        let client = DbxClient::new(&credentials.access_token);
        revoke_token(&client)
            .await
            .context("Token revocation failed")?;

        info!("Token revoked");
        fmt.success("Access token revoked");
        Ok(())
    }
}
