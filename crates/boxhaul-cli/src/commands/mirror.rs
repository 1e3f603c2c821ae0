//! Mirror command - Download a Dropbox folder to local disk
//!
//! Provides the `boxhaul mirror <REMOTE> <DEST>` CLI command which:
//! 1. Loads credentials from the environment and authorizes the client
//!    (refreshing the access token once if it has expired)
//! 2. Lists the remote folder recursively, page by page
//! 3. Downloads every file, restoring deleted entries from their latest
//!    revision when requested

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use boxhaul_core::config::Config;
use boxhaul_core::domain::credentials::Credentials;
use boxhaul_core::domain::newtypes::RemoteFolder;
use boxhaul_dropbox::auth::authorize;
use boxhaul_dropbox::provider::DropboxRemoteStore;
use boxhaul_mirror::engine::{MirrorEngine, MirrorOptions};
use boxhaul_mirror::progress::NoticeSink;

use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Args)]
pub struct MirrorCommand {
    /// Remote folder path ("" or "/" for the Dropbox root; append "?d=1"
    /// to include deleted files)
    pub remote: String,

    /// Local destination directory
    pub dest: PathBuf,

    /// Restore deleted files from their most recent revision
    #[arg(long)]
    pub include_deleted: bool,
}

impl MirrorCommand {
    pub async fn execute(&self, format: OutputFormat, config: &Config) -> Result<()> {
        let fmt = get_formatter(format);

        // "/" is accepted as an alias for the root, which the API spells "".
        let input = if self.remote == "/" { "" } else { self.remote.as_str() };
        let (folder, suffix_deleted) =
            RemoteFolder::parse_with_flags(input).context("Invalid remote folder path")?;
        let include_deleted = self.include_deleted || suffix_deleted;

        // Step 1: Credentials and authorization probe
        let credentials = Credentials::from_env()
            .context("Set DROPBOX_ACCESS_TOKEN (and optionally DROPBOX_REFRESH_TOKEN, DROPBOX_APP_KEY, DROPBOX_APP_SECRET)")?;

        let authorized = authorize(credentials)
            .await
            .context("Dropbox authorization failed")?;

        info!(account = %authorized.account.account_id, "Authorized");
        if authorized.refreshed {
            fmt.info("Access token was expired and has been refreshed");
        }
        fmt.success(&format!(
            "Authenticated as {}",
            authorized.account.display_name
        ));

        // Step 2: Run the mirror
        let store = Arc::new(DropboxRemoteStore::new(authorized.client));
        let options = MirrorOptions::from_config(&config.mirror, include_deleted);
        let sink: NoticeSink = Arc::new(|message: &str| println!("{message}"));
        let engine = MirrorEngine::new(store, options).with_notice_sink(sink);

        fmt.info(&format!("Mirroring {} into {}", folder, self.dest.display()));
        let report = engine
            .mirror(&folder, &self.dest)
            .await
            .context("Mirror aborted")?;

        // Step 3: Display results
        for error in &report.errors {
            fmt.warn(error);
        }

        if format.is_json() {
            fmt.print_json(&serde_json::json!({
                "folder": folder.as_str(),
                "dest": self.dest.display().to_string(),
                "downloaded": report.downloaded,
                "restored": report.restored,
                "skipped": report.skipped,
                "errors": report.errors,
            }));
        } else {
            fmt.success(&format!(
                "Mirror finished: {} downloaded, {} restored, {} skipped",
                report.downloaded, report.restored, report.skipped
            ));
            if !report.errors.is_empty() {
                fmt.info(&format!("{} file(s) failed, see warnings above", report.errors.len()));
            }
        }

        Ok(())
    }
}
