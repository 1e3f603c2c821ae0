//! Folder mirroring engine
//!
//! The [`MirrorEngine`] walks a remote folder listing page by page and
//! materializes every file entry under a local root, reconstructing the
//! relative directory structure from display paths.
//!
//! ## Mirror Flow
//!
//! 1. **List**: start a recursive listing, optionally including deleted
//!    entries
//! 2. **Process**: handle each page's entries in received order -- files
//!    are downloaded, deleted entries (when requested) are restored from
//!    their most recent revision, folders are skipped
//! 3. **Continue**: follow the continuation cursor until the provider
//!    reports no more pages
//!
//! ## Failure Policy
//!
//! Per-entry failures are recorded in the [`MirrorReport`] and the run
//! continues with the next entry. A listing failure aborts the run:
//! without a cursor there is no way to resume.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use boxhaul_core::config::MirrorConfig;
use boxhaul_core::domain::newtypes::RemoteFolder;
use boxhaul_core::ports::remote_store::{IRemoteStore, RemoteEntry};

use crate::progress::{tracing_sink, NoticeSink, StallNotice};
use crate::MirrorError;

/// Message emitted while a transfer is stalling.
const STALL_MESSAGE: &str = "Downloading... Please wait.";

// ============================================================================
// MirrorReport
// ============================================================================

/// Summary of a completed mirror run
#[derive(Debug, Clone, Default)]
pub struct MirrorReport {
    /// Number of current files downloaded
    pub downloaded: u32,
    /// Number of deleted files restored from a revision
    pub restored: u32,
    /// Number of deleted entries skipped because they have no revisions
    pub skipped: u32,
    /// Per-entry failures (non-fatal)
    pub errors: Vec<String>,
}

// ============================================================================
// Options
// ============================================================================

/// Options for one mirror run
#[derive(Debug, Clone)]
pub struct MirrorOptions {
    /// Whether to restore deleted entries from their latest revision
    pub include_deleted: bool,
    /// How long a transfer runs before the stall notice starts
    pub stall_notice: Duration,
    /// Interval between stall notice messages once active
    pub stall_poll: Duration,
}

impl MirrorOptions {
    /// Builds options from the mirror section of the config file.
    pub fn from_config(config: &MirrorConfig, include_deleted: bool) -> Self {
        Self {
            include_deleted,
            stall_notice: Duration::from_secs(config.stall_notice_secs),
            stall_poll: Duration::from_secs(config.stall_poll_secs),
        }
    }
}

impl Default for MirrorOptions {
    fn default() -> Self {
        Self::from_config(&MirrorConfig::default(), false)
    }
}

// ============================================================================
// Path reconstruction
// ============================================================================

/// Computes the local destination for a remote entry.
///
/// Strips the queried folder's path from the entry's display path,
/// strips leading separators, and joins the remaining components onto
/// `local_root` with OS-appropriate separators. For folder `/A/B` and
/// entry `/A/B/c/d.txt` the result is `<local_root>/c/d.txt`.
pub fn local_destination(folder: &RemoteFolder, path_display: &str, local_root: &Path) -> PathBuf {
    let relative = path_display
        .get(folder.as_str().len()..)
        .unwrap_or("")
        .trim_start_matches('/');

    let mut destination = local_root.to_path_buf();
    for component in relative.split('/').filter(|c| !c.is_empty()) {
        destination.push(component);
    }
    destination
}

/// Writes `data` to `path` atomically: parent directories are created,
/// content lands in a sibling temp file first, and a rename makes it
/// visible.
async fn write_local(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Creating {}", parent.display()))?;
    }

    let tmp_path = {
        let mut p = path.as_os_str().to_owned();
        p.push(".part");
        PathBuf::from(p)
    };

    tokio::fs::write(&tmp_path, data)
        .await
        .with_context(|| format!("Writing {}", tmp_path.display()))?;
    tokio::fs::rename(&tmp_path, path)
        .await
        .with_context(|| format!("Renaming into {}", path.display()))?;
    Ok(())
}

// ============================================================================
// MirrorEngine
// ============================================================================

/// Mirrors a remote folder subtree to local disk, one file at a time.
pub struct MirrorEngine {
    store: Arc<dyn IRemoteStore>,
    options: MirrorOptions,
    notice_sink: NoticeSink,
}

impl MirrorEngine {
    /// Creates an engine over the given remote store.
    pub fn new(store: Arc<dyn IRemoteStore>, options: MirrorOptions) -> Self {
        Self {
            store,
            options,
            notice_sink: tracing_sink(),
        }
    }

    /// Replaces the sink the stall notice emits to (e.g. the console).
    #[must_use]
    pub fn with_notice_sink(mut self, sink: NoticeSink) -> Self {
        self.notice_sink = sink;
        self
    }

    /// Runs the mirror: every current file in the remote subtree ends up
    /// under `local_root`, plus -- when `include_deleted` is set -- the
    /// latest-revision content of every deleted entry.
    pub async fn mirror(
        &self,
        folder: &RemoteFolder,
        local_root: &Path,
    ) -> Result<MirrorReport, MirrorError> {
        info!(folder = %folder, root = %local_root.display(), "Listing folder");

        let mut report = MirrorReport::default();
        let mut page = self
            .store
            .list_folder(folder, self.options.include_deleted)
            .await
            .map_err(MirrorError::Listing)?;

        loop {
            let entries = std::mem::take(&mut page.entries);
            for entry in entries {
                self.process_entry(folder, local_root, entry, &mut report)
                    .await;
            }

            if !page.has_more {
                break;
            }
            page = self
                .store
                .list_folder_continue(&page.cursor)
                .await
                .map_err(MirrorError::Listing)?;
        }

        info!(
            downloaded = report.downloaded,
            restored = report.restored,
            skipped = report.skipped,
            errors = report.errors.len(),
            "Mirror complete"
        );
        Ok(report)
    }

    /// Handles one listing entry. Failures are recorded, never raised.
    async fn process_entry(
        &self,
        folder: &RemoteFolder,
        local_root: &Path,
        entry: RemoteEntry,
        report: &mut MirrorReport,
    ) {
        match entry {
            RemoteEntry::Folder { path_display, .. } => {
                // Directories materialize as parents of their files.
                debug!(path = %path_display, "Skipping folder entry");
            }
            RemoteEntry::File {
                path_display,
                path_lower,
                ..
            } => {
                let destination = local_destination(folder, &path_display, local_root);
                info!(remote = %path_display, local = %destination.display(), "File");

                match self.fetch_current(&path_lower, &destination).await {
                    Ok(()) => {
                        info!(remote = %path_display, local = %destination.display(), "Downloaded");
                        report.downloaded += 1;
                    }
                    Err(e) => {
                        warn!(remote = %path_display, error = %format!("{e:#}"), "Download failed");
                        report.errors.push(format!("{path_display}: {e:#}"));
                    }
                }
            }
            RemoteEntry::Deleted {
                path_display,
                path_lower,
            } => {
                if !self.options.include_deleted {
                    debug!(path = %path_display, "Ignoring deleted entry");
                    return;
                }

                let destination = local_destination(folder, &path_display, local_root);
                info!(remote = %path_display, local = %destination.display(), "Deleted file (will download as restored)");

                match self.restore_deleted(&path_lower, &destination).await {
                    Ok(true) => {
                        info!(remote = %path_display, "Restored from latest revision");
                        report.restored += 1;
                    }
                    Ok(false) => {
                        info!(remote = %path_display, "No revisions found for deleted file");
                        report.skipped += 1;
                    }
                    Err(e) => {
                        warn!(remote = %path_display, error = %format!("{e:#}"), "Restore failed");
                        report.errors.push(format!("{path_display}: {e:#}"));
                    }
                }
            }
        }
    }

    /// Downloads the current content of a file and writes it locally.
    async fn fetch_current(&self, path_lower: &str, destination: &Path) -> Result<()> {
        let notice = self.start_notice();
        let result = self.store.download(path_lower).await;
        notice.stop().await;

        let data = result?;
        write_local(destination, &data).await
    }

    /// Restores a deleted file from its most recent revision.
    ///
    /// Returns `Ok(false)` when the file has no revisions; that is a
    /// skip, not an error.
    async fn restore_deleted(&self, path_lower: &str, destination: &Path) -> Result<bool> {
        let Some(revision) = self.store.latest_revision(path_lower).await? else {
            return Ok(false);
        };

        let notice = self.start_notice();
        let result = self.store.download_revision(path_lower, &revision.rev).await;
        notice.stop().await;

        let data = result?;
        write_local(destination, &data).await?;
        Ok(true)
    }

    fn start_notice(&self) -> StallNotice {
        StallNotice::start(
            self.options.stall_notice,
            self.options.stall_poll,
            STALL_MESSAGE,
            self.notice_sink.clone(),
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
