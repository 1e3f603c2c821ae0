//! Recursive sidecar sweep
//!
//! Walks a directory tree with `walkdir` and deletes every regular file
//! whose extension is in the configured set (matched case-insensitively).
//! Each deletion and each failure is journaled and traced; failures do
//! not stop the walk.

use std::path::Path;

use boxhaul_core::config::SweepConfig;
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::journal::Journal;
use crate::SweepError;

/// Summary of a completed sweep run
#[derive(Debug, Clone, Default)]
pub struct SweepReport {
    /// Number of files deleted
    pub deleted: u32,
    /// Number of matching files that could not be deleted
    pub failed: u32,
}

impl SweepReport {
    /// True when the tree contained no matching files at all.
    pub fn nothing_found(&self) -> bool {
        self.deleted == 0 && self.failed == 0
    }
}

/// Deletes sidecar files under a root directory.
pub struct Sweeper {
    extensions: Vec<String>,
}

impl Sweeper {
    /// Creates a sweeper for the given extensions (lowercase, no dot).
    pub fn new(extensions: Vec<String>) -> Self {
        let extensions = extensions.into_iter().map(|e| e.to_lowercase()).collect();
        Self { extensions }
    }

    /// Creates a sweeper from the sweep section of the config file.
    pub fn from_config(config: &SweepConfig) -> Self {
        Self::new(config.extensions.clone())
    }

    /// Sweeps the tree rooted at `root`, journaling every action.
    ///
    /// Unreadable subtrees and failed deletions are journaled and
    /// counted, never fatal. Only a missing or non-directory root
    /// aborts.
    pub fn sweep(&self, root: &Path, journal: &mut Journal) -> Result<SweepReport, SweepError> {
        if !root.is_dir() {
            return Err(SweepError::NotADirectory(root.to_path_buf()));
        }

        journal
            .info(&format!("Sweep started in {}", root.display()))
            .map_err(SweepError::Journal)?;

        let mut report = SweepReport::default();
        for entry in WalkDir::new(root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable entry");
                    let _ = journal.error(&format!("Skipping unreadable entry: {e}"));
                    continue;
                }
            };
            if !entry.file_type().is_file() || !self.matches(entry.path()) {
                continue;
            }

            match std::fs::remove_file(entry.path()) {
                Ok(()) => {
                    info!(path = %entry.path().display(), "Deleted");
                    let _ = journal.info(&format!("Deleted: {}", entry.path().display()));
                    report.deleted += 1;
                }
                Err(e) => {
                    warn!(path = %entry.path().display(), error = %e, "Delete failed");
                    let _ = journal
                        .error(&format!("Failed to delete {}: {e}", entry.path().display()));
                    report.failed += 1;
                }
            }
        }

        if report.nothing_found() {
            info!("No matching files found");
            let _ = journal.info("No matching files found");
        }
        let _ = journal.info(&format!(
            "Sweep finished: {} deleted, {} failed",
            report.deleted, report.failed
        ));
        journal.flush().map_err(SweepError::Journal)?;

        Ok(report)
    }

    fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
            .unwrap_or(false)
    }
}
