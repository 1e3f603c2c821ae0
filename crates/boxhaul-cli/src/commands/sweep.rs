//! Sweep command - Delete sidecar files from a directory tree
//!
//! Provides the `boxhaul sweep <DIR>` CLI command which walks the tree,
//! deletes every file with a configured sidecar extension, and appends
//! each action to a plain-text log file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use boxhaul_core::config::Config;
use boxhaul_sweep::{Journal, Sweeper};

use crate::output::{get_formatter, OutputFormat};

#[derive(Debug, Args)]
pub struct SweepCommand {
    /// Directory tree to sweep
    pub dir: PathBuf,

    /// Write the sweep log to this file instead of the configured one
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl SweepCommand {
    pub async fn execute(&self, format: OutputFormat, config: &Config) -> Result<()> {
        let fmt = get_formatter(format);

        let log_path = self
            .log_file
            .clone()
            .unwrap_or_else(|| config.sweep.log_file.clone());
        let mut journal = Journal::open(&log_path)
            .with_context(|| format!("Cannot open sweep log {}", log_path.display()))?;

        let sweeper = Sweeper::from_config(&config.sweep);
        let report = sweeper
            .sweep(&self.dir, &mut journal)
            .with_context(|| format!("Sweep of {} failed", self.dir.display()))?;

        if format.is_json() {
            fmt.print_json(&serde_json::json!({
                "dir": self.dir.display().to_string(),
                "deleted": report.deleted,
                "failed": report.failed,
                "log_file": log_path.display().to_string(),
            }));
        } else if report.nothing_found() {
            fmt.success(&format!(
                "No {} files found in {}",
                config.sweep.extensions.join("/"),
                self.dir.display()
            ));
        } else {
            fmt.success(&format!(
                "Deleted {} file(s), {} failed",
                report.deleted, report.failed
            ));
            fmt.info(&format!("Log written to {}", log_path.display()));
        }

        Ok(())
    }
}
