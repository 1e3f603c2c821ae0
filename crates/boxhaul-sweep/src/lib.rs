//! Sidecar file sweep
//!
//! Action-camera footage leaves low-resolution proxy (`.lrv`) and
//! thumbnail (`.thm`) files next to the real videos. This crate walks a
//! directory tree, deletes every file whose extension matches a
//! configured set, and records each action in a plain-text journal.

pub mod journal;
pub mod sweeper;

pub use journal::Journal;
pub use sweeper::{SweepReport, Sweeper};

use std::path::PathBuf;

/// Errors that abort a sweep before any file is touched.
#[derive(Debug, thiserror::Error)]
pub enum SweepError {
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Journal error: {0:#}")]
    Journal(anyhow::Error),
}
