//! Boxhaul Mirror - folder mirroring engine
//!
//! Downloads a remote folder's subtree to local disk, preserving the
//! directory structure, with optional restoration of deleted files from
//! their most recent revision.
//!
//! ## Modules
//!
//! - [`engine`] - the mirroring loop: pagination, path reconstruction,
//!   per-entry failure handling
//! - [`progress`] - the advisory stall notice for slow transfers

pub mod engine;
pub mod progress;

use thiserror::Error;

/// Errors that abort a mirror run
///
/// Per-entry failures never surface here; they are recorded in the
/// [`MirrorReport`] and the run continues.
///
/// [`MirrorReport`]: engine::MirrorReport
#[derive(Debug, Error)]
pub enum MirrorError {
    /// A listing call failed; without a cursor there is nothing to
    /// continue from, so the whole run aborts.
    #[error("Folder listing failed: {0:#}")]
    Listing(anyhow::Error),
}
