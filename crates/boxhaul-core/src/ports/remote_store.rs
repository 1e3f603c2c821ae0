//! Remote store port (driven/secondary port)
//!
//! Defines the interface for listing and downloading remote content.
//! The primary implementation targets Dropbox, but nothing in the mirror
//! engine depends on Dropbox specifics.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because errors at port boundaries are
//!   adapter-specific and don't need domain-level classification.
//! - `RemoteEntry` is a port-level DTO produced transiently per listing
//!   page; it is never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::newtypes::RemoteFolder;

/// An item returned by a remote folder listing.
///
/// A tagged sum over the three entry kinds the listing API reports.
/// Every variant carries the display path (original casing, used for
/// local path reconstruction) and the lowercase lookup path (used for
/// API calls).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RemoteEntry {
    /// A current file.
    File {
        /// Display path with original casing.
        path_display: String,
        /// Lowercase path used for API lookups.
        path_lower: String,
        /// File size in bytes.
        size: u64,
        /// Client-reported modification time, when known.
        client_modified: Option<DateTime<Utc>>,
    },
    /// A deleted-file placeholder.
    Deleted {
        /// Display path with original casing.
        path_display: String,
        /// Lowercase path used for API lookups.
        path_lower: String,
    },
    /// A folder.
    Folder {
        /// Display path with original casing.
        path_display: String,
        /// Lowercase path used for API lookups.
        path_lower: String,
    },
}

impl RemoteEntry {
    /// The display path of this entry, whatever its kind.
    #[must_use]
    pub fn path_display(&self) -> &str {
        match self {
            Self::File { path_display, .. }
            | Self::Deleted { path_display, .. }
            | Self::Folder { path_display, .. } => path_display,
        }
    }

    /// The lowercase lookup path of this entry, whatever its kind.
    #[must_use]
    pub fn path_lower(&self) -> &str {
        match self {
            Self::File { path_lower, .. }
            | Self::Deleted { path_lower, .. }
            | Self::Folder { path_lower, .. } => path_lower,
        }
    }
}

/// One page of a paginated folder listing.
#[derive(Debug, Clone)]
pub struct ListPage {
    /// Entries on this page, in the order the provider returned them.
    pub entries: Vec<RemoteEntry>,
    /// Continuation cursor for the next page.
    pub cursor: String,
    /// Whether another page exists behind `cursor`.
    pub has_more: bool,
}

/// A historical version of a file, addressable independently of the
/// current version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revision {
    /// Opaque revision identifier.
    pub rev: String,
    /// Size of the revision's content in bytes.
    pub size: u64,
    /// Client-reported modification time, when known.
    pub client_modified: Option<DateTime<Utc>>,
}

/// Remote storage operations the mirror engine needs.
#[async_trait::async_trait]
pub trait IRemoteStore: Send + Sync {
    /// Start a recursive listing of `folder`, optionally including
    /// deleted entries.
    async fn list_folder(
        &self,
        folder: &RemoteFolder,
        include_deleted: bool,
    ) -> anyhow::Result<ListPage>;

    /// Fetch the next page of a listing started by [`list_folder`].
    ///
    /// [`list_folder`]: IRemoteStore::list_folder
    async fn list_folder_continue(&self, cursor: &str) -> anyhow::Result<ListPage>;

    /// Download the current content of the file at `path_lower`.
    async fn download(&self, path_lower: &str) -> anyhow::Result<Vec<u8>>;

    /// Download the content of a specific revision of the file at
    /// `path_lower`.
    async fn download_revision(&self, path_lower: &str, rev: &str) -> anyhow::Result<Vec<u8>>;

    /// The most recent revision of the file at `path_lower`, or `None`
    /// if the file has no revisions.
    async fn latest_revision(&self, path_lower: &str) -> anyhow::Result<Option<Revision>>;
}
