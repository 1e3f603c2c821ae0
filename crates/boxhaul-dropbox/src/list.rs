//! Folder listing with cursor pagination
//!
//! Implements the Dropbox `list_folder` pattern: an initial recursive
//! listing call returns a page of entries plus a continuation cursor,
//! and `list_folder/continue` is called with that cursor until the API
//! reports `has_more: false`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use boxhaul_core::domain::RemoteFolder;
//! use boxhaul_dropbox::{client::DbxClient, list};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = DbxClient::new("access-token");
//! let folder = RemoteFolder::new("/Camera Uploads")?;
//!
//! let mut page = list::list_folder(&client, &folder, false).await?;
//! loop {
//!     for entry in &page.entries {
//!         println!("{}", entry.path_display());
//!     }
//!     if !page.has_more {
//!         break;
//!     }
//!     page = list::list_folder_continue(&client, &page.cursor).await?;
//! }
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use boxhaul_core::domain::newtypes::RemoteFolder;
use boxhaul_core::ports::remote_store::{ListPage, RemoteEntry};

use crate::client::DbxClient;
use crate::DbxError;

/// Path of the initial listing endpoint
const LIST_FOLDER_PATH: &str = "/2/files/list_folder";

/// Path of the pagination endpoint
const LIST_FOLDER_CONTINUE_PATH: &str = "/2/files/list_folder/continue";

// ============================================================================
// Dropbox API wire types
// ============================================================================

/// Request body for `/2/files/list_folder`
#[derive(Debug, Serialize)]
struct ListFolderArg<'a> {
    path: &'a str,
    recursive: bool,
    include_deleted: bool,
}

/// Request body for `/2/files/list_folder/continue`
#[derive(Debug, Serialize)]
struct ListFolderContinueArg<'a> {
    cursor: &'a str,
}

/// Raw response shared by both listing endpoints
#[derive(Debug, Deserialize)]
struct ListFolderResponse {
    #[serde(default)]
    entries: Vec<WireEntry>,
    cursor: String,
    has_more: bool,
}

/// A metadata entry as the API encodes it: internally tagged on `.tag`.
///
/// Unknown tags deserialize to `Unknown` so that a new entry kind added
/// by the API cannot break a listing.
#[derive(Debug, Deserialize)]
#[serde(tag = ".tag", rename_all = "snake_case")]
enum WireEntry {
    File {
        path_display: Option<String>,
        path_lower: Option<String>,
        #[serde(default)]
        size: u64,
        client_modified: Option<DateTime<Utc>>,
    },
    Folder {
        path_display: Option<String>,
        path_lower: Option<String>,
    },
    Deleted {
        path_display: Option<String>,
        path_lower: Option<String>,
    },
    #[serde(other)]
    Unknown,
}

impl WireEntry {
    /// Convert a wire entry into the port-level sum type.
    ///
    /// Entries with an unknown tag or without both path fields yield
    /// `None` and are dropped from the page.
    fn into_entry(self) -> Option<RemoteEntry> {
        match self {
            Self::File {
                path_display: Some(path_display),
                path_lower: Some(path_lower),
                size,
                client_modified,
            } => Some(RemoteEntry::File {
                path_display,
                path_lower,
                size,
                client_modified,
            }),
            Self::Folder {
                path_display: Some(path_display),
                path_lower: Some(path_lower),
            } => Some(RemoteEntry::Folder {
                path_display,
                path_lower,
            }),
            Self::Deleted {
                path_display: Some(path_display),
                path_lower: Some(path_lower),
            } => Some(RemoteEntry::Deleted {
                path_display,
                path_lower,
            }),
            _ => None,
        }
    }
}

fn into_page(response: ListFolderResponse) -> ListPage {
    ListPage {
        entries: response
            .entries
            .into_iter()
            .filter_map(WireEntry::into_entry)
            .collect(),
        cursor: response.cursor,
        has_more: response.has_more,
    }
}

// ============================================================================
// Listing functions
// ============================================================================

/// Starts a recursive listing of `folder`.
///
/// Returns the first page; callers follow `cursor` with
/// [`list_folder_continue`] while `has_more` is set, processing each
/// page's entries in received order before requesting the next.
pub async fn list_folder(
    client: &DbxClient,
    folder: &RemoteFolder,
    include_deleted: bool,
) -> Result<ListPage, DbxError> {
    debug!(folder = %folder, include_deleted, "Listing folder");

    let arg = ListFolderArg {
        path: folder.as_str(),
        recursive: true,
        include_deleted,
    };
    let response: ListFolderResponse = client.rpc(LIST_FOLDER_PATH, &arg).await?;

    let page = into_page(response);
    debug!(
        entries = page.entries.len(),
        has_more = page.has_more,
        "Received initial listing page"
    );
    Ok(page)
}

/// Fetches the next page of a listing from a continuation cursor.
pub async fn list_folder_continue(client: &DbxClient, cursor: &str) -> Result<ListPage, DbxError> {
    let arg = ListFolderContinueArg { cursor };
    let response: ListFolderResponse = client.rpc(LIST_FOLDER_CONTINUE_PATH, &arg).await?;

    let page = into_page(response);
    debug!(
        entries = page.entries.len(),
        has_more = page.has_more,
        "Received listing page"
    );
    Ok(page)
}

// ============================================================================
// Tests
// ============================================================================
