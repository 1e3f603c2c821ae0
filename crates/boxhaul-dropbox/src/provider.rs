//! DropboxRemoteStore - IRemoteStore implementation for the Dropbox API
//!
//! Wraps the [`DbxClient`] and delegates to the listing and files
//! modules to fulfil the [`IRemoteStore`] port contract. Authentication
//! (`authorize`, token refresh) is handled separately by the [`auth`]
//! module; this adapter assumes a probed client.
//!
//! [`auth`]: crate::auth

use anyhow::{Context, Result};

use boxhaul_core::domain::newtypes::RemoteFolder;
use boxhaul_core::ports::remote_store::{IRemoteStore, ListPage, Revision};

use crate::client::DbxClient;
use crate::{files, list};

/// [`IRemoteStore`] adapter over a probed [`DbxClient`]
pub struct DropboxRemoteStore {
    client: DbxClient,
}

impl DropboxRemoteStore {
    /// Wraps an authenticated client.
    pub fn new(client: DbxClient) -> Self {
        Self { client }
    }

    /// Returns a reference to the underlying client.
    pub fn client(&self) -> &DbxClient {
        &self.client
    }
}

#[async_trait::async_trait]
impl IRemoteStore for DropboxRemoteStore {
    async fn list_folder(
        &self,
        folder: &RemoteFolder,
        include_deleted: bool,
    ) -> Result<ListPage> {
        list::list_folder(&self.client, folder, include_deleted)
            .await
            .with_context(|| format!("Listing folder {folder} failed"))
    }

    async fn list_folder_continue(&self, cursor: &str) -> Result<ListPage> {
        list::list_folder_continue(&self.client, cursor)
            .await
            .context("Continuing folder listing failed")
    }

    async fn download(&self, path_lower: &str) -> Result<Vec<u8>> {
        files::download(&self.client, path_lower, None)
            .await
            .with_context(|| format!("Downloading {path_lower} failed"))
    }

    async fn download_revision(&self, path_lower: &str, rev: &str) -> Result<Vec<u8>> {
        files::download(&self.client, path_lower, Some(rev))
            .await
            .with_context(|| format!("Downloading {path_lower} at rev {rev} failed"))
    }

    async fn latest_revision(&self, path_lower: &str) -> Result<Option<Revision>> {
        files::latest_revision(&self.client, path_lower)
            .await
            .with_context(|| format!("Listing revisions of {path_lower} failed"))
    }
}
