//! Port definitions (hexagonal architecture interfaces)
//!
//! Ports are interfaces the core depends on, but whose implementations
//! live in adapter crates.
//!
//! - [`IRemoteStore`] - remote storage operations (Dropbox adapter)

pub mod remote_store;

pub use remote_store::{IRemoteStore, ListPage, RemoteEntry, Revision};
