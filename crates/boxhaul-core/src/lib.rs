//! Boxhaul Core - Domain types and port definitions
//!
//! This crate contains the shared core for the boxhaul tools:
//! - **Domain types** - `RemoteFolder`, `Credentials`, `DomainError`
//! - **Port definitions** - `IRemoteStore`, the trait the Dropbox adapter
//!   implements and the mirror engine consumes
//! - **Configuration** - typed config loaded from YAML
//!
//! The domain module contains pure logic with no network dependencies.
//! Ports define trait interfaces whose implementations live in adapter
//! crates.

pub mod config;
pub mod domain;
pub mod ports;
