//! Domain types for boxhaul
//!
//! - Validated newtypes for remote paths
//! - The explicit credential holder
//! - Domain-specific error types

pub mod credentials;
pub mod errors;
pub mod newtypes;

pub use credentials::{Credentials, RefreshKeys};
pub use errors::DomainError;
pub use newtypes::RemoteFolder;
