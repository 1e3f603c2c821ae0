//! Domain error types

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid remote folder path format
    #[error("Invalid remote path: {0}")]
    InvalidRemotePath(String),

    /// A required environment variable is missing
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}
