//! Domain newtypes with validation
//!
//! Strongly-typed wrappers that ensure validity at construction time.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// Suffix on a remote path that requests inclusion of deleted entries.
///
/// Kept for compatibility with the `?d=1` convention the tools have
/// always accepted in place of a flag.
const INCLUDE_DELETED_SUFFIX: &str = "?d=1";

/// A validated Dropbox folder path.
///
/// Accepts the path formats the Dropbox API accepts for folder
/// references:
/// - `""` - the root of the user's Dropbox
/// - `/path/to/folder` - an absolute display path
/// - `id:...` - a folder ID reference
/// - `ns:<digits>` optionally followed by `/...` - a namespace reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteFolder(String);

impl RemoteFolder {
    /// Create a validated `RemoteFolder` from a raw path string.
    pub fn new(path: impl Into<String>) -> Result<Self, DomainError> {
        let path = path.into();
        if Self::is_valid(&path) {
            Ok(Self(path))
        } else {
            Err(DomainError::InvalidRemotePath(path))
        }
    }

    /// The root of the user's Dropbox.
    #[must_use]
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Parse user input that may carry the `?d=1` include-deleted suffix.
    ///
    /// Returns the validated folder and whether deleted entries were
    /// requested.
    pub fn parse_with_flags(input: &str) -> Result<(Self, bool), DomainError> {
        match input.strip_suffix(INCLUDE_DELETED_SUFFIX) {
            Some(stripped) => Ok((Self::new(stripped)?, true)),
            None => Ok((Self::new(input)?, false)),
        }
    }

    fn is_valid(path: &str) -> bool {
        if path.is_empty() || path.starts_with('/') || path.starts_with("id:") {
            return true;
        }
        if let Some(rest) = path.strip_prefix("ns:") {
            let digits = rest.split('/').next().unwrap_or("");
            return !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit());
        }
        false
    }

    /// The validated path string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this refers to the Dropbox root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for RemoteFolder {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "/")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl FromStr for RemoteFolder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
