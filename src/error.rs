//! Unified error types for envsettings.
//!
//! Every fallible operation in the crate returns [`Result`]. File-system
//! failures are carried through unchanged in [`Error::Io`].

use std::path::PathBuf;
use thiserror::Error;

/// All envsettings errors.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid construction input (empty file name, unresolvable environment, ...)
    #[error("configuration error: {0}")]
    Config(String),

    /// A settings document on disk is not a valid JSON object
    #[error("parse error in {}: {message}", .path.display())]
    Parse {
        /// File that failed to parse
        path: PathBuf,
        /// Parser diagnostic
        message: String,
    },

    /// A required key is absent or holds a missing-equivalent value
    #[error("value for {0} not found")]
    MissingKey(String),

    /// A value exists but does not have the expected format
    #[error("invalid format for {key}: {reason}")]
    InvalidFormat {
        /// Key whose value was rejected
        key: String,
        /// Why it was rejected
        reason: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type for envsettings operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    pub(crate) fn invalid_format(key: &str, reason: impl Into<String>) -> Self {
        Error::InvalidFormat {
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    /// Check if this is a missing-key error.
    pub fn is_missing_key(&self) -> bool {
        matches!(self, Error::MissingKey(_))
    }

    /// Check if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }

    /// Check if this is a configuration error.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }

    /// Check if this is an invalid-format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, Error::InvalidFormat { .. })
    }

    /// Check if this error came from the file system with the given kind.
    pub fn is_io_kind(&self, kind: std::io::ErrorKind) -> bool {
        matches!(self, Error::Io(e) if e.kind() == kind)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
