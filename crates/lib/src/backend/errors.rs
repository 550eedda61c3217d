//! Persistence error types for the nestkv backends.
//!
//! This module defines structured error types for reading and writing stored
//! documents, keeping the failing path and the underlying cause together.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing a stored document.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum BackendError {
    /// File I/O error.
    #[error("File I/O error on {}", path.display())]
    FileIo {
        /// The file or directory being accessed
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Serialization failed.
    #[error("Serialization failed")]
    SerializationFailed {
        /// The underlying serialization error
        #[source]
        source: serde_json::Error,
    },

    /// Deserialization failed.
    #[error("Deserialization failed")]
    DeserializationFailed {
        /// The underlying deserialization error
        #[source]
        source: serde_json::Error,
    },

    /// YAML encoding or decoding failed.
    #[cfg(feature = "yaml")]
    #[error("YAML error")]
    Yaml {
        /// The underlying YAML error
        #[source]
        source: serde_yaml::Error,
    },

    /// The stored document parsed but is not a map at the top level.
    #[error("Invalid document: {reason}")]
    InvalidDocument {
        /// Description of what was found instead
        reason: String,
    },
}

impl BackendError {
    pub(crate) fn file_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BackendError::FileIo {
            path: path.into(),
            source,
        }
    }

    /// Check if this error is related to I/O operations.
    pub fn is_io_error(&self) -> bool {
        matches!(self, BackendError::FileIo { .. })
    }

    /// Check if this error indicates a malformed document or an encoding failure.
    pub fn is_format_error(&self) -> bool {
        match self {
            BackendError::SerializationFailed { .. }
            | BackendError::DeserializationFailed { .. }
            | BackendError::InvalidDocument { .. } => true,
            #[cfg(feature = "yaml")]
            BackendError::Yaml { .. } => true,
            BackendError::FileIo { .. } => false,
        }
    }

    /// Get the file path if this error is about a specific file.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            BackendError::FileIo { path, .. } => Some(path),
            _ => None,
        }
    }
}

// Conversion from BackendError to the main Error type
impl From<BackendError> for crate::Error {
    fn from(err: BackendError) -> Self {
        crate::Error::Backend(err)
    }
}
