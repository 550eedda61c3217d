//! Error types for store operations.
//!
//! The lenient accessors on [`crate::Store`] never fail; these errors come from
//! the strict accessors (`require`, `require_as`, `require_section`) and from
//! the `TryFrom<&Value>` conversions.

use thiserror::Error;

/// Structured errors for strict store access.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
    /// No value is stored at the key
    #[error("Key not found: {key}")]
    NotFound { key: String },

    /// The value exists but has a different type
    #[error("Type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// The value at the key is not a section
    #[error("Value at '{key}' is a {actual}, not a section")]
    NotASection { key: String, actual: String },
}

impl StoreError {
    /// Check if this error indicates a missing key
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    /// Check if this error is related to type mismatches
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            StoreError::TypeMismatch { .. } | StoreError::NotASection { .. }
        )
    }

    /// Get the key if this error is about a specific key
    pub fn key(&self) -> Option<&str> {
        match self {
            StoreError::NotFound { key } | StoreError::NotASection { key, .. } => Some(key),
            StoreError::TypeMismatch { .. } => None,
        }
    }
}

// Conversion from StoreError to the main Error type
impl From<StoreError> for crate::Error {
    fn from(err: StoreError) -> Self {
        crate::Error::Store(err)
    }
}
