//!
//! nestkv: a thread-safe hierarchical key-value store addressed by dotted keys.
//!
//! ## Core Concepts
//!
//! * **Store (`store::Store`)**: The entry point. Owns a root section and resolves
//!   keys like `"server.http.port"` by walking one section per segment.
//! * **Sections (`section::Section`)**: Shared, internally synchronized maps from a
//!   key segment to a value. Intermediate sections are created on write.
//! * **Values (`value::Value`)**: Null, booleans, integers, floats, text, lists and
//!   nested sections. Typed getters coerce them leniently (`value::coerce`).
//! * **Snapshots (`snapshot::Snapshot`)**: Immutable, detached deep copies of a
//!   subtree. They are also the serialization format and the merge source.
//! * **Merging (`merge`)**: Recursive structural merge of a snapshot into the store
//!   under an overwrite or keep policy.
//! * **Backends (`backend::Backend`)**: Pluggable persistence. JSON and YAML files
//!   plus an in-memory document slot are bundled.
//!
//! ```
//! use nestkv::{InMemory, Store};
//!
//! let store = Store::new();
//! store.set("server.port", 8080);
//! store.set("server.host", "localhost");
//!
//! let backend = InMemory::new();
//! assert!(store.save(&backend));
//!
//! let restored = Store::new();
//! assert!(restored.load(&backend));
//! assert_eq!(restored.get_int("server.port"), 8080);
//! ```

pub mod backend;
pub mod merge;
pub mod path;
pub mod section;
pub mod snapshot;
pub mod store;
pub mod value;

pub use backend::{Backend, BackendError, InMemory, JsonFile};
#[cfg(feature = "yaml")]
pub use backend::YamlFile;
pub use merge::{MergePolicy, MergeReport};
pub use path::KeyPath;
pub use section::Section;
pub use snapshot::{Snapshot, SnapshotValue};
pub use store::{Store, StoreError};
pub use value::Value;

/// Result type used throughout the nestkv library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the nestkv library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured store errors from the store module
    #[error(transparent)]
    Store(store::StoreError),

    /// Structured persistence errors from the backend module
    #[error(transparent)]
    Backend(backend::BackendError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Store(_) => "store",
            Error::Backend(_) => "backend",
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates a key was not found.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Store(store_err) => store_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error is type-related.
    pub fn is_type_error(&self) -> bool {
        match self {
            Error::Store(store_err) => store_err.is_type_error(),
            _ => false,
        }
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        match self {
            Error::Io(_) => true,
            Error::Backend(backend_err) => backend_err.is_io_error(),
            _ => false,
        }
    }

    /// Check if this error came from a persistence backend.
    pub fn is_backend_error(&self) -> bool {
        matches!(self, Error::Backend(_))
    }

    /// Check if this error indicates a malformed stored document.
    pub fn is_format_error(&self) -> bool {
        match self {
            Error::Serialize(_) => true,
            Error::Backend(backend_err) => backend_err.is_format_error(),
            _ => false,
        }
    }
}
