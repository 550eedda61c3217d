//! Persistence backends for nestkv stores
//!
//! This module provides the core `Backend` trait and the bundled implementations:
//! JSON and YAML files on disk, and an in-memory document slot.
//!
//! The `Backend` trait only deals in [`Snapshot`]s. A backend never sees a live
//! store, so the store logic stays independent of how documents are persisted.
//! Use [`crate::Store::load`] and [`crate::Store::save`] to move data between a
//! store and a backend.

use crate::{Result, snapshot::Snapshot};

mod errors;
mod in_memory;
mod json_file;
#[cfg(feature = "yaml")]
mod yaml_file;

pub use errors::BackendError;
pub use in_memory::InMemory;
pub use json_file::JsonFile;
#[cfg(feature = "yaml")]
pub use yaml_file::YamlFile;

/// Backend trait abstracting where a store's document lives.
///
/// A backend holds at most one document. Implementations must replace that
/// document atomically on [`write`](Backend::write): a reader (or a crash) must
/// observe either the previous document or the new one, never a mix and never
/// nothing.
///
/// All backends must be `Send` and `Sync` so a single backend can be shared by
/// several threads saving the same store.
pub trait Backend: Send + Sync {
    /// Reads the stored document.
    ///
    /// # Returns
    /// `Ok(None)` when nothing has been stored yet (a missing or empty file, an
    /// empty slot), `Ok(Some(snapshot))` for a stored document, or an error if
    /// the document could not be read or parsed.
    fn read(&self) -> Result<Option<Snapshot>>;

    /// Replaces the stored document with `snapshot`.
    fn write(&self, snapshot: &Snapshot) -> Result<()>;
}

/// Writes `contents` next to `path` and renames it into place.
pub(crate) fn replace_file(path: &std::path::Path, contents: &[u8]) -> Result<()> {
    use std::io::Write;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => std::path::Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| BackendError::file_io(dir, e))?;

    let mut temp =
        tempfile::NamedTempFile::new_in(dir).map_err(|e| BackendError::file_io(dir, e))?;
    temp.write_all(contents)
        .and_then(|()| temp.as_file().sync_all())
        .map_err(|e| BackendError::file_io(temp.path(), e))?;
    temp.persist(path)
        .map_err(|e| BackendError::file_io(path, e.error))?;
    Ok(())
}

/// Reads `path` to a string.
///
/// A missing file yields `Ok(None)`. With `create_missing`, the parent
/// directories and an empty file are created first.
pub(crate) fn read_file(path: &std::path::Path, create_missing: bool) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && create_missing => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| BackendError::file_io(parent, e))?;
            }
            std::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(path)
                .or_else(|e| match e.kind() {
                    // Someone else created it in the meantime
                    std::io::ErrorKind::AlreadyExists => std::fs::File::open(path),
                    _ => Err(e),
                })
                .map_err(|e| BackendError::file_io(path, e))?;
            tracing::debug!(path = %path.display(), "Created empty document file");
            Ok(None)
        }
        Err(e) => Err(BackendError::file_io(path, e).into()),
    }
}
