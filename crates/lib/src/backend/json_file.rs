//! JSON file backend.

use std::path::{Path, PathBuf};

use super::{Backend, BackendError, read_file, replace_file};
use crate::{Result, snapshot::Snapshot};

/// Stores the document as a JSON object in a single file.
///
/// A missing file counts as "nothing stored yet". By default the parent
/// directories and an empty file are created on the first read, so the path is
/// ready for a later save. An empty file or a top-level `null` also read as
/// nothing stored.
///
/// ```no_run
/// # use nestkv::{JsonFile, Store};
/// let backend = JsonFile::new("config/app.json").with_pretty(false);
/// let store = Store::new();
/// store.load(&backend);
/// store.set("server.port", 8080);
/// store.save(&backend);
/// ```
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
    pretty: bool,
    create_missing: bool,
}

impl JsonFile {
    /// Creates a backend for `path` with pretty output and create-if-missing.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pretty: true,
            create_missing: true,
        }
    }

    /// Sets whether saved documents are indented.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets whether a missing file is created on read instead of reported.
    pub fn with_create_missing(mut self, create_missing: bool) -> Self {
        self.create_missing = create_missing;
        self
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Backend for JsonFile {
    fn read(&self) -> Result<Option<Snapshot>> {
        let Some(contents) = read_file(&self.path, self.create_missing)? else {
            return Ok(None);
        };
        if contents.trim().is_empty() {
            return Ok(None);
        }

        let document: serde_json::Value = serde_json::from_str(&contents)
            .map_err(|e| BackendError::DeserializationFailed { source: e })?;
        match document {
            serde_json::Value::Null => Ok(None),
            serde_json::Value::Object(_) => {
                let snapshot = serde_json::from_value(document)
                    .map_err(|e| BackendError::DeserializationFailed { source: e })?;
                Ok(Some(snapshot))
            }
            other => Err(BackendError::InvalidDocument {
                reason: format!("expected a JSON object, found {other}"),
            }
            .into()),
        }
    }

    fn write(&self, snapshot: &Snapshot) -> Result<()> {
        let json = if self.pretty {
            serde_json::to_vec_pretty(snapshot)
        } else {
            serde_json::to_vec(snapshot)
        }
        .map_err(|e| BackendError::SerializationFailed { source: e })?;
        replace_file(&self.path, &json)
    }
}
