//! YAML file backend.

use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value as Yaml};

use super::{Backend, BackendError, read_file, replace_file};
use crate::{Result, snapshot::Snapshot};

/// Stores the document as a YAML mapping in a single file.
///
/// Behaves like [`super::JsonFile`]: a missing, empty or `null` document reads
/// as nothing stored, and the file is created on first read unless
/// [`with_create_missing(false)`](YamlFile::with_create_missing) is set.
#[derive(Debug, Clone)]
pub struct YamlFile {
    path: PathBuf,
    create_missing: bool,
}

impl YamlFile {
    /// Creates a backend for `path` with create-if-missing enabled.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            create_missing: true,
        }
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

impl Backend for YamlFile {
    fn read(&self) -> Result<Option<Snapshot>> {
        let Some(contents) = read_file(&self.path, self.create_missing)? else {
            return Ok(None);
        };
        if contents.trim().is_empty() {
            return Ok(None);
        }

        let document: Yaml =
            serde_yaml::from_str(&contents).map_err(|e| BackendError::Yaml { source: e })?;
        match document {
            Yaml::Null => Ok(None),
            Yaml::Mapping(_) => {
                let snapshot = serde_yaml::from_value(string_keys(document)?)
                    .map_err(|e| BackendError::Yaml { source: e })?;
                Ok(Some(snapshot))
            }
            other => Err(BackendError::InvalidDocument {
                reason: format!("expected a YAML mapping, found {other:?}"),
            }
            .into()),
        }
    }

    fn write(&self, snapshot: &Snapshot) -> Result<()> {
        let yaml = serde_yaml::to_string(snapshot).map_err(|e| BackendError::Yaml { source: e })?;
        replace_file(&self.path, yaml.as_bytes())
    }
}

/// Rewrites every mapping key as a string.
///
/// YAML allows `80: http` or `true: on`, but store keys are strings, so scalar
/// keys take their plain YAML spelling. Tags are dropped. A key that is itself
/// a list or mapping has no dotted-key spelling and is rejected.
fn string_keys(value: Yaml) -> std::result::Result<Yaml, BackendError> {
    Ok(match value {
        Yaml::Mapping(mapping) => {
            let mut normalized = Mapping::with_capacity(mapping.len());
            for (key, value) in mapping {
                let key = match key {
                    Yaml::String(s) => s,
                    Yaml::Number(n) => n.to_string(),
                    Yaml::Bool(b) => b.to_string(),
                    Yaml::Null => "null".to_string(),
                    Yaml::Tagged(tagged) => match string_keys(tagged.value)? {
                        Yaml::String(s) => s,
                        other => return Err(complex_key(&other)),
                    },
                    other => return Err(complex_key(&other)),
                };
                normalized.insert(Yaml::String(key), string_keys(value)?);
            }
            Yaml::Mapping(normalized)
        }
        Yaml::Sequence(items) => {
            Yaml::Sequence(items.into_iter().map(string_keys).collect::<std::result::Result<_, _>>()?)
        }
        Yaml::Tagged(tagged) => string_keys(tagged.value)?,
        scalar => scalar,
    })
}

fn complex_key(key: &Yaml) -> BackendError {
    BackendError::InvalidDocument {
        reason: format!("mapping key {key:?} is not a scalar"),
    }
}
