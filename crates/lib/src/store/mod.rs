//! The hierarchical key-value store.
//!
//! [`Store`] owns a root [`Section`] and addresses everything below it with
//! dotted keys. Reads walk the tree without creating anything; writes create
//! (or convert) the intermediate sections they need through
//! [`Section::materialize`].
//!
//! # Concurrency
//!
//! A `Store` is `Send + Sync` and is meant to be shared by reference or behind
//! an `Arc`. Every section synchronizes its own keys independently, so writers
//! on disjoint prefixes never contend, and writers sharing a prefix only meet
//! at the sections they share. Two writers racing to create the same
//! intermediate section always end up writing into the same one.
//!
//! # Structural conflicts
//!
//! Writing below a key that currently holds a non-section value replaces that
//! value with a new, empty section. The old value is discarded without error.
//!
//! ```
//! # use nestkv::Store;
//! let store = Store::new();
//! store.set("a.b", 5);
//! store.set("a.b.c", 1);
//!
//! assert_eq!(store.keys("a.b"), vec!["c"]);
//! assert_eq!(store.get_int("a.b.c"), 1);
//! ```

use crate::{
    Result,
    path,
    section::Section,
    snapshot::Snapshot,
    value::Value,
};

mod errors;
mod persistence;
mod typed;

pub use errors::StoreError;

/// A thread-safe tree of sections addressed by dotted keys.
///
/// Each `Store` is fully independent: it owns its root section and shares no
/// state with other stores.
///
/// # Examples
///
/// ```
/// # use nestkv::Store;
/// let store = Store::new();
/// store.set("server.port", 8080);
/// store.set("server.host", "localhost");
///
/// assert_eq!(store.get_int("server.port"), 8080);
/// assert_eq!(store.get_string("server.host").as_deref(), Some("localhost"));
/// assert_eq!(store.keys("server"), vec!["host", "port"]);
/// ```
#[derive(Debug, Default)]
pub struct Store {
    root: Section,
}

impl Store {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding a deep copy of `snapshot`.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            root: snapshot.to_section(),
        }
    }

    /// Returns the root section.
    pub fn root(&self) -> &Section {
        &self.root
    }

    /// Returns the number of top-level entries.
    pub fn len(&self) -> usize {
        self.root.len()
    }

    /// Returns true if the store has no top-level entries.
    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Returns the top-level keys in sorted order.
    pub fn root_keys(&self) -> Vec<String> {
        self.root.keys()
    }

    /// Walks `segments` without creating anything.
    fn resolve(&self, segments: &[&str]) -> Option<Section> {
        let mut current = self.root.clone();
        for segment in segments {
            current = current.child(segment)?;
        }
        Some(current)
    }

    /// Walks `segments`, materializing each one.
    fn resolve_or_create(&self, segments: &[&str]) -> Section {
        let mut current = self.root.clone();
        for segment in segments {
            current = current.materialize(segment);
        }
        current
    }

    /// Stores `value` at `key`, returning the previous value there.
    ///
    /// Intermediate sections are created as needed; intermediate non-section
    /// values are replaced by empty sections.
    ///
    /// A [`Section`] value is installed as the handle itself, not a copy. Setting
    /// a section that is already in the tree makes it reachable from both keys,
    /// and writes through either key show up under the other. Pass
    /// `Snapshot::of(&section).to_section()` to install an independent copy.
    pub fn set(&self, key: impl AsRef<str>, value: impl Into<Value>) -> Option<Value> {
        let (parents, last) = path::split_last(key.as_ref());
        self.resolve_or_create(&parents).insert(last, value)
    }

    /// Returns the value at `key`.
    ///
    /// Returns `None` as soon as an intermediate segment is missing or is not a
    /// section. Sections are returned as live handles.
    pub fn get(&self, key: impl AsRef<str>) -> Option<Value> {
        let (parents, last) = path::split_last(key.as_ref());
        self.resolve(&parents)?.get(last)
    }

    /// Returns true if a value is stored at `key`.
    pub fn contains(&self, key: impl AsRef<str>) -> bool {
        let (parents, last) = path::split_last(key.as_ref());
        self.resolve(&parents)
            .is_some_and(|section| section.contains_key(last))
    }

    /// Removes the value at `key`, returning it.
    ///
    /// Removing a section removes its whole subtree.
    pub fn remove(&self, key: impl AsRef<str>) -> Option<Value> {
        let (parents, last) = path::split_last(key.as_ref());
        self.resolve(&parents)?.remove(last)
    }

    /// Removes every top-level entry.
    ///
    /// Section handles obtained earlier keep their contents; they are simply
    /// no longer reachable from this store.
    pub fn clear(&self) {
        tracing::debug!(entries = self.root.len(), "Clearing store");
        self.root.clear();
    }

    /// Returns the live section at `key`, if there is one.
    pub fn section(&self, key: impl AsRef<str>) -> Option<Section> {
        self.get(key)?.into_section()
    }

    /// Returns the section at `key`, creating every missing segment.
    pub fn create_section(&self, key: impl AsRef<str>) -> Section {
        self.resolve_or_create(&path::segments(key.as_ref()))
    }

    /// Returns the direct keys of the section at `key`, sorted.
    ///
    /// Empty when `key` is absent or does not hold a section.
    pub fn keys(&self, key: impl AsRef<str>) -> Vec<String> {
        self.section(key)
            .map(|section| section.keys())
            .unwrap_or_default()
    }

    /// Returns the value at `key` or a [`StoreError::NotFound`].
    pub fn require(&self, key: impl AsRef<str>) -> Result<Value> {
        let key = key.as_ref();
        self.get(key).ok_or_else(|| {
            StoreError::NotFound {
                key: key.to_string(),
            }
            .into()
        })
    }

    /// Returns the section at `key` or an error naming what is there instead.
    pub fn require_section(&self, key: impl AsRef<str>) -> Result<Section> {
        let key = key.as_ref();
        match self.require(key)? {
            Value::Section(section) => Ok(section),
            other => Err(StoreError::NotASection {
                key: key.to_string(),
                actual: other.type_name().to_string(),
            }
            .into()),
        }
    }

    /// Takes an immutable deep copy of the whole tree.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(&self.root)
    }

    /// Takes an immutable deep copy of the section at `key`.
    pub fn snapshot_at(&self, key: impl AsRef<str>) -> Option<Snapshot> {
        self.section(key).map(|section| Snapshot::of(&section))
    }

    /// Replaces the whole content of the store with a deep copy of `snapshot`.
    ///
    /// New entries are written first and stale keys dropped afterwards, so a
    /// key present both before and after never appears missing to a concurrent
    /// reader.
    pub fn replace_root(&self, snapshot: &Snapshot) {
        for (key, value) in snapshot.iter() {
            self.root.insert(key, value.to_value());
        }
        self.root.retain_keys(|key| snapshot.entry(key).is_some());
        tracing::debug!(entries = snapshot.len(), "Replaced store content");
    }
}
