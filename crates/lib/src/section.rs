//! Live tree nodes.
//!
//! A [`Section`] is a cheaply clonable handle to one concurrent map from key to
//! [`Value`]. Every interior node of a [`crate::Store`] is a section, and the
//! store's root is one too.
//!
//! Each section owns its own [`DashMap`], so writers only contend when they
//! touch keys of the same section. There is no lock spanning more than one
//! section: a traversal takes a key's slot just long enough to clone the child
//! handle out, then releases it before descending.

use std::{fmt, sync::Arc};

use dashmap::{DashMap, mapref::entry::Entry};

use crate::{snapshot::Snapshot, value::Value};

/// A shared handle to one node of the tree.
///
/// Cloning a `Section` produces another handle to the same node; mutations
/// through either handle are visible through both. Use [`Section::ptr_eq`] to
/// test whether two handles name the same node.
///
/// # Examples
///
/// ```
/// # use nestkv::{Section, Value};
/// let section = Section::new();
/// section.insert("port", 8080);
///
/// let alias = section.clone();
/// assert!(alias.ptr_eq(&section));
/// assert_eq!(alias.get("port"), Some(Value::Int(8080)));
/// ```
#[derive(Clone, Default)]
pub struct Section {
    entries: Arc<DashMap<String, Value>>,
}

impl Section {
    /// Creates a new, empty section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if both handles refer to the same node.
    pub fn ptr_eq(&self, other: &Section) -> bool {
        Arc::ptr_eq(&self.entries, &other.entries)
    }

    /// Returns the number of direct entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the section has no direct entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a copy of the value stored directly under `key`.
    ///
    /// Nested sections are returned as handles, not copies.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Returns true if `key` is a direct entry of this section.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Stores `value` directly under `key`, returning the previous value.
    ///
    /// A section value is shared, not copied; see [`crate::Store::set`].
    pub fn insert(&self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Removes the direct entry `key`, returning its value.
    pub fn remove(&self, key: &str) -> Option<Value> {
        self.entries.remove(key).map(|(_, value)| value)
    }

    /// Removes every direct entry.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Returns the direct keys in sorted order.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }

    /// Returns a copy of every direct entry, sorted by key.
    ///
    /// Each entry is read atomically, but the entries are not read at one
    /// instant: concurrent writers may be observed for some keys and not others.
    pub fn entries(&self) -> Vec<(String, Value)> {
        let mut entries: Vec<(String, Value)> = self
            .entries
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Returns the child section under `key`, if that slot holds a section.
    pub(crate) fn child(&self, key: &str) -> Option<Section> {
        match self.entries.get(key)?.value() {
            Value::Section(section) => Some(section.clone()),
            _ => None,
        }
    }

    /// Returns the section under `key`, creating or converting it as needed.
    ///
    /// - absent: a new empty section is installed and returned
    /// - already a section: that section is returned unchanged
    /// - any other value: the value is discarded and replaced by a new empty
    ///   section, which is returned
    ///
    /// The inspection and the install happen while holding the slot's entry
    /// lock. When several threads materialize the same slot at once, exactly
    /// one of them installs a section and every caller gets that section back.
    ///
    /// # Examples
    ///
    /// ```
    /// # use nestkv::{Section, Value};
    /// let root = Section::new();
    /// root.insert("server", 5);
    ///
    /// let server = root.materialize("server");
    /// assert!(server.is_empty());
    /// assert!(root.materialize("server").ptr_eq(&server));
    /// ```
    pub fn materialize(&self, key: &str) -> Section {
        if let Some(section) = self.child(key) {
            return section;
        }

        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut slot) => {
                if let Value::Section(section) = slot.get() {
                    // Another writer won the race between our read and the lock
                    return section.clone();
                }
                let section = Section::new();
                let previous = slot.insert(Value::Section(section.clone()));
                tracing::debug!(
                    key,
                    replaced = previous.type_name(),
                    "Replaced non-section value with a new section"
                );
                section
            }
            Entry::Vacant(slot) => {
                let section = Section::new();
                slot.insert(Value::Section(section.clone()));
                section
            }
        }
    }

    /// Runs `f` on the slot for `key` while holding its entry lock.
    ///
    /// `f` receives the current value (if any) and returns what the slot should
    /// hold afterwards, plus a result for the caller.
    pub(crate) fn update<R>(
        &self,
        key: &str,
        f: impl FnOnce(Option<&Value>) -> (Option<Value>, R),
    ) -> R {
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(mut slot) => {
                let (next, result) = f(Some(slot.get()));
                if let Some(next) = next {
                    slot.insert(next);
                }
                result
            }
            Entry::Vacant(slot) => {
                let (next, result) = f(None);
                if let Some(next) = next {
                    slot.insert(next);
                }
                result
            }
        }
    }

    /// Drops every direct entry whose key does not satisfy `keep`.
    pub(crate) fn retain_keys(&self, mut keep: impl FnMut(&str) -> bool) {
        self.entries.retain(|key, _| keep(key));
    }
}

// Both formatters go through a snapshot so a section that contains itself
// prints its repeated ancestor as null.
impl fmt::Debug for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snapshot = Snapshot::of(self);
        f.debug_map().entries(snapshot.iter()).finish()
    }
}

/// Formats as compact JSON.
impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Snapshot::of(self))
    }
}
