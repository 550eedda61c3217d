//! Immutable, detached copies of the tree.
//!
//! A [`Snapshot`] is what the store hands out when a caller needs to look at a
//! whole subtree without holding on to live [`Section`] handles: for
//! persistence, for comparisons in tests, or to pass configuration to code that
//! must not observe later writes.
//!
//! Snapshots are deep copies. Every nested section becomes its own `Snapshot`
//! and every list is frozen element by element at every depth, including
//! sections and lists nested inside lists. Nothing in a snapshot is shared with
//! the live tree.
//!
//! # Consistency
//!
//! Building a snapshot walks the tree one section at a time. Each key is copied
//! atomically, but the walk is not a single atomic view: a concurrent writer on
//! a different branch may be captured before or after its write.
//!
//! # Persistence format
//!
//! `Snapshot` serializes as a plain map and [`SnapshotValue`] as an untagged
//! value, so a snapshot round-trips through JSON and YAML documents directly.

use std::{collections::BTreeMap, fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
    path,
    section::Section,
    value::{
        Value,
        coerce::{Coerce, Scalar},
    },
};

/// A frozen value inside a [`Snapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnapshotValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<SnapshotValue>),
    Section(Snapshot),
}

impl SnapshotValue {
    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            SnapshotValue::Null => "null",
            SnapshotValue::Bool(_) => "bool",
            SnapshotValue::Int(_) => "int",
            SnapshotValue::Float(_) => "float",
            SnapshotValue::Text(_) => "text",
            SnapshotValue::List(_) => "list",
            SnapshotValue::Section(_) => "section",
        }
    }

    /// Attempts to convert to a list
    pub fn as_list(&self) -> Option<&[SnapshotValue]> {
        match self {
            SnapshotValue::List(list) => Some(list),
            _ => None,
        }
    }

    /// Attempts to convert to a nested snapshot
    pub fn as_section(&self) -> Option<&Snapshot> {
        match self {
            SnapshotValue::Section(section) => Some(section),
            _ => None,
        }
    }

    /// Builds a fresh live value with the same contents.
    ///
    /// Nested snapshots become new, unshared [`Section`]s.
    pub fn to_value(&self) -> Value {
        match self {
            SnapshotValue::Null => Value::Null,
            SnapshotValue::Bool(b) => Value::Bool(*b),
            SnapshotValue::Int(n) => Value::Int(*n),
            SnapshotValue::Float(f) => Value::Float(*f),
            SnapshotValue::Text(s) => Value::Text(s.clone()),
            SnapshotValue::List(items) => {
                Value::List(items.iter().map(SnapshotValue::to_value).collect())
            }
            SnapshotValue::Section(snapshot) => Value::Section(snapshot.to_section()),
        }
    }
}

impl From<&Value> for SnapshotValue {
    fn from(value: &Value) -> Self {
        Freezer::default().freeze_value(value)
    }
}

impl From<Snapshot> for SnapshotValue {
    fn from(snapshot: Snapshot) -> Self {
        SnapshotValue::Section(snapshot)
    }
}

macro_rules! leaf_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for SnapshotValue {
                fn from(value: $ty) -> Self {
                    SnapshotValue::from(&Value::from(value))
                }
            }
        )*
    };
}

leaf_from!(bool, i32, i64, f64, &str, String);

/// An immutable deep copy of a section.
///
/// # Examples
///
/// ```
/// # use nestkv::Store;
/// let store = Store::new();
/// store.set("server.port", 8080);
///
/// let snapshot = store.snapshot();
/// store.set("server.port", 9090);
///
/// assert_eq!(snapshot.get_int("server.port"), 8080);
/// assert_eq!(store.get_int("server.port"), 9090);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    entries: Arc<BTreeMap<String, SnapshotValue>>,
}

impl Snapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deep-copies a live section.
    pub fn of(section: &Section) -> Self {
        Freezer::default().freeze_section(section)
    }

    /// Returns the number of top-level entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the snapshot has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the top-level keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates over the top-level entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SnapshotValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Looks up a dotted key.
    pub fn get(&self, key: impl AsRef<str>) -> Option<&SnapshotValue> {
        let (parents, last) = path::split_last(key.as_ref());
        let mut current = self;
        for segment in parents {
            current = current.entries.get(segment)?.as_section()?;
        }
        current.entries.get(last)
    }

    /// Looks up a top-level key literally, without splitting on dots.
    pub fn entry(&self, key: &str) -> Option<&SnapshotValue> {
        self.entries.get(key)
    }

    /// Returns true if the dotted key resolves to a value.
    pub fn contains(&self, key: impl AsRef<str>) -> bool {
        self.get(key).is_some()
    }

    /// Returns the nested snapshot at a dotted key.
    pub fn section(&self, key: impl AsRef<str>) -> Option<&Snapshot> {
        self.get(key)?.as_section()
    }

    fn coerced<T: Coerce>(&self, key: impl AsRef<str>) -> Option<T> {
        T::coerce(Scalar::from(self.get(key)?))
    }

    /// Lenient `i32` read, 0 when absent or not coercible.
    pub fn get_int(&self, key: impl AsRef<str>) -> i32 {
        self.coerced(key).unwrap_or(0)
    }

    /// Lenient `i64` read, 0 when absent or not coercible.
    pub fn get_long(&self, key: impl AsRef<str>) -> i64 {
        self.coerced(key).unwrap_or(0)
    }

    /// Lenient `f64` read, 0.0 when absent or not coercible.
    pub fn get_double(&self, key: impl AsRef<str>) -> f64 {
        self.coerced(key).unwrap_or(0.0)
    }

    /// Lenient `bool` read, false when absent or not coercible.
    pub fn get_boolean(&self, key: impl AsRef<str>) -> bool {
        self.coerced(key).unwrap_or(false)
    }

    /// Text read, `None` when absent or not text.
    pub fn get_string(&self, key: impl AsRef<str>) -> Option<String> {
        self.coerced(key)
    }

    /// Coerced list read; non-matching elements are skipped.
    pub fn get_list_of<T: Coerce>(&self, key: impl AsRef<str>) -> Vec<T> {
        match self.get(key) {
            Some(SnapshotValue::List(items)) => items
                .iter()
                .filter_map(|item| T::coerce(Scalar::from(item)))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Builds a fresh live section holding a deep copy of this snapshot.
    pub fn to_section(&self) -> Section {
        let section = Section::new();
        for (key, value) in self.entries.iter() {
            section.insert(key.clone(), value.to_value());
        }
        section
    }

    /// Converts to a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.entries
                .iter()
                .map(|(k, v)| (k.clone(), snapshot_value_to_json(v)))
                .collect(),
        )
    }
}

fn snapshot_value_to_json(value: &SnapshotValue) -> serde_json::Value {
    match value {
        SnapshotValue::Null => serde_json::Value::Null,
        SnapshotValue::Bool(b) => serde_json::Value::Bool(*b),
        SnapshotValue::Int(n) => serde_json::Value::from(*n),
        SnapshotValue::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        SnapshotValue::Text(s) => serde_json::Value::String(s.clone()),
        SnapshotValue::List(items) => {
            serde_json::Value::Array(items.iter().map(snapshot_value_to_json).collect())
        }
        SnapshotValue::Section(snapshot) => snapshot.to_json(),
    }
}

impl TryFrom<serde_json::Value> for Snapshot {
    type Error = crate::Error;

    /// Accepts a JSON object; any other top-level JSON value is rejected.
    fn try_from(value: serde_json::Value) -> crate::Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

impl FromIterator<(String, SnapshotValue)> for Snapshot {
    fn from_iter<T: IntoIterator<Item = (String, SnapshotValue)>>(iter: T) -> Self {
        Snapshot {
            entries: Arc::new(iter.into_iter().collect()),
        }
    }
}

impl From<BTreeMap<String, SnapshotValue>> for Snapshot {
    fn from(entries: BTreeMap<String, SnapshotValue>) -> Self {
        Snapshot {
            entries: Arc::new(entries),
        }
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json())
    }
}

/// Walks a live tree, keeping the chain of sections being copied so that a
/// section reachable from itself is cut off instead of recursing forever.
#[derive(Default)]
struct Freezer {
    ancestors: Vec<Section>,
}

impl Freezer {
    fn freeze_section(&mut self, section: &Section) -> Snapshot {
        self.ancestors.push(section.clone());
        let entries = section
            .entries()
            .into_iter()
            .map(|(key, value)| {
                let frozen = self.freeze_value(&value);
                (key, frozen)
            })
            .collect();
        self.ancestors.pop();
        Snapshot {
            entries: Arc::new(entries),
        }
    }

    fn freeze_value(&mut self, value: &Value) -> SnapshotValue {
        match value {
            Value::Null => SnapshotValue::Null,
            Value::Bool(b) => SnapshotValue::Bool(*b),
            Value::Int(n) => SnapshotValue::Int(*n),
            Value::Float(f) => SnapshotValue::Float(*f),
            Value::Text(s) => SnapshotValue::Text(s.clone()),
            Value::List(items) => {
                SnapshotValue::List(items.iter().map(|item| self.freeze_value(item)).collect())
            }
            Value::Section(section) => {
                if self.ancestors.iter().any(|a| a.ptr_eq(section)) {
                    tracing::warn!("Section contains itself; cycle frozen as null");
                    SnapshotValue::Null
                } else {
                    SnapshotValue::Section(self.freeze_section(section))
                }
            }
        }
    }
}
