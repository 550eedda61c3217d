//! Dotted key resolution for hierarchical store access.
//!
//! Keys are plain strings such as `"server.http.port"`. Every `.` separates two
//! segments; there is no escape syntax, so a key containing the separator always
//! addresses a nested value.
//!
//! # Core Types
//!
//! - [`segments`] - Splits a key into the ordered segments the store walks
//! - [`KeyPath`] - An owned dotted key built one segment at a time
//!
//! # Usage
//!
//! ```rust
//! use nestkv::path::{KeyPath, segments};
//!
//! assert_eq!(segments("user.profile.name"), vec!["user", "profile", "name"]);
//!
//! let key = KeyPath::new().child("user").child("profile").child("name");
//! assert_eq!(key.as_str(), "user.profile.name");
//! ```

use std::fmt;

/// The segment separator used in every key.
pub const SEPARATOR: char = '.';

/// Splits a dotted key into its segments.
///
/// - Interior empty segments are kept: `"a..b"` → `["a", "", "b"]`
/// - Trailing empty segments are dropped: `"a.b."` → `["a", "b"]`
/// - A key with no non-empty segment resolves to the degenerate root-level key
///   `[""]`: `""`, `"."` and `"..."` all address the same slot
///
/// The result is never empty.
///
/// # Examples
///
/// ```rust
/// # use nestkv::path::segments;
/// assert_eq!(segments("server.port"), vec!["server", "port"]);
/// assert_eq!(segments("a..b"), vec!["a", "", "b"]);
/// assert_eq!(segments("a.b."), vec!["a", "b"]);
/// assert_eq!(segments(""), vec![""]);
/// assert_eq!(segments("..."), vec![""]);
/// ```
pub fn segments(key: &str) -> Vec<&str> {
    let mut parts: Vec<&str> = key.split(SEPARATOR).collect();
    while parts.len() > 1 && parts.last().is_some_and(|s| s.is_empty()) {
        parts.pop();
    }
    parts
}

/// Splits a key into its parent segments and its terminal segment.
pub(crate) fn split_last(key: &str) -> (Vec<&str>, &str) {
    let mut parts = segments(key);
    // segments() never returns an empty Vec
    let last = parts.pop().unwrap_or("");
    (parts, last)
}

/// An owned dotted key.
///
/// Store operations take any `AsRef<str>`, so a `KeyPath` goes wherever a
/// `&str` key does. It is handy when keys are assembled from runtime parts,
/// and the merge walk uses it to report where it is in the tree.
///
/// ```rust
/// # use nestkv::path::KeyPath;
/// let key = KeyPath::from("db.replicas").child("2").child("host");
///
/// assert_eq!(key.segments(), vec!["db", "replicas", "2", "host"]);
/// assert_eq!(key.last(), Some("host"));
/// assert_eq!(key.parent().unwrap().as_str(), "db.replicas.2");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyPath {
    key: String,
}

impl KeyPath {
    /// The empty key, addressing the store root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extends the key by `suffix`, which may itself be dotted.
    ///
    /// An empty suffix leaves the key unchanged.
    pub fn child(mut self, suffix: impl AsRef<str>) -> Self {
        let suffix = suffix.as_ref();
        if !suffix.is_empty() {
            if !self.key.is_empty() {
                self.key.push(SEPARATOR);
            }
            self.key.push_str(suffix);
        }
        self
    }

    /// Appends every segment of `other`.
    pub fn join(self, other: &KeyPath) -> Self {
        self.child(&other.key)
    }

    /// The segments the store walks for this key.
    pub fn segments(&self) -> Vec<&str> {
        segments(&self.key)
    }

    /// Number of segments; 0 for the empty key.
    pub fn depth(&self) -> usize {
        if self.key.is_empty() {
            0
        } else {
            self.segments().len()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }

    /// The key without its last segment, if it has more than one.
    pub fn parent(&self) -> Option<KeyPath> {
        let (parents, _) = split_last(&self.key);
        (!parents.is_empty()).then(|| KeyPath {
            key: parents.join("."),
        })
    }

    /// The terminal segment, if the key is not empty.
    pub fn last(&self) -> Option<&str> {
        (!self.key.is_empty()).then(|| split_last(&self.key).1)
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }
}

impl AsRef<str> for KeyPath {
    fn as_ref(&self) -> &str {
        &self.key
    }
}

impl From<&str> for KeyPath {
    fn from(key: &str) -> Self {
        KeyPath {
            key: key.to_string(),
        }
    }
}

impl From<String> for KeyPath {
    fn from(key: String) -> Self {
        KeyPath { key }
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

/// Builds a [`KeyPath`] from `Display` parts joined with `.`.
///
/// ```rust
/// # use nestkv::key;
/// let shard = 3;
/// assert_eq!(key!("shards", shard, "owner").as_str(), "shards.3.owner");
/// assert!(key!().is_empty());
/// ```
#[macro_export]
macro_rules! key {
    () => {
        $crate::path::KeyPath::new()
    };

    ($($part:expr),+ $(,)?) => {
        $crate::path::KeyPath::new()$(.child($part.to_string()))+
    };
}
