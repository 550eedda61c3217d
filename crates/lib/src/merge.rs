//! Structural merge of a [`Snapshot`] into a live tree.
//!
//! Where both sides hold a section, the merge recurses into it key by key.
//! Every other key is decided by the [`MergePolicy`]: `Overwrite` installs a
//! fresh copy of the source value, and `Keep` installs it only if the target has
//! nothing stored there.
//!
//! Each key is decided under that key's slot lock, so a concurrent writer on the
//! same key is ordered either before or after the merge of that key. The merge as
//! a whole is not atomic and is not rolled back if interrupted.
//!
//! ```
//! # use nestkv::{MergePolicy, Store};
//! let defaults = Store::new();
//! defaults.set("server.port", 8080);
//! defaults.set("server.host", "0.0.0.0");
//!
//! let store = Store::new();
//! store.set("server.port", 9000);
//!
//! let report = store.merge(&defaults.snapshot(), MergePolicy::Keep);
//! assert_eq!(report.written, 1);
//! assert_eq!(report.kept, 1);
//! assert_eq!(store.get_int("server.port"), 9000);
//! assert_eq!(store.get_string("server.host").as_deref(), Some("0.0.0.0"));
//! ```

use std::ops::AddAssign;

use crate::{
    path::KeyPath,
    section::Section,
    snapshot::{Snapshot, SnapshotValue},
    store::Store,
    value::Value,
};

/// What to do when a non-section key exists on both sides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MergePolicy {
    /// Replace the target value with the source value.
    #[default]
    Overwrite,
    /// Leave the target value in place.
    Keep,
}

/// Counts of the leaf decisions taken by a merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Keys that received a copy of the source value
    pub written: usize,
    /// Keys left untouched because the target already held a value
    pub kept: usize,
}

impl AddAssign for MergeReport {
    fn add_assign(&mut self, other: Self) {
        self.written += other.written;
        self.kept += other.kept;
    }
}

enum Step {
    Written,
    Kept,
    Descend(Section),
}

impl Section {
    /// Merges `source` into this section.
    ///
    /// Sections present on both sides are merged recursively; the target
    /// section keeps its identity. Other values follow `policy`.
    pub fn merge_from(&self, source: &Snapshot, policy: MergePolicy) -> MergeReport {
        self.merge_at(&KeyPath::new(), source, policy)
    }

    fn merge_at(&self, at: &KeyPath, source: &Snapshot, policy: MergePolicy) -> MergeReport {
        let mut report = MergeReport::default();
        for (key, incoming) in source.iter() {
            let step = self.update(key, |current| match (current, incoming) {
                (Some(Value::Section(target)), SnapshotValue::Section(_)) => {
                    (None, Step::Descend(target.clone()))
                }
                (Some(_), _) if policy == MergePolicy::Keep => (None, Step::Kept),
                _ => (Some(incoming.to_value()), Step::Written),
            });

            match step {
                Step::Written => report.written += 1,
                Step::Kept => report.kept += 1,
                Step::Descend(target) => {
                    if let SnapshotValue::Section(nested) = incoming {
                        let at = at.clone().child(key);
                        tracing::trace!(key = %at, "Merging into nested section");
                        report += target.merge_at(&at, nested, policy);
                    }
                }
            }
        }
        report
    }
}

impl Store {
    /// Merges `source` into the whole store.
    ///
    /// Running the same merge twice leaves the store as the first run did,
    /// under either policy.
    pub fn merge(&self, source: &Snapshot, policy: MergePolicy) -> MergeReport {
        let report = self.root().merge_from(source, policy);
        tracing::debug!(
            ?policy,
            written = report.written,
            kept = report.kept,
            "Merged snapshot into store"
        );
        report
    }
}
