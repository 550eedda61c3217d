use std::sync::{PoisonError, RwLock};

use super::Backend;
use crate::{Result, snapshot::Snapshot};

/// A single-document backend kept in memory.
///
/// There is one slot, not a keyed collection: every store saving into the same
/// instance replaces the previous document. Give each store its own backend.
///
/// Useful for tests and for handing a store's content between components
/// without touching the disk. Each save replaces the stored document
/// wholesale under one lock, so a concurrent reader sees either the old
/// document or the new one.
#[derive(Debug, Default)]
pub struct InMemory {
    document: RwLock<Option<Snapshot>>,
}

impl InMemory {
    /// Creates an empty backend; reading it yields nothing stored.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend that already holds `snapshot`.
    pub fn with_document(snapshot: Snapshot) -> Self {
        Self {
            document: RwLock::new(Some(snapshot)),
        }
    }

    /// Returns the currently stored document.
    pub fn document(&self) -> Option<Snapshot> {
        self.document
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drops the stored document.
    pub fn clear(&self) {
        *self
            .document
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl Backend for InMemory {
    fn read(&self) -> Result<Option<Snapshot>> {
        Ok(self.document())
    }

    fn write(&self, snapshot: &Snapshot) -> Result<()> {
        *self
            .document
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(snapshot.clone());
        Ok(())
    }
}
