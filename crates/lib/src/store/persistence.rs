//! Moving store content to and from a [`Backend`].

use super::Store;
use crate::{Result, backend::Backend};

impl Store {
    /// Replaces the store content with the backend's document.
    ///
    /// Returns `Ok(false)` when the backend has nothing stored yet; the store is
    /// left as is in that case. On error the store is not modified.
    pub fn try_load(&self, backend: &dyn Backend) -> Result<bool> {
        let Some(snapshot) = backend.read()? else {
            tracing::debug!("Backend holds no document; keeping current content");
            return Ok(false);
        };
        self.replace_root(&snapshot);
        tracing::info!(keys = snapshot.len(), "Loaded store");
        Ok(true)
    }

    /// Like [`try_load`](Store::try_load), but logs failures instead of
    /// returning them.
    ///
    /// Returns false only if the backend failed. An empty backend counts as a
    /// successful load that changes nothing.
    pub fn load(&self, backend: &dyn Backend) -> bool {
        match self.try_load(backend) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load store; keeping current content");
                false
            }
        }
    }

    /// Writes a snapshot of the whole store to the backend.
    pub fn try_save(&self, backend: &dyn Backend) -> Result<()> {
        let snapshot = self.snapshot();
        backend.write(&snapshot)?;
        tracing::info!(keys = snapshot.len(), "Saved store");
        Ok(())
    }

    /// Like [`try_save`](Store::try_save), but logs failures and returns false.
    pub fn save(&self, backend: &dyn Backend) -> bool {
        match self.try_save(backend) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to save store");
                false
            }
        }
    }
}
