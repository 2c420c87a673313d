//! Local snapshot store adapter.

use crate::error::SyncResult;
use branchbook_model::Dataset;
use parking_lot::Mutex;

/// The opaque local persistence layer.
///
/// The sync core treats local storage as an atomic whole-document
/// key-value store: one load, one save, no partial writes. The actual
/// store (file, embedded database, browser storage) lives outside this
/// crate; [`MemoryStore`] covers tests.
pub trait LocalStore: Send + Sync {
    /// Loads the persisted snapshot.
    fn load(&self) -> SyncResult<Dataset>;

    /// Persists the snapshot, replacing the previous one.
    fn save(&self, dataset: &Dataset) -> SyncResult<()>;
}

/// In-memory store for tests and ephemeral replicas.
#[derive(Debug, Default)]
pub struct MemoryStore {
    dataset: Mutex<Dataset>,
}

impl MemoryStore {
    /// Creates a store holding an empty dataset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with a snapshot.
    #[must_use]
    pub fn with_dataset(dataset: Dataset) -> Self {
        Self {
            dataset: Mutex::new(dataset),
        }
    }
}

impl LocalStore for MemoryStore {
    fn load(&self) -> SyncResult<Dataset> {
        Ok(self.dataset.lock().clone())
    }

    fn save(&self, dataset: &Dataset) -> SyncResult<()> {
        *self.dataset.lock() = dataset.clone();
        Ok(())
    }
}
