//! JSON-file snapshot store.

use branchbook_model::Dataset;
use branchbook_sync::{LocalStore, SyncError, SyncResult};
use std::path::{Path, PathBuf};

/// A [`LocalStore`] backed by a single JSON file.
///
/// A missing file loads as an empty dataset, so a fresh device can sync
/// before it has ever saved anything. Saves write the whole document; the
/// sync core never does partial writes.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store for the given file path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl LocalStore for JsonFileStore {
    fn load(&self) -> SyncResult<Dataset> {
        if !self.path.exists() {
            return Ok(Dataset::empty());
        }
        let body = std::fs::read_to_string(&self.path)
            .map_err(|e| SyncError::Store(format!("read {}: {e}", self.path.display())))?;
        serde_json::from_str(&body)
            .map_err(|e| SyncError::Store(format!("parse {}: {e}", self.path.display())))
    }

    fn save(&self, dataset: &Dataset) -> SyncResult<()> {
        let body = serde_json::to_string_pretty(dataset)
            .map_err(|e| SyncError::Store(format!("encode snapshot: {e}")))?;
        std::fs::write(&self.path, body)
            .map_err(|e| SyncError::Store(format!("write {}: {e}", self.path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use branchbook_model::Branch;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("ledger.json"));
        assert_eq!(store.load().unwrap(), Dataset::empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("ledger.json"));

        let mut ds = Dataset::empty();
        ds.branches.push(Branch::new("Downtown", "1 Main St"));
        store.save(&ds).unwrap();

        assert_eq!(store.load().unwrap(), ds);
    }
}
