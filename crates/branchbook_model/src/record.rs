//! The syncable record contract.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generates a fresh record id.
///
/// Ids are v4 UUIDs rendered as strings. They are generated on the device
/// that creates the record and never change afterwards; the merge engine
/// uses them as the per-collection merge key.
#[must_use]
pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

/// Contract shared by every synchronized record.
///
/// A record exposes a stable id, a freshness timestamp, and an optional
/// tombstone. The merge engine needs nothing else: last-writer-wins per id,
/// with tombstones treated as ordinary records so a newer deletion beats an
/// older live copy.
pub trait Syncable {
    /// The merge key. Stable and unique within the record's collection.
    fn id(&self) -> &str;

    /// Primary freshness timestamp, bumped on every mutation.
    fn updated_at(&self) -> Option<DateTime<Utc>>;

    /// Secondary timestamp, used when `updated_at` is absent.
    ///
    /// Append-only records (audit log entries) only carry a creation
    /// instant and report it here.
    fn created_at(&self) -> Option<DateTime<Utc>> {
        None
    }

    /// Tombstone marker. A record with `deleted_at` set is logically
    /// deleted but stays in its collection.
    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        None
    }

    /// The timestamp the merge engine orders by: `updated_at`, falling back
    /// to `created_at`, falling back to the epoch.
    fn freshness(&self) -> DateTime<Utc> {
        self.updated_at()
            .or_else(|| self.created_at())
            .unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Returns true if the record is tombstoned.
    fn is_deleted(&self) -> bool {
        self.deleted_at().is_some()
    }
}
