//! Per-collection last-writer-wins merge.

use branchbook_model::Syncable;
use std::collections::BTreeMap;

/// Merges two collections of the same record type by id.
///
/// The map is seeded from `local`; each remote record replaces the local
/// entry only if no local entry exists or the remote freshness timestamp is
/// strictly greater. Ties favor local. Records with an empty id are skipped
/// on both sides.
///
/// The output is sorted by id for determinism, but callers must not rely on
/// any particular order.
#[must_use]
pub fn merge_collection<R: Syncable + Clone>(local: &[R], remote: &[R]) -> Vec<R> {
    let mut by_id: BTreeMap<&str, &R> = BTreeMap::new();

    for record in local {
        if record.id().is_empty() {
            continue;
        }
        by_id.insert(record.id(), record);
    }

    for record in remote {
        if record.id().is_empty() {
            continue;
        }
        match by_id.get(record.id()) {
            Some(existing) if record.freshness() <= existing.freshness() => {}
            _ => {
                by_id.insert(record.id(), record);
            }
        }
    }

    by_id.into_values().cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use branchbook_model::{Transaction, TransactionKind};
    use chrono::{DateTime, Utc};

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn tx(id: &str, amount: i64, updated: &str) -> Transaction {
        let mut t = Transaction::new("b1", "2024-01-01", amount, TransactionKind::Income, "sales");
        t.id = id.to_string();
        t.updated_at = Some(ts(updated));
        t
    }

    #[test]
    fn newer_remote_wins() {
        let local = vec![tx("t1", 100, "2024-01-01T00:00:00Z")];
        let remote = vec![tx("t1", 150, "2024-01-02T00:00:00Z")];

        let merged = merge_collection(&local, &remote);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].amount, 150);
    }

    #[test]
    fn older_remote_loses() {
        let local = vec![tx("t1", 100, "2024-01-02T00:00:00Z")];
        let remote = vec![tx("t1", 150, "2024-01-01T00:00:00Z")];

        let merged = merge_collection(&local, &remote);
        assert_eq!(merged[0].amount, 100);
    }

    #[test]
    fn tie_favors_local() {
        let local = vec![tx("t1", 100, "2024-01-01T00:00:00Z")];
        let remote = vec![tx("t1", 150, "2024-01-01T00:00:00Z")];

        let merged = merge_collection(&local, &remote);
        assert_eq!(merged[0].amount, 100);
    }

    #[test]
    fn newer_tombstone_survives_older_live_record() {
        let mut local = tx("t2", 0, "2024-02-01T00:00:00Z");
        local.tombstone(ts("2024-02-01T00:00:00Z"));
        let remote = vec![tx("t2", 50, "2024-01-15T00:00:00Z")];

        let merged = merge_collection(&[local], &remote);
        assert_eq!(merged.len(), 1);
        assert!(merged[0].is_deleted());
    }

    #[test]
    fn newer_live_record_beats_older_tombstone() {
        let mut local = tx("t2", 0, "2024-01-10T00:00:00Z");
        local.tombstone(ts("2024-01-10T00:00:00Z"));
        let remote = vec![tx("t2", 50, "2024-01-15T00:00:00Z")];

        let merged = merge_collection(&[local], &remote);
        assert!(!merged[0].is_deleted());
        assert_eq!(merged[0].amount, 50);
    }

    #[test]
    fn disjoint_ids_union() {
        let local = vec![tx("a", 1, "2024-01-01T00:00:00Z")];
        let remote = vec![tx("b", 2, "2024-01-01T00:00:00Z")];

        let merged = merge_collection(&local, &remote);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn empty_id_is_skipped() {
        let local = vec![tx("", 1, "2024-01-01T00:00:00Z")];
        let remote = vec![tx("", 2, "2024-01-01T00:00:00Z"), tx("ok", 3, "2024-01-01T00:00:00Z")];

        let merged = merge_collection(&local, &remote);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].id, "ok");
    }

    #[test]
    fn missing_timestamps_fall_back_to_epoch() {
        let mut stale = tx("t1", 1, "2024-01-01T00:00:00Z");
        stale.updated_at = None;
        let fresh = tx("t1", 2, "2024-01-01T00:00:00Z");

        let merged = merge_collection(&[stale], &[fresh]);
        assert_eq!(merged[0].amount, 2);
    }
}
