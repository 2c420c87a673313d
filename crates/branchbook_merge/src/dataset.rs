//! Dataset-level merge.

use crate::collection::merge_collection;
use branchbook_model::{Dataset, SCHEMA_VERSION};
use chrono::Utc;

/// Hard cap on the audit log after a merge.
///
/// The truncation is not tombstone-aware: entries past the cap are dropped
/// unrecoverably on every merge. The audit log is a bounded recent window,
/// not a complete history.
pub const MAX_AUDIT_LOG_ENTRIES: usize = 20;

/// Reconciles two dataset snapshots into one.
///
/// Each collection is merged independently with [`merge_collection`]. The
/// merged audit log is then sorted newest-first and truncated to
/// [`MAX_AUDIT_LOG_ENTRIES`]. The report-settings record is taken whole
/// from whichever side has one, preferring remote. The result is stamped
/// with the current schema version and the current instant as `last_sync`.
#[must_use]
pub fn merge_dataset(local: &Dataset, remote: &Dataset) -> Dataset {
    let mut audit_logs = merge_collection(&local.audit_logs, &remote.audit_logs);
    audit_logs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    audit_logs.truncate(MAX_AUDIT_LOG_ENTRIES);

    Dataset {
        version: SCHEMA_VERSION.to_string(),
        last_sync: Some(Utc::now()),
        transactions: merge_collection(&local.transactions, &remote.transactions),
        branches: merge_collection(&local.branches, &remote.branches),
        users: merge_collection(&local.users, &remote.users),
        expense_categories: merge_collection(
            &local.expense_categories,
            &remote.expense_categories,
        ),
        recurring_expenses: merge_collection(
            &local.recurring_expenses,
            &remote.recurring_expenses,
        ),
        audit_logs,
        report_settings: remote
            .report_settings
            .clone()
            .or_else(|| local.report_settings.clone()),
    }
}
