//! The dataset snapshot.

use crate::audit::AuditLogEntry;
use crate::branch::Branch;
use crate::category::Category;
use crate::recurring::RecurringTransaction;
use crate::settings::ReportSettings;
use crate::transaction::Transaction;
use crate::user::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current schema version tag, stamped on every merge.
pub const SCHEMA_VERSION: &str = "2";

/// The full replicated state of one device.
///
/// This exact shape is both the local persisted document and the remote
/// wire payload. Collections are plain vectors; insertion order carries no
/// meaning, the merge engine keys everything by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Schema version tag.
    #[serde(default)]
    pub version: String,
    /// Instant of the last completed merge on this replica.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<DateTime<Utc>>,
    /// Income and expense entries.
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    /// Restaurant branches.
    #[serde(default)]
    pub branches: Vec<Branch>,
    /// User accounts.
    #[serde(default)]
    pub users: Vec<User>,
    /// Expense categories.
    #[serde(default)]
    pub expense_categories: Vec<Category>,
    /// Recurring expense templates.
    #[serde(default)]
    pub recurring_expenses: Vec<RecurringTransaction>,
    /// Bounded recent audit window.
    #[serde(default)]
    pub audit_logs: Vec<AuditLogEntry>,
    /// Report display options, merged whole-record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_settings: Option<ReportSettings>,
}

impl Dataset {
    /// Creates an empty dataset at the current schema version.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            version: SCHEMA_VERSION.to_string(),
            last_sync: None,
            transactions: Vec::new(),
            branches: Vec::new(),
            users: Vec::new(),
            expense_categories: Vec::new(),
            recurring_expenses: Vec::new(),
            audit_logs: Vec::new(),
            report_settings: None,
        }
    }

    /// Compares the replicated content of two snapshots, ignoring the
    /// version tag and the last-sync stamp.
    ///
    /// The orchestrator uses this to decide whether a merged result needs
    /// pushing; the merge stamps `last_sync` on every call, so full
    /// equality would always report a difference.
    #[must_use]
    pub fn same_content(&self, other: &Dataset) -> bool {
        self.transactions == other.transactions
            && self.branches == other.branches
            && self.users == other.users
            && self.expense_categories == other.expense_categories
            && self.recurring_expenses == other.recurring_expenses
            && self.audit_logs == other.audit_logs
            && self.report_settings == other.report_settings
    }

    /// Total number of records across all collections.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.transactions.len()
            + self.branches.len()
            + self.users.len()
            + self.expense_categories.len()
            + self.recurring_expenses.len()
            + self.audit_logs.len()
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::TransactionKind;

    #[test]
    fn empty_dataset_round_trips() {
        let ds = Dataset::empty();
        let json = serde_json::to_string(&ds).unwrap();
        let back: Dataset = serde_json::from_str(&json).unwrap();
        assert_eq!(ds, back);
    }

    #[test]
    fn lenient_deserialization() {
        // A remote blob with only some collections still parses.
        let ds: Dataset = serde_json::from_str(r#"{"version":"2","transactions":[]}"#).unwrap();
        assert!(ds.branches.is_empty());
        assert!(ds.report_settings.is_none());
    }

    #[test]
    fn same_content_ignores_sync_stamp() {
        let mut a = Dataset::empty();
        let mut b = a.clone();
        b.last_sync = Some(Utc::now());
        assert!(a.same_content(&b));

        a.transactions.push(Transaction::new(
            "b1",
            "2024-03-01",
            100,
            TransactionKind::Income,
            "sales",
        ));
        assert!(!a.same_content(&b));
    }
}
