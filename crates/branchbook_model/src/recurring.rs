//! Recurring expense templates.

use crate::record::{new_record_id, Syncable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A template that materializes an expense on a fixed day of each month.
///
/// The template itself is synchronized; the transactions it creates are
/// ordinary [`crate::Transaction`] records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTransaction {
    /// Stable record id.
    pub id: String,
    /// Branch the template belongs to.
    pub branch_id: String,
    /// Amount in cents.
    pub amount: i64,
    /// Expense category.
    pub category: String,
    /// Where the expense is paid from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense_source: Option<String>,
    /// Day of month the expense falls due, 1..=31. Months shorter than the
    /// configured day clamp to their last day.
    pub day_of_month: u8,
    /// Freshness timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Tombstone marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl RecurringTransaction {
    /// Creates a new template with a fresh id, stamped now.
    #[must_use]
    pub fn new(
        branch_id: impl Into<String>,
        amount: i64,
        category: impl Into<String>,
        day_of_month: u8,
    ) -> Self {
        Self {
            id: new_record_id(),
            branch_id: branch_id.into(),
            amount,
            category: category.into(),
            expense_source: None,
            day_of_month,
            updated_at: Some(Utc::now()),
            deleted_at: None,
        }
    }

    /// Bumps the freshness timestamp.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }

    /// Marks the template deleted.
    pub fn tombstone(&mut self, now: DateTime<Utc>) {
        self.deleted_at = Some(now);
        self.updated_at = Some(now);
    }
}

impl Syncable for RecurringTransaction {
    fn id(&self) -> &str {
        &self.id
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }
}
