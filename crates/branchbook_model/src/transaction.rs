//! Ledger transactions.

use crate::record::{new_record_id, Syncable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in.
    Income,
    /// Money going out.
    Expense,
}

/// Payment status for expenses that may be settled later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Settled.
    Paid,
    /// Still owed.
    Debt,
}

/// Structured split of an income amount by payment channel.
///
/// All three parts are cents; their sum is the transaction amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeBreakdown {
    /// Cash takings.
    pub cash: i64,
    /// Card takings.
    pub card: i64,
    /// Delivery-platform takings.
    pub delivery: i64,
}

impl IncomeBreakdown {
    /// Total across all channels.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.cash + self.card + self.delivery
    }
}

/// A frozen snapshot of a transaction's financial fields, appended to the
/// edit history before an in-place edit overwrites them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditSnapshot {
    /// Amount before the edit, in cents.
    pub amount: i64,
    /// Direction before the edit.
    pub kind: TransactionKind,
    /// Category before the edit.
    pub category: String,
    /// Income breakdown before the edit, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_breakdown: Option<IncomeBreakdown>,
    /// Expense source before the edit, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense_source: Option<String>,
    /// Payment status before the edit, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    /// When the edit happened.
    pub edited_at: DateTime<Utc>,
}

/// A single income or expense entry for a branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Stable record id.
    pub id: String,
    /// Branch the entry belongs to.
    pub branch_id: String,
    /// Business date, `YYYY-MM-DD`. Ordered lexicographically.
    pub date: String,
    /// Amount in cents, always positive; `kind` carries the direction.
    pub amount: i64,
    /// Direction.
    pub kind: TransactionKind,
    /// Category name.
    pub category: String,
    /// Per-channel split for incomes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_breakdown: Option<IncomeBreakdown>,
    /// Where an expense was paid from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense_source: Option<String>,
    /// Settlement status for expenses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    /// Free-text notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Append-only history of prior financial states.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub edit_history: Vec<EditSnapshot>,
    /// Freshness timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Tombstone marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Transaction {
    /// Creates a new transaction with a fresh id, stamped now.
    #[must_use]
    pub fn new(
        branch_id: impl Into<String>,
        date: impl Into<String>,
        amount: i64,
        kind: TransactionKind,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: new_record_id(),
            branch_id: branch_id.into(),
            date: date.into(),
            amount,
            kind,
            category: category.into(),
            income_breakdown: None,
            expense_source: None,
            payment_status: None,
            notes: None,
            edit_history: Vec::new(),
            updated_at: Some(Utc::now()),
            deleted_at: None,
        }
    }

    /// Freezes the current financial fields into the edit history, then
    /// applies the new values and bumps the freshness timestamp.
    pub fn apply_edit(
        &mut self,
        amount: i64,
        kind: TransactionKind,
        category: impl Into<String>,
        now: DateTime<Utc>,
    ) {
        self.edit_history.push(EditSnapshot {
            amount: self.amount,
            kind: self.kind,
            category: self.category.clone(),
            income_breakdown: self.income_breakdown,
            expense_source: self.expense_source.clone(),
            payment_status: self.payment_status,
            edited_at: now,
        });
        self.amount = amount;
        self.kind = kind;
        self.category = category.into();
        self.updated_at = Some(now);
    }

    /// Bumps the freshness timestamp without changing anything else.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now);
    }

    /// Marks the record deleted. The record stays in its collection.
    pub fn tombstone(&mut self, now: DateTime<Utc>) {
        self.deleted_at = Some(now);
        self.updated_at = Some(now);
    }
}

impl Syncable for Transaction {
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
