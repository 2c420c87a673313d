//! Balance and report aggregation.
//!
//! Pure functions over a [`Dataset`] snapshot. Tombstoned records are
//! excluded everywhere; the report layer sees only live data.

use crate::dataset::Dataset;
use crate::record::Syncable;
use crate::transaction::TransactionKind;
use std::collections::BTreeMap;

/// Aggregated balances for one branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchSummary {
    /// Branch id.
    pub branch_id: String,
    /// Branch display name.
    pub name: String,
    /// Cash balance: opening cash plus cash takings minus expenses.
    pub cash: i64,
    /// Card balance: opening card plus card takings.
    pub card: i64,
    /// Delivery takings, tracked separately from both balances.
    pub delivery: i64,
    /// Total income, cents.
    pub income: i64,
    /// Total expenses, cents.
    pub expenses: i64,
}

impl BranchSummary {
    /// Net position across all channels.
    #[must_use]
    pub fn net(&self) -> i64 {
        self.cash + self.card + self.delivery
    }
}

/// Computes per-branch balances from opening balances plus live
/// transactions.
///
/// Incomes with a breakdown are split across channels; incomes without one
/// count as cash. Expenses come out of the cash balance.
#[must_use]
pub fn branch_summaries(dataset: &Dataset) -> Vec<BranchSummary> {
    let mut summaries: BTreeMap<&str, BranchSummary> = dataset
        .branches
        .iter()
        .filter(|b| !b.is_deleted())
        .map(|b| {
            (
                b.id.as_str(),
                BranchSummary {
                    branch_id: b.id.clone(),
                    name: b.name.clone(),
                    cash: b.opening_cash,
                    card: b.opening_card,
                    delivery: 0,
                    income: 0,
                    expenses: 0,
                },
            )
        })
        .collect();

    for t in dataset.transactions.iter().filter(|t| !t.is_deleted()) {
        let Some(summary) = summaries.get_mut(t.branch_id.as_str()) else {
            continue;
        };
        match t.kind {
            TransactionKind::Income => {
                summary.income += t.amount;
                match &t.income_breakdown {
                    Some(split) => {
                        summary.cash += split.cash;
                        summary.card += split.card;
                        summary.delivery += split.delivery;
                    }
                    None => summary.cash += t.amount,
                }
            }
            TransactionKind::Expense => {
                summary.expenses += t.amount;
                summary.cash -= t.amount;
            }
        }
    }

    summaries.into_values().collect()
}

/// Sums live expenses per category, sorted by category name.
#[must_use]
pub fn category_totals(dataset: &Dataset) -> Vec<(String, i64)> {
    let mut totals: BTreeMap<String, i64> = BTreeMap::new();
    for t in dataset.transactions.iter().filter(|t| !t.is_deleted()) {
        if t.kind == TransactionKind::Expense {
            *totals.entry(t.category.clone()).or_insert(0) += t.amount;
        }
    }
    totals.into_iter().collect()
}
