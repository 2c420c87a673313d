//! Status command implementation.

use crate::store::JsonFileStore;
use branchbook_model::report::{branch_summaries, BranchSummary};
use branchbook_sync::LocalStore;
use std::path::Path;

fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

fn print_summary(summary: &BranchSummary) {
    println!(
        "  {:24} cash {:>12}  card {:>12}  delivery {:>12}",
        summary.name,
        format_cents(summary.cash),
        format_cents(summary.card),
        format_cents(summary.delivery),
    );
}

/// Runs the status command.
pub fn run(snapshot: &Path, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = JsonFileStore::new(snapshot);
    let dataset = store.load()?;
    let summaries = branch_summaries(&dataset);

    if format == "json" {
        let balances: Vec<serde_json::Value> = summaries
            .iter()
            .map(|s| {
                serde_json::json!({
                    "branchId": s.branch_id,
                    "name": s.name,
                    "cash": s.cash,
                    "card": s.card,
                    "delivery": s.delivery,
                    "income": s.income,
                    "expenses": s.expenses,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&balances)?);
        return Ok(());
    }

    println!("Snapshot: {}", snapshot.display());
    println!(
        "Records: {} ({} transactions, {} branches, {} users)",
        dataset.record_count(),
        dataset.transactions.len(),
        dataset.branches.len(),
        dataset.users.len(),
    );
    match dataset.last_sync {
        Some(last) => println!("Last sync: {last}"),
        None => println!("Last sync: never"),
    }

    println!("Balances:");
    for summary in &summaries {
        print_summary(summary);
    }

    Ok(())
}
