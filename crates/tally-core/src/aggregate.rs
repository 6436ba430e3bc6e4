//! Category breakdowns and period totals
//!
//! Pure functions over a transaction slice. Breakdowns are always derived,
//! never persisted, so they cannot drift from the source data.

use std::collections::BTreeMap;

use crate::models::{round_cents, CategoryTotals, Period, Summary, Transaction};
use crate::taxonomy::Category;

fn in_period(tx: &Transaction, period: Option<&Period>) -> bool {
    period.map_or(true, |p| p.contains(tx.occurred_at))
}

/// Group transactions by category, summing amounts and counting entries.
/// Sparse: categories with no transactions in the period are absent.
pub fn breakdown(
    transactions: &[Transaction],
    period: Option<&Period>,
) -> BTreeMap<Category, CategoryTotals> {
    let mut map: BTreeMap<Category, CategoryTotals> = BTreeMap::new();
    for tx in transactions.iter().filter(|tx| in_period(tx, period)) {
        let entry = map.entry(tx.category).or_default();
        entry.total_amount += tx.amount;
        entry.count += 1;
    }
    for totals in map.values_mut() {
        totals.total_amount = round_cents(totals.total_amount);
    }
    map
}

/// Breakdown plus period totals. The average is an explicit 0.0 for an empty
/// set, never NaN.
pub fn summarize(transactions: &[Transaction], period: Option<&Period>) -> Summary {
    let breakdown = breakdown(transactions, period);
    let count: usize = breakdown.values().map(|t| t.count).sum();
    let total_amount = round_cents(breakdown.values().map(|t| t.total_amount).sum());
    let average_amount = if count == 0 {
        0.0
    } else {
        round_cents(total_amount / count as f64)
    };

    Summary {
        breakdown,
        total_amount,
        average_amount,
        count,
    }
}
