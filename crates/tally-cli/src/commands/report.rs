//! Report command implementations (summarize, budget)

use std::path::Path;

use anyhow::{anyhow, Result};
use tally_core::{aggregate, budget, Budget, Period, Utilization};

use super::load_transactions;

pub fn cmd_summarize(file: &Path, period: Option<&str>) -> Result<()> {
    let transactions = load_transactions(file)?;
    let period = period
        .map(|p| p.parse::<Period>().map_err(|e| anyhow!(e)))
        .transpose()?;

    let summary = aggregate::summarize(&transactions, period.as_ref());

    println!();
    match period {
        Some(p) => println!("  💸 Spending for {}", p),
        None => println!("  💸 Spending (all periods)"),
    }
    println!("  ─────────────────────────────────────────");

    if summary.breakdown.is_empty() {
        println!("  (no transactions)");
    }
    for (category, totals) in &summary.breakdown {
        println!(
            "  {:<18} {:>10.2}  ({} transaction{})",
            category.as_str(),
            totals.total_amount,
            totals.count,
            if totals.count == 1 { "" } else { "s" }
        );
    }

    println!("  ─────────────────────────────────────────");
    println!("  Total:   {:.2}", summary.total_amount);
    println!("  Average: {:.2}", summary.average_amount);
    println!();

    Ok(())
}

pub fn cmd_budget(file: &Path, period: &str, limit: f64) -> Result<()> {
    let transactions = load_transactions(file)?;
    let period: Period = period.parse().map_err(|e: String| anyhow!(e))?;

    let status = budget::status(
        &Budget {
            period,
            total_limit: limit,
        },
        &transactions,
    );

    println!();
    println!("  📊 Budget for {}", status.period);
    println!("  ─────────────────────────────────────────");
    println!("  Spent: {:.2} of {:.2}", status.spent_amount, status.total_limit);
    match status.utilization {
        Utilization::Ratio(ratio) => println!("  Utilization: {:.1}%", ratio * 100.0),
        Utilization::Unbounded => println!("  Utilization: unbounded (zero limit)"),
    }
    if status.over {
        println!("  ⚠️  Over budget");
    } else {
        println!("  ✅ Within budget");
    }
    println!();

    Ok(())
}
