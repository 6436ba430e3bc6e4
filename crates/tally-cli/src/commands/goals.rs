//! Goal command implementations (progress, contribute)

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use tally_core::goal;

use super::load_goal;

pub fn cmd_goal_progress(file: &Path) -> Result<()> {
    let g = load_goal(file)?;
    let progress = goal::progress(&g);

    println!();
    println!("  🎯 {}", g.name);
    println!("  ─────────────────────────────────────────");
    println!("  Saved: {:.2} of {:.2}", g.current_amount, g.target_amount);
    println!("  Progress: {:.1}%", progress * 100.0);
    println!();

    Ok(())
}

pub fn cmd_goal_contribute(file: &Path, amount: f64, write: bool) -> Result<()> {
    let g = load_goal(file)?;
    let (updated, contribution) = goal::contribute(&g, amount, Utc::now())?;

    println!();
    println!("  🎯 {}", updated.name);
    println!("  ─────────────────────────────────────────");
    println!("  Contributed: {:.2}", contribution.amount);
    println!(
        "  Saved: {:.2} of {:.2}",
        updated.current_amount, updated.target_amount
    );
    println!("  Progress: {:.1}%", goal::progress(&updated) * 100.0);
    if updated.current_amount >= updated.target_amount {
        println!("  🎉 Goal reached");
    }
    println!();

    if write {
        let contents = serde_json::to_string_pretty(&updated)?;
        fs::write(file, contents)
            .with_context(|| format!("Failed to write {}", file.display()))?;
        tracing::debug!(file = %file.display(), "Updated goal file");
    }

    Ok(())
}
