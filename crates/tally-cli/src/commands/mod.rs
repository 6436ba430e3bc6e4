//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `categorize` - Run a description through the categorization pipeline
//! - `report` - Spending summaries and budget status
//! - `goals` - Savings goal progress and contributions

pub mod categorize;
pub mod goals;
pub mod report;

// Re-export command functions for main.rs
pub use categorize::*;
pub use goals::*;
pub use report::*;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tally_core::{Goal, Transaction};

/// Load a transaction file (JSON array of the persisted record schema)
pub fn load_transactions(path: &Path) -> Result<Vec<Transaction>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Invalid transaction file: {}", path.display()))
}

/// Load a goal file (single JSON record)
pub fn load_goal(path: &Path) -> Result<Goal> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Invalid goal file: {}", path.display()))
}
