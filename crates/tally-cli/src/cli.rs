//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Log expenses and track budgets and savings goals
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Expense categorization and budget tracking", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Categorize an expense description
    Categorize {
        /// Free-text transaction description
        description: String,

        /// Transaction amount (tie-break signal only)
        #[arg(short, long)]
        amount: Option<f64>,

        /// Explicit category; skips both classifiers
        #[arg(short, long)]
        category: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize a transaction file by category
    Summarize {
        /// Transaction JSON file
        #[arg(short, long)]
        file: PathBuf,

        /// Restrict to one period (YYYY-MM)
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Check spending against a budget limit
    Budget {
        /// Transaction JSON file
        #[arg(short, long)]
        file: PathBuf,

        /// Budget period (YYYY-MM)
        #[arg(short, long)]
        period: String,

        /// Budget limit for the period
        #[arg(short, long)]
        limit: f64,
    },

    /// Savings goal commands
    Goal {
        #[command(subcommand)]
        action: GoalAction,
    },
}

#[derive(Subcommand)]
pub enum GoalAction {
    /// Show progress toward a goal
    Progress {
        /// Goal JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Apply a contribution to a goal
    Contribute {
        /// Goal JSON file
        #[arg(short, long)]
        file: PathBuf,

        /// Contribution amount
        #[arg(short, long)]
        amount: f64,

        /// Write the updated goal back to the file
        #[arg(long)]
        write: bool,
    },
}
