//! Tally CLI - Expense categorization and budget tracking
//!
//! Usage:
//!   tally categorize "Coffee at Starbucks" --amount 6.50
//!   tally summarize --file transactions.json --period 2025-08
//!   tally budget --file transactions.json --period 2025-08 --limit 300
//!   tally goal contribute --file goal.json --amount 50

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Categorize {
            description,
            amount,
            category,
            json,
        } => commands::cmd_categorize(&description, amount, category.as_deref(), json).await,
        Commands::Summarize { file, period } => {
            commands::cmd_summarize(&file, period.as_deref())
        }
        Commands::Budget {
            file,
            period,
            limit,
        } => commands::cmd_budget(&file, &period, limit),
        Commands::Goal { action } => match action {
            GoalAction::Progress { file } => commands::cmd_goal_progress(&file),
            GoalAction::Contribute {
                file,
                amount,
                write,
            } => commands::cmd_goal_contribute(&file, amount, write),
        },
    }
}
