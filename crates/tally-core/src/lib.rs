//! Tally Core Library
//!
//! Shared functionality for the Tally expense tracker:
//! - Fixed category taxonomy with a single normalization entry point
//! - Layered categorization pipeline (remote classifier → keyword rules →
//!   manual), always terminating in a taxonomy-valid category
//! - Pluggable remote classifier backends (Ollama, mock)
//! - Transaction store with once-only category overrides
//! - Category breakdowns and period totals
//! - Budget utilization and savings goal progress

pub mod aggregate;
pub mod budget;
pub mod classify;
pub mod config;
pub mod error;
pub mod goal;
pub mod models;
pub mod store;
pub mod taxonomy;

/// Test utilities including the mock classifier server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use classify::{
    CategorizationPipeline, ClassifierBackend, ClassifierClient, KeywordClassifier, MockBackend,
    OllamaBackend, RemoteClassifier, RemoteLabel,
};
pub use config::ClassifierConfig;
pub use error::{Error, Result};
pub use models::{
    Budget, BudgetStatus, Categorization, CategorizationMethod, CategoryTotals, Contribution,
    Goal, NewTransaction, Period, Summary, Transaction, Utilization,
};
pub use store::TransactionStore;
pub use taxonomy::Category;
