//! In-memory transaction store
//!
//! Owns the categorized transaction collection for a user/period. The
//! persistence engine itself lives with the excluded storage collaborator;
//! this store defines the record shape and the mutation rules that
//! collaborator must honor: inserts and overrides are atomic single-record
//! updates, a category override happens at most once per transaction, and
//! deletion is always an explicit caller operation.

use chrono::Utc;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{round_cents, CategorizationMethod, NewTransaction, Period, Transaction};
use crate::taxonomy::Category;

/// Owner of the categorized transaction collection
#[derive(Debug, Default)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
    next_id: u64,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a newly categorized transaction. Validates the record shape;
    /// categorization is the pipeline's job and is taken as supplied.
    pub fn insert(&mut self, new: NewTransaction) -> Result<&Transaction> {
        let description = new.description.trim();
        if description.is_empty() {
            return Err(Error::Validation(
                "description must be non-empty".to_string(),
            ));
        }
        if !new.amount.is_finite() || new.amount <= 0.0 {
            return Err(Error::Validation(format!(
                "amount must be positive: {}",
                new.amount
            )));
        }

        self.next_id += 1;
        let id = format!("tx-{}", self.next_id);
        debug!(id = %id, category = %new.categorization.category, "Inserting transaction");

        self.transactions.push(Transaction {
            id,
            description: description.to_string(),
            amount: round_cents(new.amount),
            occurred_at: new.occurred_at,
            category: new.categorization.category,
            method: new.categorization.method,
            confidence: new.categorization.confidence,
            overridden: false,
            created_at: Utc::now(),
        });
        Ok(self.transactions.last().expect("just pushed"))
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| tx.id == id)
    }

    /// All transactions in insertion order
    pub fn list(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Transactions whose date falls inside the period
    pub fn list_for_period(&self, period: &Period) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|tx| period.contains(tx.occurred_at))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Explicit user override of the assigned category. Allowed exactly
    /// once per transaction; the method becomes manual with confidence 1.0.
    pub fn override_category(&mut self, id: &str, category: Category) -> Result<&Transaction> {
        let tx = self
            .transactions
            .iter_mut()
            .find(|tx| tx.id == id)
            .ok_or_else(|| Error::NotFound(format!("transaction {}", id)))?;

        if tx.overridden {
            return Err(Error::Validation(format!(
                "transaction {} category was already overridden",
                id
            )));
        }

        debug!(id = %id, from = %tx.category, to = %category, "Overriding category");
        tx.category = category;
        tx.method = CategorizationMethod::Manual;
        tx.confidence = 1.0;
        tx.overridden = true;
        Ok(tx)
    }

    /// Explicit deletion; returns the removed record
    pub fn remove(&mut self, id: &str) -> Result<Transaction> {
        let idx = self
            .transactions
            .iter()
            .position(|tx| tx.id == id)
            .ok_or_else(|| Error::NotFound(format!("transaction {}", id)))?;
        Ok(self.transactions.remove(idx))
    }
}
