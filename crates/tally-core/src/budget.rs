//! Budget utilization
//!
//! Derived per request from the budget record and the transaction set; never
//! cached across mutations of the underlying transactions.

use tracing::debug;

use crate::models::{round_cents, Budget, BudgetStatus, Transaction, Utilization};

/// Compute the utilization status of a budget against a transaction set.
///
/// Spent = sum of amounts whose date falls inside the budget period. A zero
/// limit with positive spend reports [`Utilization::Unbounded`] rather than
/// dividing; a zero limit with zero spend is simply an unspent budget.
pub fn status(budget: &Budget, transactions: &[Transaction]) -> BudgetStatus {
    let spent_amount = round_cents(
        transactions
            .iter()
            .filter(|tx| budget.period.contains(tx.occurred_at))
            .map(|tx| tx.amount)
            .sum(),
    );

    let utilization = if budget.total_limit > 0.0 {
        Utilization::Ratio(spent_amount / budget.total_limit)
    } else if spent_amount > 0.0 {
        Utilization::Unbounded
    } else {
        Utilization::Ratio(0.0)
    };

    let over = utilization.is_over();
    debug!(
        period = %budget.period,
        spent = spent_amount,
        limit = budget.total_limit,
        over,
        "Computed budget status"
    );

    BudgetStatus {
        period: budget.period,
        spent_amount,
        total_limit: budget.total_limit,
        utilization,
        over,
    }
}
