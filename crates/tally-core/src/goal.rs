//! Savings goal progress
//!
//! Applying a contribution is the only mutator of a goal's current amount.
//! The update is value-in/value-out: callers persist the returned goal and
//! contribution as one atomic record update.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{round_cents, Contribution, Goal};

/// Apply a contribution to a goal.
///
/// The contribution amount must be positive and finite. The goal's current
/// amount is capped at the target; the returned [`Contribution`] still
/// records the full requested amount for audit. Saturating the cap is normal
/// behavior, not an error.
pub fn contribute(goal: &Goal, amount: f64, at: DateTime<Utc>) -> Result<(Goal, Contribution)> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::Validation(format!(
            "contribution amount must be positive: {}",
            amount
        )));
    }

    let current_amount = round_cents((goal.current_amount + amount).min(goal.target_amount));
    debug!(
        goal = %goal.id,
        amount,
        current = current_amount,
        target = goal.target_amount,
        "Applied contribution"
    );

    let updated = Goal {
        current_amount,
        ..goal.clone()
    };
    let contribution = Contribution {
        goal_id: goal.id.clone(),
        amount,
        timestamp: at,
    };
    Ok((updated, contribution))
}

/// Progress toward the target, clamped to [0,1]. A degenerate non-positive
/// target reports 0.0 rather than NaN.
pub fn progress(goal: &Goal) -> f64 {
    if goal.target_amount <= 0.0 {
        return 0.0;
    }
    (goal.current_amount / goal.target_amount).clamp(0.0, 1.0)
}
