//! Domain models for Tally

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::taxonomy::Category;

/// Round an amount to currency-minor-unit (cent) precision
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Which pipeline stage produced the final category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategorizationMethod {
    /// Remote classifier result accepted
    Remote,
    /// Keyword rule fallback
    Keyword,
    /// Explicit category from the user
    Manual,
    /// Not yet categorized
    #[default]
    None,
}

impl CategorizationMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Keyword => "keyword",
            Self::Manual => "manual",
            Self::None => "none",
        }
    }
}

impl std::str::FromStr for CategorizationMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "remote" => Ok(Self::Remote),
            "keyword" => Ok(Self::Keyword),
            "manual" => Ok(Self::Manual),
            "none" => Ok(Self::None),
            _ => Err(format!("Unknown categorization method: {}", s)),
        }
    }
}

impl std::fmt::Display for CategorizationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of running a description through the categorization pipeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Categorization {
    pub category: Category,
    /// Certainty in the assigned category, in [0,1]
    pub confidence: f64,
    pub method: CategorizationMethod,
}

/// A logged discretionary transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Opaque id assigned by the caller/store
    pub id: String,
    pub description: String,
    /// Always positive; expenses only
    pub amount: f64,
    pub occurred_at: NaiveDate,
    pub category: Category,
    pub method: CategorizationMethod,
    /// Defined and in [0,1] whenever method != none
    pub confidence: f64,
    /// Whether the user has already overridden the category once
    #[serde(default)]
    pub overridden: bool,
    pub created_at: DateTime<Utc>,
}

/// A new transaction to be inserted into the store
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub description: String,
    pub amount: f64,
    pub occurred_at: NaiveDate,
    pub categorization: Categorization,
}

/// A budget period key, formatted `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Whether a date falls inside this period
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl std::str::FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (y, m) = s
            .split_once('-')
            .ok_or_else(|| format!("Invalid period (expected YYYY-MM): {}", s))?;
        let year: i32 = y
            .parse()
            .map_err(|_| format!("Invalid period year: {}", s))?;
        let month: u32 = m
            .parse()
            .map_err(|_| format!("Invalid period month: {}", s))?;
        Self::new(year, month).ok_or_else(|| format!("Month out of range: {}", s))
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl TryFrom<String> for Period {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Period> for String {
    fn from(p: Period) -> String {
        p.to_string()
    }
}

/// Per-category totals inside a breakdown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct CategoryTotals {
    pub total_amount: f64,
    pub count: usize,
}

/// Spending summary for a transaction set and optional period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    /// Sparse: categories without transactions in the period are absent
    pub breakdown: std::collections::BTreeMap<Category, CategoryTotals>,
    pub total_amount: f64,
    /// Explicit 0.0 when the set is empty, never NaN
    pub average_amount: f64,
    pub count: usize,
}

/// A spending limit for one period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub period: Period,
    pub total_limit: f64,
}

/// Spent/limit ratio, with a sentinel for zero-limit budgets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "ratio", rename_all = "lowercase")]
pub enum Utilization {
    Ratio(f64),
    /// Positive spend against a zero limit. Conceptually infinite; reported
    /// as an explicit flag instead of a float infinity.
    Unbounded,
}

impl Utilization {
    pub fn ratio(&self) -> Option<f64> {
        match self {
            Self::Ratio(r) => Some(*r),
            Self::Unbounded => None,
        }
    }

    pub fn is_over(&self) -> bool {
        match self {
            Self::Ratio(r) => *r > 1.0,
            Self::Unbounded => true,
        }
    }
}

/// Derived budget state; recomputed per request, never cached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub period: Period,
    pub spent_amount: f64,
    pub total_limit: f64,
    pub utilization: Utilization,
    pub over: bool,
}

/// A savings goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub target_amount: f64,
    /// Never exceeds target_amount
    pub current_amount: f64,
}

/// Audit record of one accepted contribution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contribution {
    pub goal_id: String,
    /// The full requested amount, even when the goal cap saturates
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_parse_and_display() {
        let p: Period = "2025-08".parse().unwrap();
        assert_eq!(p.year(), 2025);
        assert_eq!(p.month(), 8);
        assert_eq!(p.to_string(), "2025-08");
    }

    #[test]
    fn test_period_rejects_garbage() {
        assert!("2025".parse::<Period>().is_err());
        assert!("2025-13".parse::<Period>().is_err());
        assert!("2025-00".parse::<Period>().is_err());
        assert!("20a5-08".parse::<Period>().is_err());
    }

    #[test]
    fn test_period_contains() {
        let p: Period = "2025-08".parse().unwrap();
        assert!(p.contains(NaiveDate::from_ymd_opt(2025, 8, 1).unwrap()));
        assert!(p.contains(NaiveDate::from_ymd_opt(2025, 8, 31).unwrap()));
        assert!(!p.contains(NaiveDate::from_ymd_opt(2025, 7, 31).unwrap()));
        assert!(!p.contains(NaiveDate::from_ymd_opt(2024, 8, 1).unwrap()));
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(10.004), 10.0);
        assert_eq!(round_cents(10.006), 10.01);
        assert_eq!(round_cents(0.1 + 0.2), 0.3);
    }

    #[test]
    fn test_utilization_over() {
        assert!(!Utilization::Ratio(0.9).is_over());
        assert!(Utilization::Ratio(1.01).is_over());
        assert!(Utilization::Unbounded.is_over());
        assert_eq!(Utilization::Unbounded.ratio(), None);
    }

    #[test]
    fn test_method_roundtrip() {
        for m in [
            CategorizationMethod::Remote,
            CategorizationMethod::Keyword,
            CategorizationMethod::Manual,
            CategorizationMethod::None,
        ] {
            assert_eq!(m.as_str().parse::<CategorizationMethod>().unwrap(), m);
        }
    }
}
