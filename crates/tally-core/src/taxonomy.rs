//! The fixed expense category taxonomy
//!
//! Every categorization path (remote classifier, keyword rules, manual entry)
//! must land on one of these values. Labels coming back from the remote
//! classifier are mapped through [`Category::normalize`]; anything that does
//! not map is treated as unusable rather than silently accepted.
//!
//! The declaration order doubles as the tie-break priority for the keyword
//! classifier: more specific categories rank higher (groceries beats
//! shopping), with `other` last. Adding a category is a taxonomy version
//! bump, never an inference-time decision.

use serde::{Deserialize, Serialize};

/// One value from the fixed expense taxonomy
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Groceries,
    FoodDining,
    Transportation,
    Travel,
    BillsUtilities,
    Healthcare,
    Education,
    Entertainment,
    Shopping,
    HomeGarden,
    PersonalCare,
    GiftsDonations,
    Business,
    /// Reserved fallback. Always exists, never rejected.
    Other,
}

impl Category {
    /// All categories in tie-break priority order (most specific first,
    /// `other` last).
    pub const ALL: [Category; 14] = [
        Self::Groceries,
        Self::FoodDining,
        Self::Transportation,
        Self::Travel,
        Self::BillsUtilities,
        Self::Healthcare,
        Self::Education,
        Self::Entertainment,
        Self::Shopping,
        Self::HomeGarden,
        Self::PersonalCare,
        Self::GiftsDonations,
        Self::Business,
        Self::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Groceries => "groceries",
            Self::FoodDining => "food_dining",
            Self::Transportation => "transportation",
            Self::Travel => "travel",
            Self::BillsUtilities => "bills_utilities",
            Self::Healthcare => "healthcare",
            Self::Education => "education",
            Self::Entertainment => "entertainment",
            Self::Shopping => "shopping",
            Self::HomeGarden => "home_garden",
            Self::PersonalCare => "personal_care",
            Self::GiftsDonations => "gifts_donations",
            Self::Business => "business",
            Self::Other => "other",
        }
    }

    /// Map a free-form label onto the taxonomy.
    ///
    /// Case- and surrounding-whitespace-insensitive exact match; no fuzzy
    /// matching. Returns `None` for anything outside the fixed set.
    pub fn normalize(label: &str) -> Option<Category> {
        let needle = label.trim().to_lowercase();
        Self::ALL.iter().copied().find(|c| c.as_str() == needle)
    }

    /// Whether a label maps onto the taxonomy
    pub fn is_valid(label: &str) -> bool {
        Self::normalize(label).is_some()
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::normalize(s).ok_or_else(|| format!("Unknown category: {}", s))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
