//! Keyword rule fallback classifier
//!
//! The guaranteed last line of the pipeline: deterministic, synchronous,
//! never fails, so expense entry can never be blocked on categorization.
//!
//! Scoring counts case-insensitive substring matches of each category's
//! keyword set within the description. The strictly highest score wins; ties
//! break by the fixed [`Category::ALL`] priority order (most specific
//! categories first). The amount participates only as a tie-break signal,
//! never as the primary one.

use tracing::debug;

use crate::models::{Categorization, CategorizationMethod};
use crate::taxonomy::Category;

/// Confidence when at least one keyword matched
pub const MATCH_CONFIDENCE: f64 = 0.7;

/// Confidence for the all-zero-scores `other` fallback. Deliberately
/// "unsure but safe" rather than 0.0: this path is guaranteed and must never
/// read as a failed categorization.
pub const FALLBACK_CONFIDENCE: f64 = 0.5;

/// Amounts at or below this lean food_dining over groceries on an exact tie
const SMALL_TICKET_MAX: f64 = 15.0;

/// Keyword sets per category, all lowercase. Substring matched against the
/// lowercased description.
const KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Groceries,
        &[
            "grocery", "groceries", "supermarket", "whole foods", "wholefds", "trader joe",
            "safeway", "kroger", "aldi", "costco", "market",
        ],
    ),
    (
        Category::FoodDining,
        &[
            "restaurant", "coffee", "starbucks", "cafe", "diner", "pizza", "burger", "taco",
            "sushi", "mcdonald", "chipotle", "doordash", "grubhub", "uber eats", "bakery",
            "deli", "bar ",
        ],
    ),
    (
        Category::Transportation,
        &[
            "uber", "lyft", "taxi", "gas", "fuel", "shell", "chevron", "exxon", "parking",
            "transit", "metro", "toll", "car wash",
        ],
    ),
    (
        Category::Travel,
        &[
            "airline", "flight", "hotel", "motel", "hostel", "airbnb", "delta", "united air",
            "expedia", "cruise", "resort",
        ],
    ),
    (
        Category::BillsUtilities,
        &[
            "electric", "water bill", "utility", "internet", "comcast", "xfinity", "verizon",
            "at&t", "t-mobile", "phone bill", "insurance", "rent payment",
        ],
    ),
    (
        Category::Healthcare,
        &[
            "pharmacy", "cvs", "walgreens", "doctor", "dental", "dentist", "clinic",
            "hospital", "medical", "optometr", "urgent care",
        ],
    ),
    (
        Category::Education,
        &[
            "tuition", "course", "udemy", "coursera", "textbook", "school", "university",
            "college", "bookstore",
        ],
    ),
    (
        Category::Entertainment,
        &[
            "netflix", "spotify", "hulu", "disney", "cinema", "movie", "theater", "concert",
            "ticketmaster", "steam games", "playstation", "xbox",
        ],
    ),
    (
        Category::Shopping,
        &[
            "amazon", "amzn", "target", "walmart", "ebay", "etsy", "best buy", "mall",
            "outlet", "nordstrom", "clothing",
        ],
    ),
    (
        Category::HomeGarden,
        &[
            "home depot", "lowes", "ikea", "furniture", "garden", "nursery", "hardware",
            "wayfair",
        ],
    ),
    (
        Category::PersonalCare,
        &[
            "salon", "barber", "spa", "haircut", "gym", "fitness", "peloton", "cosmetic",
            "nails",
        ],
    ),
    (
        Category::GiftsDonations,
        &["donation", "charity", "gofundme", "red cross", "gift"],
    ),
    (
        Category::Business,
        &[
            "office supplies", "fedex", "ups store", "printing", "linkedin", "coworking",
            "zoom.us",
        ],
    ),
    // Category::Other carries no keywords: it is the fallback, not a match
];

/// Deterministic rule-based categorizer
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Categorize a description. Never fails, never suspends.
    pub fn classify(&self, description: &str, amount: Option<f64>) -> Categorization {
        let haystack = description.to_lowercase();

        let mut best_score = 0usize;
        let mut tied: Vec<Category> = Vec::new();
        for (category, keywords) in KEYWORDS {
            let score = keywords.iter().filter(|k| haystack.contains(**k)).count();
            if score > best_score {
                best_score = score;
                tied.clear();
                tied.push(*category);
            } else if score == best_score && score > 0 {
                tied.push(*category);
            }
        }

        if best_score == 0 {
            debug!(description = %description, "No keyword matches, falling back to other");
            return Categorization {
                category: Category::Other,
                confidence: FALLBACK_CONFIDENCE,
                method: CategorizationMethod::Keyword,
            };
        }

        let category = Self::break_tie(&tied, amount);
        debug!(
            description = %description,
            category = %category,
            score = best_score,
            "Keyword match"
        );
        Categorization {
            category,
            confidence: MATCH_CONFIDENCE,
            method: CategorizationMethod::Keyword,
        }
    }

    /// Resolve a score tie. Amount is the only secondary signal: a
    /// small-ticket groceries/food_dining tie leans food_dining. Everything
    /// else falls through to the fixed priority order, which KEYWORDS
    /// already encodes (it is declared in `Category::ALL` order).
    fn break_tie(tied: &[Category], amount: Option<f64>) -> Category {
        if let Some(amount) = amount {
            if amount <= SMALL_TICKET_MAX
                && tied.contains(&Category::Groceries)
                && tied.contains(&Category::FoodDining)
            {
                return Category::FoodDining;
            }
        }
        tied[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_keyword_match() {
        let classifier = KeywordClassifier::new();
        let result = classifier.classify("SHELL OIL 57442", None);
        assert_eq!(result.category, Category::Transportation);
        assert_eq!(result.confidence, MATCH_CONFIDENCE);
        assert_eq!(result.method, CategorizationMethod::Keyword);
    }

    #[test]
    fn test_multiple_matches_highest_score_wins() {
        let classifier = KeywordClassifier::new();
        // "coffee" and "starbucks" both hit food_dining; nothing else scores 2
        let result = classifier.classify("Coffee at Starbucks", None);
        assert_eq!(result.category, Category::FoodDining);
        assert_eq!(result.confidence, MATCH_CONFIDENCE);
    }

    #[test]
    fn test_case_insensitive() {
        let classifier = KeywordClassifier::new();
        let upper = classifier.classify("NETFLIX.COM/BILL", None);
        let lower = classifier.classify("netflix.com/bill", None);
        assert_eq!(upper.category, Category::Entertainment);
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_no_match_falls_back_to_other() {
        let classifier = KeywordClassifier::new();
        let result = classifier.classify("xyzqqq123", None);
        assert_eq!(result.category, Category::Other);
        assert_eq!(result.confidence, FALLBACK_CONFIDENCE);
        assert_eq!(result.method, CategorizationMethod::Keyword);
    }

    #[test]
    fn test_tie_breaks_by_priority_order() {
        let classifier = KeywordClassifier::new();
        // "market" (groceries) and "amazon" (shopping) score 1 each;
        // groceries ranks higher in the priority order
        let result = classifier.classify("AMAZON FRESH MARKET", None);
        assert_eq!(result.category, Category::Groceries);
    }

    #[test]
    fn test_uber_eats_outscores_plain_uber() {
        let classifier = KeywordClassifier::new();
        // "uber eats" hits food_dining while "uber" hits transportation;
        // both score 1, and food_dining wins the priority tie-break
        let result = classifier.classify("UBER EATS ORDER", None);
        assert_eq!(result.category, Category::FoodDining);
    }

    #[test]
    fn test_amount_tie_break_small_ticket() {
        let classifier = KeywordClassifier::new();
        // "market" ties groceries; "deli" ties food_dining. A small amount
        // leans the tie toward food_dining, a large one leaves the priority
        // order in charge.
        let small = classifier.classify("CORNER MARKET DELI", Some(8.50));
        assert_eq!(small.category, Category::FoodDining);

        let large = classifier.classify("CORNER MARKET DELI", Some(92.00));
        assert_eq!(large.category, Category::Groceries);
    }

    #[test]
    fn test_deterministic() {
        let classifier = KeywordClassifier::new();
        let a = classifier.classify("TRADER JOE'S #552", Some(43.12));
        let b = classifier.classify("TRADER JOE'S #552", Some(43.12));
        assert_eq!(a, b);
    }
}
