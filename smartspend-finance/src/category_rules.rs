//! Deterministic category rules mapping free-text descriptions to the fixed
//! category table.
//!
//! Rules are evaluated top to bottom and the first match wins, so table order
//! is the tie-break ("gas" is Transportation, not Bills & Utilities).

use once_cell::sync::Lazy;
use regex::Regex;
use smartspend_core::Category;

/// One ordered keyword rule
#[derive(Debug)]
pub struct CategoryRule {
    pub category: Category,
    pub keywords: &'static [&'static str],
    pattern: Regex,
}

impl CategoryRule {
    fn new(category: Category, keywords: &'static [&'static str]) -> Self {
        let alternation = keywords
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&alternation).expect("keyword regex");
        Self {
            category,
            keywords,
            pattern,
        }
    }

    /// Match against an already-lowercased description.
    pub fn matches(&self, lowered: &str) -> bool {
        self.pattern.is_match(lowered)
    }
}

static RULES: Lazy<Vec<CategoryRule>> = Lazy::new(|| {
    vec![
        CategoryRule::new(
            Category::FoodDining,
            &[
                "food", "restaurant", "lunch", "dinner", "breakfast", "cafe", "coffee",
                "grocery", "supermarket", "meal",
            ],
        ),
        CategoryRule::new(
            Category::Transportation,
            &[
                "transport", "uber", "lyft", "taxi", "bus", "train", "gas", "fuel", "parking",
                "metro", "subway",
            ],
        ),
        CategoryRule::new(
            Category::BillsUtilities,
            &[
                "electric", "water", "gas", "internet", "phone", "utility", "bill",
                "subscription", "netflix", "spotify",
            ],
        ),
        CategoryRule::new(
            Category::Shopping,
            &["shop", "store", "mall", "amazon", "clothing", "clothes", "shoes", "fashion"],
        ),
        CategoryRule::new(
            Category::Entertainment,
            &[
                "movie", "cinema", "concert", "game", "entertainment", "theater", "party", "bar",
                "club",
            ],
        ),
        CategoryRule::new(
            Category::Healthcare,
            &[
                "doctor", "hospital", "medicine", "pharmacy", "health", "medical", "dental",
                "clinic",
            ],
        ),
        CategoryRule::new(
            Category::Education,
            &["school", "course", "book", "education", "tuition", "class", "training", "learn"],
        ),
        CategoryRule::new(
            Category::Housing,
            &[
                "rent", "mortgage", "property", "housing", "apartment", "maintenance", "repair",
            ],
        ),
        CategoryRule::new(
            Category::Income,
            &["salary", "income", "wage", "bonus", "payment received", "deposit"],
        ),
    ]
});

/// The ordered rule table.
pub fn rules() -> &'static [CategoryRule] {
    &RULES
}

/// Index and category of the first rule matching `description`, if any.
pub fn classify_with_rule(description: &str) -> Option<(usize, Category)> {
    let desc = description.to_lowercase();
    RULES
        .iter()
        .enumerate()
        .find(|(_, rule)| rule.matches(&desc))
        .map(|(i, rule)| (i, rule.category.clone()))
}

/// Classify a description. Total: unmatched text is `Other`.
pub fn classify(description: &str) -> Category {
    classify_with_rule(description)
        .map(|(_, category)| category)
        .unwrap_or(Category::Other)
}

/// Category for `description` plus the rule that produced it. The rule is
/// `None` when nothing matched and the result is `Other`.
pub fn explain(description: &str) -> (Category, Option<&'static CategoryRule>) {
    match classify_with_rule(description) {
        Some((i, category)) => (category, rules().get(i)),
        None => (Category::Other, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_food() {
        assert_eq!(classify("Lunch with team"), Category::FoodDining);
        assert_eq!(classify("STARBUCKS COFFEE"), Category::FoodDining);
    }

    #[test]
    fn test_gas_resolves_to_earlier_rule() {
        assert_eq!(classify("Gas station fill-up"), Category::Transportation);
        assert_eq!(classify_with_rule("gas bill"), Some((1, Category::Transportation)));
    }

    #[test]
    fn test_classify_each_category() {
        assert_eq!(classify("Electric company"), Category::BillsUtilities);
        assert_eq!(classify("Amazon order"), Category::Shopping);
        assert_eq!(classify("Concert tickets"), Category::Entertainment);
        assert_eq!(classify("Pharmacy refill"), Category::Healthcare);
        assert_eq!(classify("Online course"), Category::Education);
        assert_eq!(classify("Monthly rent"), Category::Housing);
        assert_eq!(classify("Salary March"), Category::Income);
        assert_eq!(classify("Payment received from client"), Category::Income);
    }

    #[test]
    fn test_matches_inside_words() {
        // Substring matching, same as the keyword table intends
        assert_eq!(classify("Business lunch"), Category::FoodDining);
        assert_eq!(classify("Business trip"), Category::Transportation);
    }

    #[test]
    fn test_unmatched_and_empty_fall_back_to_other() {
        assert_eq!(classify(""), Category::Other);
        assert_eq!(classify("zzz"), Category::Other);
        assert_eq!(classify_with_rule("zzz"), None);
    }

    #[test]
    fn test_explain_names_matching_rule() {
        let (category, rule) = explain("Gas station fill-up");
        assert_eq!(category, Category::Transportation);
        let rule = rule.unwrap();
        assert_eq!(rule.category, Category::Transportation);
        assert!(rule.keywords.contains(&"gas"));

        let (category, rule) = explain("zzz");
        assert_eq!(category, Category::Other);
        assert!(rule.is_none());
    }

    #[test]
    fn test_deterministic() {
        for d in ["Uber ride", "netflix", "", "Random"] {
            assert_eq!(classify(d), classify(d));
        }
    }

    #[test]
    fn test_rule_table_never_yields_custom() {
        assert_eq!(rules().len(), 9);
        assert!(rules().iter().all(|r| !r.category.is_custom()));
        assert!(rules().iter().all(|r| !r.keywords.is_empty()));
    }
}
