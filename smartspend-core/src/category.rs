//! Fixed category table shared by the classifier, the aggregator and the
//! presentation layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display metadata used when a label is outside the fixed table.
pub const DEFAULT_ICON: &str = "📦";
pub const DEFAULT_COLOR: &str = "#95A5A6";

/// Transaction category.
///
/// The fixed set is closed; `Custom` carries user-entered labels so they keep
/// working everywhere, rendered with the `Other` metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    FoodDining,
    Transportation,
    BillsUtilities,
    Shopping,
    Entertainment,
    Healthcare,
    Education,
    Housing,
    Income,
    #[default]
    Other,
    Custom(String),
}

impl Category {
    /// The fixed set, in table order.
    pub const ALL: [Category; 10] = [
        Category::FoodDining,
        Category::Transportation,
        Category::BillsUtilities,
        Category::Shopping,
        Category::Entertainment,
        Category::Healthcare,
        Category::Education,
        Category::Housing,
        Category::Income,
        Category::Other,
    ];

    pub fn label(&self) -> &str {
        match self {
            Category::FoodDining => "Food & Dining",
            Category::Transportation => "Transportation",
            Category::BillsUtilities => "Bills & Utilities",
            Category::Shopping => "Shopping",
            Category::Entertainment => "Entertainment",
            Category::Healthcare => "Healthcare",
            Category::Education => "Education",
            Category::Housing => "Housing",
            Category::Income => "Income",
            Category::Other => "Other",
            Category::Custom(label) => label,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::FoodDining => "🍔",
            Category::Transportation => "🚗",
            Category::BillsUtilities => "⚡",
            Category::Shopping => "🛍️",
            Category::Entertainment => "🎮",
            Category::Healthcare => "💊",
            Category::Education => "📚",
            Category::Housing => "🏠",
            Category::Income => "💰",
            Category::Other | Category::Custom(_) => DEFAULT_ICON,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Category::FoodDining => "#FF6B6B",
            Category::Transportation => "#4ECDC4",
            Category::BillsUtilities => "#FFE66D",
            Category::Shopping => "#A8E6CF",
            Category::Entertainment => "#C7CEEA",
            Category::Healthcare => "#FFB4A2",
            Category::Education => "#B4A7D6",
            Category::Housing => "#95E1D3",
            Category::Income => "#38B000",
            Category::Other | Category::Custom(_) => DEFAULT_COLOR,
        }
    }

    /// Map a stored label back to a category.
    ///
    /// Exact fixed-table labels map to their variant, an empty label maps to
    /// `Other`, anything else is kept as `Custom`.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.is_empty() {
            return Category::Other;
        }
        Category::ALL
            .iter()
            .find(|c| c.label() == label)
            .cloned()
            .unwrap_or_else(|| Category::Custom(label.to_string()))
    }

    /// True for labels outside the fixed table.
    pub fn is_custom(&self) -> bool {
        matches!(self, Category::Custom(_))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Category::from_label(&label)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Custom(label) => label,
            other => other.label().to_string(),
        }
    }
}
