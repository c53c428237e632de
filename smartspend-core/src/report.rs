//! Derived report, trend and advice types. Always recomputed, never stored.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::category::Category;
use crate::finance::Transaction;
use crate::time::Period;

/// Expense total for one category within a period
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryBreakdown {
    pub category: Category,
    pub amount: f64,
    /// Share of the period's total expenses, 0-100
    pub percentage: f64,
    /// Display only
    pub color: String,
}

/// Income/expense summary for a period.
///
/// Serializes with a computed `netSavings` field; reading it back ignores that
/// field and recomputes.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub period: Period,
    pub total_income: f64,
    pub total_expenses: f64,
    /// Sorted by amount descending, then label ascending
    pub categories: Vec<CategoryBreakdown>,
    /// Transactions inside the period, in input order
    pub transactions: Vec<Transaction>,
}

impl Report {
    /// `total_income - total_expenses`, recomputed on every call.
    pub fn net_savings(&self) -> f64 {
        self.total_income - self.total_expenses
    }

    /// Net savings as a percentage of income; 0 without income.
    pub fn savings_rate(&self) -> f64 {
        if self.total_income > 0.0 {
            self.net_savings() / self.total_income * 100.0
        } else {
            0.0
        }
    }

    pub fn category(&self, category: &Category) -> Option<&CategoryBreakdown> {
        self.categories.iter().find(|c| &c.category == category)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportView<'a> {
    period: &'a Period,
    total_income: f64,
    total_expenses: f64,
    net_savings: f64,
    categories: &'a [CategoryBreakdown],
    transactions: &'a [Transaction],
}

impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ReportView {
            period: &self.period,
            total_income: self.total_income,
            total_expenses: self.total_expenses,
            net_savings: self.net_savings(),
            categories: &self.categories,
            transactions: &self.transactions,
        }
        .serialize(serializer)
    }
}

/// One month in a trend series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendPoint {
    /// First day of the month
    pub month: NaiveDate,
    /// Short month name
    pub label: String,
    pub income: f64,
    pub expenses: f64,
    pub savings: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AdviceKind {
    #[serde(rename = "warning")]
    Warning,
    #[serde(rename = "tip")]
    Tip,
    #[serde(rename = "achievement")]
    Achievement,
}

impl AdviceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdviceKind::Warning => "warning",
            AdviceKind::Tip => "tip",
            AdviceKind::Achievement => "achievement",
        }
    }
}

/// A generated advisory message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdviceItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: AdviceKind,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}
