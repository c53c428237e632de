//! Search and filter over a transaction listing.

use serde::Serialize;
use smartspend_core::{Category, Transaction, TransactionKind};

/// Listing filter. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Case-insensitive substring of the description
    pub search: Option<String>,
    pub kind: Option<TransactionKind>,
    pub category: Option<Category>,
}

impl TransactionFilter {
    pub fn matches(&self, txn: &Transaction) -> bool {
        let search_ok = match &self.search {
            Some(term) => txn
                .description
                .to_lowercase()
                .contains(&term.to_lowercase()),
            None => true,
        };
        let kind_ok = self.kind.is_none_or(|k| k == txn.kind);
        let category_ok = self.category.as_ref().is_none_or(|c| c == &txn.category);
        search_ok && kind_ok && category_ok
    }

    /// Matching transactions, input order preserved.
    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        transactions.iter().filter(|t| self.matches(t)).collect()
    }
}

/// Count and sums for a filtered listing
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct FilterTotals {
    pub count: usize,
    pub expenses: f64,
    pub income: f64,
}

impl FilterTotals {
    pub fn of(transactions: &[&Transaction]) -> Self {
        transactions.iter().fold(Self::default(), |mut acc, t| {
            acc.count += 1;
            match t.kind {
                TransactionKind::Expense => acc.expenses += t.amount,
                TransactionKind::Income => acc.income += t.amount,
            }
            acc
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txns() -> Vec<Transaction> {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        vec![
            Transaction::expense("1", 12.0, "Coffee at cafe", day).with_category(Category::FoodDining),
            Transaction::expense("2", 40.0, "Uber to airport", day)
                .with_category(Category::Transportation),
            Transaction::income("3", 900.0, "Freelance coffee shop site", day),
        ]
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let all = txns();
        let f = TransactionFilter {
            search: Some("COFFEE".into()),
            ..Default::default()
        };
        let ids: Vec<&str> = f.apply(&all).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_kind_and_category_filters_combine() {
        let all = txns();
        let f = TransactionFilter {
            search: Some("coffee".into()),
            kind: Some(TransactionKind::Expense),
            category: Some(Category::FoodDining),
        };
        assert_eq!(f.apply(&all).len(), 1);

        let none = TransactionFilter {
            category: Some(Category::Housing),
            ..Default::default()
        };
        assert!(none.apply(&all).is_empty());
    }

    #[test]
    fn test_totals() {
        let all = txns();
        let hits = TransactionFilter::default().apply(&all);
        let totals = FilterTotals::of(&hits);
        assert_eq!(totals.count, 3);
        assert_eq!(totals.expenses, 52.0);
        assert_eq!(totals.income, 900.0);
    }
}
