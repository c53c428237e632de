//! Period aggregator: windows a transaction collection and reduces it into
//! income, expense and per-category totals.

use chrono::NaiveDate;
use smartspend_core::{Category, CategoryBreakdown, Period, Report, Transaction, TransactionKind};
use std::collections::HashMap;

/// Aggregate the transactions dated inside `period` (both ends included).
pub fn aggregate(transactions: &[Transaction], period: &Period) -> Report {
    let in_window: Vec<Transaction> = transactions
        .iter()
        .filter(|t| period.contains(t.date))
        .cloned()
        .collect();

    let mut total_income = 0.0;
    let mut total_expenses = 0.0;
    let mut by_category: HashMap<Category, f64> = HashMap::new();

    for txn in &in_window {
        match txn.kind {
            TransactionKind::Income => total_income += txn.amount,
            TransactionKind::Expense => {
                total_expenses += txn.amount;
                *by_category.entry(txn.category.clone()).or_insert(0.0) += txn.amount;
            }
        }
    }

    let mut categories: Vec<CategoryBreakdown> = by_category
        .into_iter()
        .filter(|(_, amount)| *amount > 0.0)
        .map(|(category, amount)| {
            let percentage = if total_expenses > 0.0 {
                amount / total_expenses * 100.0
            } else {
                0.0
            };
            CategoryBreakdown {
                color: category.color().to_string(),
                category,
                amount,
                percentage,
            }
        })
        .collect();

    // Amount descending, label ascending on ties
    categories.sort_by(|a, b| {
        b.amount
            .total_cmp(&a.amount)
            .then_with(|| a.category.label().cmp(b.category.label()))
    });

    tracing::debug!(
        period = %period,
        transactions = in_window.len(),
        income = total_income,
        expenses = total_expenses,
        categories = categories.len(),
        "aggregated period"
    );

    Report {
        period: *period,
        total_income,
        total_expenses,
        categories,
        transactions: in_window,
    }
}

/// Aggregate over `[start, end]`, rejecting an inverted window.
pub fn aggregate_window(
    transactions: &[Transaction],
    start: NaiveDate,
    end: NaiveDate,
) -> smartspend_core::Result<Report> {
    let period = Period::new(start, end)?;
    Ok(aggregate(transactions, &period))
}

/// Report for the calendar month containing `anchor`.
pub fn monthly_report(transactions: &[Transaction], anchor: NaiveDate) -> Report {
    aggregate(transactions, &Period::month_of(anchor))
}

/// Report for the Sunday-to-Saturday week containing `anchor`.
pub fn weekly_report(transactions: &[Transaction], anchor: NaiveDate) -> Report {
    aggregate(transactions, &Period::week_of(anchor))
}
