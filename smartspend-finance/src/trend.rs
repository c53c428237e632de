//! Monthly trend series built from the period aggregator.

use chrono::NaiveDate;
use smartspend_core::{Period, Transaction, TrendPoint, month_label, months_before};

use crate::report::aggregate;

/// Longest series produced: one hundred years of months.
pub const MAX_TREND_MONTHS: u32 = 1200;

/// One point per calendar month for the `months_back` months ending with the
/// month containing `anchor`, oldest first. Requests longer than
/// `MAX_TREND_MONTHS` are capped.
pub fn build_trend(transactions: &[Transaction], months_back: u32, anchor: NaiveDate) -> Vec<TrendPoint> {
    let months = months_back.min(MAX_TREND_MONTHS);
    if months < months_back {
        tracing::warn!(requested = months_back, months, "trend length capped");
    }

    (0..months)
        .rev()
        .filter_map(|i| months_before(anchor, i))
        .map(|month| {
            let report = aggregate(transactions, &Period::month_of(month));
            TrendPoint {
                month,
                label: month_label(month),
                income: report.total_income,
                expenses: report.total_expenses,
                savings: report.net_savings(),
            }
        })
        .collect()
}
