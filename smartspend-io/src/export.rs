//! Report sinks: CSV transaction sheets and plain-text report documents.

use smartspend_core::fmt::money;
use smartspend_core::{Report, Transaction};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::types::Result;

/// Most transactions listed in a text report.
pub const TEXT_REPORT_MAX_ROWS: usize = 30;

pub const CSV_HEADER: [&str; 5] = ["Date", "Type", "Category", "Description", "Amount"];

/// Destination for a rendered report.
pub trait ReportSink {
    fn write_report(&mut self, report: &Report, transactions: &[Transaction]) -> Result<()>;
}

/// One CSV row per transaction, in the order given.
pub struct CsvTransactionExport<W: Write> {
    writer: csv::Writer<W>,
}

impl CsvTransactionExport<File> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            writer: csv::Writer::from_path(path)?,
        })
    }
}

impl<W: Write> CsvTransactionExport<W> {
    pub fn new(out: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(out),
        }
    }

    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| std::io::Error::other(e.to_string()).into())
    }
}

impl<W: Write> ReportSink for CsvTransactionExport<W> {
    fn write_report(&mut self, report: &Report, transactions: &[Transaction]) -> Result<()> {
        self.writer.write_record(CSV_HEADER)?;
        for t in transactions {
            self.writer.write_record([
                t.date.format("%Y-%m-%d").to_string(),
                t.kind.as_str().to_string(),
                t.category.label().to_string(),
                t.description.clone(),
                format!("{:.2}", t.amount),
            ])?;
        }
        self.writer.flush()?;
        tracing::info!(rows = transactions.len(), period = %report.period, "exported transactions csv");
        Ok(())
    }
}

/// Plain-text financial report.
pub struct TextReportExport<W: Write> {
    out: W,
    title: String,
}

impl TextReportExport<File> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write> TextReportExport<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            title: "SmartSpend Financial Report".to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for TextReportExport<W> {
    fn write_report(&mut self, report: &Report, transactions: &[Transaction]) -> Result<()> {
        let out = &mut self.out;
        writeln!(out, "{}", self.title)?;
        writeln!(out, "Period: {}", report.period)?;
        writeln!(out)?;

        writeln!(out, "Summary")?;
        writeln!(out, "  Total Income:   {}", money(report.total_income))?;
        writeln!(out, "  Total Expenses: {}", money(report.total_expenses))?;
        writeln!(out, "  Net Savings:    {}", money(report.net_savings()))?;
        writeln!(out, "  Savings Rate:   {:.1}%", report.savings_rate())?;

        if !report.categories.is_empty() {
            writeln!(out)?;
            writeln!(out, "Category Breakdown")?;
            for c in &report.categories {
                writeln!(
                    out,
                    "  {:<22} {:>12} {:>6.1}%",
                    c.category.label(),
                    money(c.amount),
                    c.percentage
                )?;
            }
        }

        if !transactions.is_empty() {
            writeln!(out)?;
            writeln!(out, "Transactions")?;
            for t in transactions.iter().take(TEXT_REPORT_MAX_ROWS) {
                writeln!(
                    out,
                    "  {}  {:<7}  {:<22} {:<30} {:>12}",
                    t.date.format("%Y-%m-%d"),
                    t.kind.as_str(),
                    t.category.label(),
                    t.description,
                    money(t.amount)
                )?;
            }
            if transactions.len() > TEXT_REPORT_MAX_ROWS {
                writeln!(
                    out,
                    "  ... {} more",
                    transactions.len() - TEXT_REPORT_MAX_ROWS
                )?;
            }
        }
        out.flush()?;
        tracing::info!(period = %report.period, "exported text report");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use smartspend_core::{Category, CategoryBreakdown, Period};

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn sample() -> (Report, Vec<Transaction>) {
        let txns = vec![
            Transaction::income("i", 2000.0, "Salary", d(1)),
            Transaction::expense("e", 500.0, "Rent, March", d(2)).with_category(Category::Housing),
        ];
        let report = Report {
            period: Period::month_of(d(1)),
            total_income: 2000.0,
            total_expenses: 500.0,
            categories: vec![CategoryBreakdown {
                category: Category::Housing,
                amount: 500.0,
                percentage: 100.0,
                color: Category::Housing.color().to_string(),
            }],
            transactions: txns.clone(),
        };
        (report, txns)
    }

    #[test]
    fn test_csv_header_and_rows() {
        let (report, txns) = sample();
        let mut sink = CsvTransactionExport::new(Vec::new());
        sink.write_report(&report, &txns).unwrap();
        let text = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Date,Type,Category,Description,Amount");
        assert_eq!(lines[1], "2024-03-01,income,Income,Salary,2000.00");
        assert_eq!(lines[2], "2024-03-02,expense,Housing,\"Rent, March\",500.00");
    }

    #[test]
    fn test_csv_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let (report, txns) = sample();
        CsvTransactionExport::create(&path)
            .unwrap()
            .write_report(&report, &txns)
            .unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_text_report_sections() {
        let (report, txns) = sample();
        let mut sink = TextReportExport::new(Vec::new());
        sink.write_report(&report, &txns).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert!(text.starts_with("SmartSpend Financial Report\n"));
        assert!(text.contains("Period: 2024-03-01 to 2024-03-31"));
        assert!(text.contains("Net Savings:    $1500.00"));
        assert!(text.contains("Savings Rate:   75.0%"));
        assert!(text.contains("100.0%"));
        assert!(text.contains("Rent, March"));
    }

    #[test]
    fn test_text_report_caps_rows() {
        let (report, _) = sample();
        let many: Vec<Transaction> = (0..35)
            .map(|i| Transaction::expense(format!("t{i}"), 1.0, format!("item {i}"), d(3)))
            .collect();
        let mut sink = TextReportExport::new(Vec::new());
        sink.write_report(&report, &many).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert!(text.contains("item 29"));
        assert!(!text.contains("item 30"));
        assert!(text.contains("... 5 more"));
    }
}
