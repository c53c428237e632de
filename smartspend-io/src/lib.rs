//! smartspend-io: persistence for transactions and goals, plus report export sinks.

pub mod export;
pub mod stores;
pub mod types;

pub use export::{CsvTransactionExport, ReportSink, TextReportExport};
pub use stores::{JsonFileStore, MemoryStore};
pub use types::{GoalStore, GoalUpdate, Result, StoreError, TransactionStore, TransactionUpdate};
