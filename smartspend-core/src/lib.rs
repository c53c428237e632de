//! smartspend-core: Core types and utilities for the SmartSpend tracker

pub mod category;
pub mod error;
pub mod finance;
pub mod fmt;
pub mod goals;
pub mod ids;
pub mod report;
pub mod time;

pub use category::Category;
pub use error::{CoreError, Result};
pub use finance::{Transaction, TransactionKind};
pub use goals::{GoalPriority, SavingsGoal};
pub use ids::{IdGenerator, RandomIds, SequenceIds};
pub use report::{AdviceItem, AdviceKind, CategoryBreakdown, Report, TrendPoint};
pub use time::{Period, first_of_month, last_of_month, month_label, months_before, today_in};
