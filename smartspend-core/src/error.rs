//! Error types for smartspend-core

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid window: start {start} is after end {end}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },

    #[error("Invalid amount: {0} (must be a positive number)")]
    InvalidAmount(f64),

    #[error("Invalid goal: {0}")]
    InvalidGoal(String),

    #[error("Empty id")]
    EmptyId,

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
