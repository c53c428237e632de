//! Savings goal types and progress math

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::finance::validate_amount;

/// Goal priority. Display only; never changes generated advice.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GoalPriority {
    #[serde(rename = "low")]
    Low,
    #[default]
    #[serde(rename = "medium")]
    Medium,
    #[serde(rename = "high")]
    High,
}

impl GoalPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalPriority::Low => "low",
            GoalPriority::Medium => "medium",
            GoalPriority::High => "high",
        }
    }
}

impl std::str::FromStr for GoalPriority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(GoalPriority::Low),
            "medium" => Ok(GoalPriority::Medium),
            "high" => Ok(GoalPriority::High),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

/// A savings target with a deadline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavingsGoal {
    pub id: String,
    pub name: String,
    /// Positive target
    pub target_amount: f64,
    /// Saved so far; may exceed the target
    pub current_amount: f64,
    pub deadline: NaiveDate,
    pub priority: GoalPriority,
}

impl SavingsGoal {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        target_amount: f64,
        deadline: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            target_amount,
            current_amount: 0.0,
            deadline,
            priority: GoalPriority::default(),
        }
    }

    pub fn with_current(mut self, current_amount: f64) -> Self {
        self.current_amount = current_amount;
        self
    }

    pub fn with_priority(mut self, priority: GoalPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Unclamped `current / target`; 0 when the target is not positive.
    pub fn progress_ratio(&self) -> f64 {
        if self.target_amount > 0.0 {
            self.current_amount / self.target_amount
        } else {
            0.0
        }
    }

    /// Unclamped percentage, used for completion checks.
    pub fn progress_percent(&self) -> f64 {
        self.progress_ratio() * 100.0
    }

    /// Percentage clamped to 0-100 for progress bars.
    pub fn display_percent(&self) -> f64 {
        self.progress_percent().clamp(0.0, 100.0)
    }

    /// Amount still needed. Negative once the goal is overfunded.
    pub fn remaining(&self) -> f64 {
        self.target_amount - self.current_amount
    }

    pub fn is_completed(&self) -> bool {
        self.progress_percent() >= 100.0
    }

    /// Whole days from `today` to the deadline; zero or negative once due.
    pub fn days_left(&self, today: NaiveDate) -> i64 {
        (self.deadline - today).num_days()
    }

    /// Add a contribution. Only `current_amount` changes.
    pub fn add_funds(&mut self, amount: f64) -> Result<()> {
        validate_amount(amount)?;
        self.current_amount += amount;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(CoreError::EmptyId);
        }
        if !self.target_amount.is_finite() || self.target_amount <= 0.0 {
            return Err(CoreError::InvalidGoal(format!(
                "target amount must be positive, got {}",
                self.target_amount
            )));
        }
        if !self.current_amount.is_finite() || self.current_amount < 0.0 {
            return Err(CoreError::InvalidGoal(format!(
                "current amount must not be negative, got {}",
                self.current_amount
            )));
        }
        Ok(())
    }
}
