//! Store abstractions and partial-update records shared by every backend.

use chrono::NaiveDate;
use smartspend_core::{Category, CoreError, GoalPriority, SavingsGoal, Transaction, TransactionKind};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid record: {0}")]
    Invalid(#[from] CoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Partial transaction update: only `Some` fields change.
#[derive(Debug, Clone, Default)]
pub struct TransactionUpdate {
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub date: Option<NaiveDate>,
    pub kind: Option<TransactionKind>,
}

impl TransactionUpdate {
    /// Merge into `txn` and re-check the record invariants.
    pub fn apply_to(&self, txn: &Transaction) -> Result<Transaction> {
        let mut out = txn.clone();
        if let Some(amount) = self.amount {
            out.amount = amount;
        }
        if let Some(description) = &self.description {
            out.description = description.clone();
        }
        if let Some(category) = &self.category {
            out.category = category.clone();
        }
        if let Some(date) = self.date {
            out.date = date;
        }
        if let Some(kind) = self.kind {
            out.kind = kind;
        }
        out.validate()?;
        Ok(out)
    }
}

/// Partial goal update: only `Some` fields change.
#[derive(Debug, Clone, Default)]
pub struct GoalUpdate {
    pub name: Option<String>,
    pub target_amount: Option<f64>,
    pub current_amount: Option<f64>,
    pub deadline: Option<NaiveDate>,
    pub priority: Option<GoalPriority>,
}

impl GoalUpdate {
    pub fn apply_to(&self, goal: &SavingsGoal) -> Result<SavingsGoal> {
        let mut out = goal.clone();
        if let Some(name) = &self.name {
            out.name = name.clone();
        }
        if let Some(target) = self.target_amount {
            out.target_amount = target;
        }
        if let Some(current) = self.current_amount {
            out.current_amount = current;
        }
        if let Some(deadline) = self.deadline {
            out.deadline = deadline;
        }
        if let Some(priority) = self.priority {
            out.priority = priority;
        }
        out.validate()?;
        Ok(out)
    }
}

/// Transaction persistence. `list` returns a full snapshot in insertion order.
pub trait TransactionStore {
    fn list_transactions(&self) -> Result<Vec<Transaction>>;

    fn get_transaction(&self, id: &str) -> Result<Option<Transaction>> {
        Ok(self.list_transactions()?.into_iter().find(|t| t.id == id))
    }

    /// Rejects invalid records and ids already present.
    fn add_transaction(&mut self, txn: Transaction) -> Result<()>;

    /// Returns false when no transaction has `id`.
    fn update_transaction(&mut self, id: &str, update: &TransactionUpdate) -> Result<bool>;

    /// Returns whether a transaction was removed.
    fn delete_transaction(&mut self, id: &str) -> Result<bool>;
}

/// Savings goal persistence. `list` returns a full snapshot in insertion order.
pub trait GoalStore {
    fn list_goals(&self) -> Result<Vec<SavingsGoal>>;

    fn get_goal(&self, id: &str) -> Result<Option<SavingsGoal>> {
        Ok(self.list_goals()?.into_iter().find(|g| g.id == id))
    }

    fn add_goal(&mut self, goal: SavingsGoal) -> Result<()>;

    fn update_goal(&mut self, id: &str, update: &GoalUpdate) -> Result<bool>;

    fn delete_goal(&mut self, id: &str) -> Result<bool>;

    /// Add a contribution, changing only `current_amount`.
    fn add_funds(&mut self, id: &str, amount: f64) -> Result<SavingsGoal> {
        let mut goal = self
            .get_goal(id)?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        goal.add_funds(amount)?;
        let update = GoalUpdate {
            current_amount: Some(goal.current_amount),
            ..Default::default()
        };
        self.update_goal(id, &update)?;
        Ok(goal)
    }
}

/// Shared list operations over an in-memory Vec, used by both backends.
pub(crate) mod vec_ops {
    use super::*;

    pub fn add_transaction(items: &mut Vec<Transaction>, txn: Transaction) -> Result<()> {
        txn.validate()?;
        if items.iter().any(|t| t.id == txn.id) {
            return Err(StoreError::DuplicateId(txn.id));
        }
        items.push(txn);
        Ok(())
    }

    pub fn update_transaction(
        items: &mut [Transaction],
        id: &str,
        update: &TransactionUpdate,
    ) -> Result<bool> {
        match items.iter_mut().find(|t| t.id == id) {
            Some(slot) => {
                *slot = update.apply_to(slot)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn add_goal(items: &mut Vec<SavingsGoal>, goal: SavingsGoal) -> Result<()> {
        goal.validate()?;
        if items.iter().any(|g| g.id == goal.id) {
            return Err(StoreError::DuplicateId(goal.id));
        }
        items.push(goal);
        Ok(())
    }

    pub fn update_goal(items: &mut [SavingsGoal], id: &str, update: &GoalUpdate) -> Result<bool> {
        match items.iter_mut().find(|g| g.id == id) {
            Some(slot) => {
                *slot = update.apply_to(slot)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Remove every record matching `id`; true if any was removed.
    pub fn remove_by<T>(items: &mut Vec<T>, id: &str, key: impl Fn(&T) -> &str) -> bool {
        let before = items.len();
        items.retain(|item| key(item) != id);
        items.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_transaction_update_merges_named_fields() {
        let txn = Transaction::expense("t", 10.0, "Coffee", day()).with_category(Category::FoodDining);
        let update = TransactionUpdate {
            amount: Some(12.5),
            ..Default::default()
        };
        let merged = update.apply_to(&txn).unwrap();
        assert_eq!(merged.amount, 12.5);
        assert_eq!(merged.description, "Coffee");
        assert_eq!(merged.category, Category::FoodDining);
    }

    #[test]
    fn test_update_rejects_invalid_result() {
        let txn = Transaction::expense("t", 10.0, "Coffee", day());
        let update = TransactionUpdate {
            amount: Some(-1.0),
            ..Default::default()
        };
        assert!(matches!(update.apply_to(&txn), Err(StoreError::Invalid(_))));
    }

    #[test]
    fn test_goal_update_merges_named_fields() {
        let goal = SavingsGoal::new("g", "Bike", 300.0, day()).with_priority(GoalPriority::High);
        let update = GoalUpdate {
            name: Some("E-bike".into()),
            ..Default::default()
        };
        let merged = update.apply_to(&goal).unwrap();
        assert_eq!(merged.name, "E-bike");
        assert_eq!(merged.target_amount, 300.0);
        assert_eq!(merged.priority, GoalPriority::High);
    }
}
