//! Vec-backed store, for tests and embedding.

use smartspend_core::{SavingsGoal, Transaction};

use crate::types::{GoalStore, GoalUpdate, Result, TransactionStore, TransactionUpdate, vec_ops};

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    transactions: Vec<Transaction>,
    goals: Vec<SavingsGoal>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransactionStore for MemoryStore {
    fn list_transactions(&self) -> Result<Vec<Transaction>> {
        Ok(self.transactions.clone())
    }

    fn add_transaction(&mut self, txn: Transaction) -> Result<()> {
        vec_ops::add_transaction(&mut self.transactions, txn)
    }

    fn update_transaction(&mut self, id: &str, update: &TransactionUpdate) -> Result<bool> {
        vec_ops::update_transaction(&mut self.transactions, id, update)
    }

    fn delete_transaction(&mut self, id: &str) -> Result<bool> {
        Ok(vec_ops::remove_by(&mut self.transactions, id, |t| t.id.as_str()))
    }
}

impl GoalStore for MemoryStore {
    fn list_goals(&self) -> Result<Vec<SavingsGoal>> {
        Ok(self.goals.clone())
    }

    fn add_goal(&mut self, goal: SavingsGoal) -> Result<()> {
        vec_ops::add_goal(&mut self.goals, goal)
    }

    fn update_goal(&mut self, id: &str, update: &GoalUpdate) -> Result<bool> {
        vec_ops::update_goal(&mut self.goals, id, update)
    }

    fn delete_goal(&mut self, id: &str) -> Result<bool> {
        Ok(vec_ops::remove_by(&mut self.goals, id, |g| g.id.as_str()))
    }
}
