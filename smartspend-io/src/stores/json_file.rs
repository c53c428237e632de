//! Directory-backed store: one JSON array file per entity kind.
//!
//! Every call reads the current file, so the store never holds state between
//! calls. A missing file reads as an empty collection; writes replace the whole
//! file through a temp file and rename.

use serde::Serialize;
use serde::de::DeserializeOwned;
use smartspend_core::{SavingsGoal, Transaction};
use std::fs;
use std::path::{Path, PathBuf};

use crate::types::{GoalStore, GoalUpdate, Result, TransactionStore, TransactionUpdate, vec_ops};

pub const TRANSACTIONS_FILE: &str = "smartspend_expenses.json";
pub const GOALS_FILE: &str = "smartspend_goals.json";

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn transactions_path(&self) -> PathBuf {
        self.dir.join(TRANSACTIONS_FILE)
    }

    pub fn goals_path(&self) -> PathBuf {
        self.dir.join(GOALS_FILE)
    }

    fn read_all<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let s = fs::read_to_string(path)?;
        if s.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&s)?)
    }

    fn write_all<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
        let json = serde_json::to_string_pretty(items)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        tracing::debug!(path = %path.display(), records = items.len(), "wrote store file");
        Ok(())
    }

    fn modify<T, R>(
        path: &Path,
        f: impl FnOnce(&mut Vec<T>) -> Result<R>,
    ) -> Result<R>
    where
        T: Serialize + DeserializeOwned,
    {
        let mut items: Vec<T> = Self::read_all(path)?;
        let out = f(&mut items)?;
        Self::write_all(path, &items)?;
        Ok(out)
    }
}

impl TransactionStore for JsonFileStore {
    fn list_transactions(&self) -> Result<Vec<Transaction>> {
        Self::read_all(&self.transactions_path())
    }

    fn add_transaction(&mut self, txn: Transaction) -> Result<()> {
        let id = txn.id.clone();
        Self::modify(&self.transactions_path(), |items| {
            vec_ops::add_transaction(items, txn)
        })?;
        tracing::info!(id = %id, "added transaction");
        Ok(())
    }

    fn update_transaction(&mut self, id: &str, update: &TransactionUpdate) -> Result<bool> {
        let path = self.transactions_path();
        let mut items: Vec<Transaction> = Self::read_all(&path)?;
        if !vec_ops::update_transaction(&mut items, id, update)? {
            return Ok(false);
        }
        Self::write_all(&path, &items)?;
        tracing::info!(id = %id, "updated transaction");
        Ok(true)
    }

    fn delete_transaction(&mut self, id: &str) -> Result<bool> {
        let removed = Self::modify(&self.transactions_path(), |items: &mut Vec<Transaction>| {
            Ok(vec_ops::remove_by(items, id, |t| t.id.as_str()))
        })?;
        if removed {
            tracing::info!(id = %id, "deleted transaction");
        }
        Ok(removed)
    }
}

impl GoalStore for JsonFileStore {
    fn list_goals(&self) -> Result<Vec<SavingsGoal>> {
        Self::read_all(&self.goals_path())
    }

    fn add_goal(&mut self, goal: SavingsGoal) -> Result<()> {
        let id = goal.id.clone();
        Self::modify(&self.goals_path(), |items| vec_ops::add_goal(items, goal))?;
        tracing::info!(id = %id, "added goal");
        Ok(())
    }

    fn update_goal(&mut self, id: &str, update: &GoalUpdate) -> Result<bool> {
        let path = self.goals_path();
        let mut items: Vec<SavingsGoal> = Self::read_all(&path)?;
        if !vec_ops::update_goal(&mut items, id, update)? {
            return Ok(false);
        }
        Self::write_all(&path, &items)?;
        tracing::info!(id = %id, "updated goal");
        Ok(true)
    }

    fn delete_goal(&mut self, id: &str) -> Result<bool> {
        let removed = Self::modify(&self.goals_path(), |items: &mut Vec<SavingsGoal>| {
            Ok(vec_ops::remove_by(items, id, |g| g.id.as_str()))
        })?;
        if removed {
            tracing::info!(id = %id, "deleted goal");
        }
        Ok(removed)
    }
}
