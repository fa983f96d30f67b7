//! Expense repository for JSON storage
//!
//! Holds the canonical, ordered expense collection and persists it to
//! expenses.json. Every mutation writes the complete collection to disk
//! before the in-memory copy is replaced, so readers never observe a state
//! that was not persisted.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::XpenseError;
use crate::models::{Expense, ExpenseId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable expense data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
}

#[derive(Debug, Default)]
struct ExpenseState {
    expenses: Vec<Expense>,
    /// Number of committed writes since this repository was created
    revision: u64,
}

/// Repository for the canonical expense collection
pub struct ExpenseRepository {
    path: PathBuf,
    state: RwLock<ExpenseState>,
}

impl ExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            state: RwLock::new(ExpenseState::default()),
        }
    }

    /// Load expenses from disk
    pub fn load(&self) -> Result<(), XpenseError> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut state = self.state.write().map_err(|e| {
            XpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        state.expenses = file_data.expenses;

        Ok(())
    }

    /// All expenses in canonical (stored) order
    pub fn get_all(&self) -> Result<Vec<Expense>, XpenseError> {
        let state = self.read()?;
        Ok(state.expenses.clone())
    }

    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, XpenseError> {
        let state = self.read()?;
        Ok(state.expenses.iter().find(|e| e.id == id).cloned())
    }

    pub fn count(&self) -> Result<usize, XpenseError> {
        Ok(self.read()?.expenses.len())
    }

    pub fn is_empty(&self) -> Result<bool, XpenseError> {
        Ok(self.read()?.expenses.is_empty())
    }

    /// Number of writes committed to disk by this repository
    pub fn revision(&self) -> Result<u64, XpenseError> {
        Ok(self.read()?.revision)
    }

    /// Put new expenses in front of the collection, preserving their order
    pub fn prepend(&self, items: Vec<Expense>) -> Result<(), XpenseError> {
        if items.is_empty() {
            return Ok(());
        }
        self.mutate(|expenses| {
            let mut updated = items;
            updated.append(expenses);
            *expenses = updated;
            Some(())
        })?;
        Ok(())
    }

    /// Replace the expense with the same ID in place
    ///
    /// Returns the previous version, or `None` (and writes nothing) when no
    /// expense has that ID.
    pub fn replace(&self, expense: Expense) -> Result<Option<Expense>, XpenseError> {
        self.mutate(|expenses| {
            let slot = expenses.iter_mut().find(|e| e.id == expense.id)?;
            Some(std::mem::replace(slot, expense))
        })
    }

    /// Delete an expense, returning it if it existed
    pub fn delete(&self, id: ExpenseId) -> Result<Option<Expense>, XpenseError> {
        self.mutate(|expenses| {
            let index = expenses.iter().position(|e| e.id == id)?;
            Some(expenses.remove(index))
        })
    }

    /// Overwrite the whole collection
    pub fn replace_all(&self, expenses: Vec<Expense>) -> Result<(), XpenseError> {
        self.mutate(|current| {
            *current = expenses;
            Some(())
        })?;
        Ok(())
    }

    /// Apply `change` to a copy of the collection and commit it
    ///
    /// When `change` returns `None` nothing is written. The file is written
    /// before the in-memory collection is swapped; a failed write leaves the
    /// repository untouched.
    fn mutate<R>(
        &self,
        change: impl FnOnce(&mut Vec<Expense>) -> Option<R>,
    ) -> Result<Option<R>, XpenseError> {
        let mut state = self.state.write().map_err(|e| {
            XpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let mut working = state.expenses.clone();
        let Some(result) = change(&mut working) else {
            return Ok(None);
        };

        let file_data = ExpenseData { expenses: working };
        write_json_atomic(&self.path, &file_data)?;

        state.expenses = file_data.expenses;
        state.revision += 1;
        Ok(Some(result))
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, ExpenseState>, XpenseError> {
        self.state
            .read()
            .map_err(|e| XpenseError::Storage(format!("Failed to acquire read lock: {}", e)))
    }
}
