//! Expense service
//!
//! The mutation API of the expense store. Every successful mutation is
//! written to disk before returning and recorded in the audit log.

use chrono::NaiveDate;

use crate::audit::{AuditEntry, EntityType};
use crate::config::settings::WeekStart;
use crate::error::XpenseResult;
use crate::models::{DateFilter, Expense, ExpenseId, NewExpense};
use crate::storage::Storage;

use super::view::view;
use super::wallet::WalletService;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Store a batch of new expenses in front of the collection
    ///
    /// Items keep their input order. Items with a non-positive amount are
    /// dropped; a missing or unknown wallet becomes the default wallet.
    /// Returns the stored records. An empty batch writes nothing.
    pub fn insert_many(&self, items: Vec<NewExpense>) -> XpenseResult<Vec<Expense>> {
        let wallets = WalletService::new(self.storage);

        let mut created = Vec::with_capacity(items.len());
        for item in items.into_iter().filter(|i| i.amount.is_positive()) {
            let wallet_id = wallets.resolve_id(item.wallet_id)?;
            created.push(Expense::from_new(item, wallet_id));
        }

        if created.is_empty() {
            return Ok(created);
        }

        self.storage.expenses.prepend(created.clone())?;

        let entries: Vec<_> = created
            .iter()
            .map(|e| {
                AuditEntry::create(
                    EntityType::Expense,
                    e.id.to_string(),
                    Some(e.description.clone()),
                    e,
                )
            })
            .collect();
        self.storage.log_batch(&entries);

        Ok(created)
    }

    /// Store a single new expense
    ///
    /// `None` when the amount was not positive and nothing was stored.
    pub fn insert(&self, item: NewExpense) -> XpenseResult<Option<Expense>> {
        Ok(self.insert_many(vec![item])?.into_iter().next())
    }

    /// Replace the stored expense with the same ID
    ///
    /// Returns `false` (and writes nothing) when no such expense exists.
    pub fn update(&self, expense: Expense) -> XpenseResult<bool> {
        let after = expense.clone();
        let Some(before) = self.storage.expenses.replace(expense)? else {
            return Ok(false);
        };

        self.storage.log_update(
            EntityType::Expense,
            after.id.to_string(),
            Some(after.description.clone()),
            &before,
            &after,
            None,
        );

        Ok(true)
    }

    /// Delete an expense
    ///
    /// Returns `false` (and writes nothing) when no such expense exists.
    pub fn remove(&self, id: ExpenseId) -> XpenseResult<bool> {
        let Some(removed) = self.storage.expenses.delete(id)? else {
            return Ok(false);
        };

        self.storage.log_delete(
            EntityType::Expense,
            removed.id.to_string(),
            Some(removed.description.clone()),
            &removed,
        );

        Ok(true)
    }

    pub fn get(&self, id: ExpenseId) -> XpenseResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Find an expense by full ID or short display prefix
    pub fn find(&self, identifier: &str) -> XpenseResult<Option<Expense>> {
        let identifier = identifier.trim();
        if let Ok(id) = identifier.parse::<ExpenseId>() {
            return self.storage.expenses.get(id);
        }

        Ok(self
            .storage
            .expenses
            .get_all()?
            .into_iter()
            .find(|e| e.id.matches_prefix(identifier)))
    }

    /// The canonical collection, newest insertions first
    pub fn list(&self) -> XpenseResult<Vec<Expense>> {
        self.storage.expenses.get_all()
    }

    /// The collection seen through a date filter
    pub fn list_view(
        &self,
        filter: &DateFilter,
        week_start: WeekStart,
        today: NaiveDate,
    ) -> XpenseResult<Vec<Expense>> {
        let expenses = self.storage.expenses.get_all()?;
        Ok(view(&expenses, filter, week_start, today))
    }
}
