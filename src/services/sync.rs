//! Reconciliation with the remote sheet
//!
//! Remote rows are merged into the local collection with a fuzzy duplicate
//! check (same calendar day, amount within tolerance, same description
//! ignoring case). Local records are never modified or removed by a sync.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

use crate::audit::{AuditEntry, EntityType};
use crate::error::{XpenseError, XpenseResult};
use crate::models::{Expense, ExpenseDate, NewExpense, Wallet, DEFAULT_CATEGORY};
use crate::remote::{RemoteSession, RemoteStore, SheetRow};
use crate::storage::Storage;

use super::capture::Candidate;
use super::view::sort_newest_first;
use super::wallet::{resolve_wallet, WalletService};

/// Description given to synced rows that have none
pub const SYNCED_DESCRIPTION: &str = "Synced";

/// Result of merging a remote snapshot into the local collection
#[derive(Debug, Clone, PartialEq)]
pub struct Merge {
    pub expenses: Vec<Expense>,
    pub added: usize,
}

/// Merge remote candidates into `local`
///
/// A candidate is dropped when any record of `local` (as passed in, not the
/// growing result) is a duplicate of it. Survivors are appended, and when
/// anything was added the result is re-sorted newest first. Candidates
/// without a positive amount or a date are ignored.
pub fn reconcile(local: &[Expense], remote: &[Candidate], wallets: &[Wallet]) -> Merge {
    let mut expenses = local.to_vec();
    let mut added = 0;

    for candidate in remote {
        let Some(date) = candidate.date.as_deref().filter(|d| !d.trim().is_empty()) else {
            continue;
        };
        if !candidate.amount.is_positive() {
            continue;
        }

        let category = candidate
            .category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(DEFAULT_CATEGORY);
        let description = candidate
            .description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(SYNCED_DESCRIPTION);

        let item = NewExpense::new(candidate.amount, ExpenseDate::new(date))
            .with_category(category)
            .with_description(description);
        let wallet_id = resolve_wallet(wallets, candidate.wallet.as_deref()).map(|w| w.id);
        let mut incoming = Expense::from_new(item, wallet_id.unwrap_or_default());
        incoming.wallet_id = wallet_id;

        if local.iter().any(|existing| existing.is_duplicate_of(&incoming)) {
            continue;
        }

        expenses.push(incoming);
        added += 1;
    }

    if added > 0 {
        sort_newest_first(&mut expenses);
    }

    Merge { expenses, added }
}

/// One-shot trigger for syncing a fresh device
///
/// Fires once when a remote identity is available and the local collection
/// is empty. It re-arms when the collection is seen non-empty or the
/// identity goes away.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoSync {
    fired: bool,
}

impl AutoSync {
    /// Record the current state; `true` means a sync should run now
    pub fn observe(&mut self, identity_available: bool, collection_empty: bool) -> bool {
        if !identity_available || !collection_empty {
            self.fired = false;
            return false;
        }
        if self.fired {
            return false;
        }
        self.fired = true;
        true
    }
}

/// Holds the in-flight flag for the duration of one sync
struct InFlight<'f>(&'f AtomicBool);

impl<'f> InFlight<'f> {
    fn acquire(flag: &'f AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Runs reconciliations and pushes against a remote store
pub struct SyncService<'a> {
    storage: &'a Storage,
    session: &'a RemoteSession,
    remote: &'a dyn RemoteStore,
}

impl<'a> SyncService<'a> {
    pub fn new(storage: &'a Storage, session: &'a RemoteSession, remote: &'a dyn RemoteStore) -> Self {
        Self {
            storage,
            session,
            remote,
        }
    }

    pub fn is_syncing(&self) -> bool {
        self.storage.sync_in_flight().load(Ordering::Acquire)
    }

    /// Pull the remote snapshot and merge it into the local collection
    ///
    /// Returns the number of records added. The collection is written once
    /// when something was added and not at all otherwise. A failed fetch
    /// returns [`XpenseError::Remote`] and leaves local state unchanged; a
    /// call while another sync on the same storage is running fails with
    /// [`XpenseError::SyncInProgress`].
    pub fn sync(&self) -> XpenseResult<usize> {
        let identity = self.session.require()?;
        let _guard = InFlight::acquire(self.storage.sync_in_flight())
            .ok_or(XpenseError::SyncInProgress)?;

        let rows = match self.remote.read_rows() {
            Ok(rows) => rows,
            Err(e) => {
                let e = match e {
                    XpenseError::Remote(_) => e,
                    other => XpenseError::Remote(other.to_string()),
                };
                self.storage
                    .log_sync(format!("{}: sync failed: {}", identity.account, e));
                return Err(e);
            }
        };
        let candidates: Vec<Candidate> = rows.iter().filter_map(SheetRow::to_candidate).collect();

        let local = self.storage.expenses.get_all()?;
        let wallets = self.storage.wallets.get_all()?;
        let merge = reconcile(&local, &candidates, &wallets);

        if merge.added > 0 {
            let known: HashSet<_> = local.iter().map(|e| e.id).collect();
            let entries: Vec<_> = merge
                .expenses
                .iter()
                .filter(|e| !known.contains(&e.id))
                .map(|e| {
                    AuditEntry::create(
                        EntityType::Expense,
                        e.id.to_string(),
                        Some(e.description.clone()),
                        e,
                    )
                })
                .collect();

            self.storage.expenses.replace_all(merge.expenses)?;
            self.storage.log_batch(&entries);
        }

        self.storage.log_sync(format!(
            "{}: {} rows read, {} added",
            identity.account,
            rows.len(),
            merge.added
        ));

        Ok(merge.added)
    }

    /// Append newly stored expenses to the remote sheet
    ///
    /// Best effort: without a session nothing happens, and a failed append
    /// is recorded in the audit log instead of being returned. Returns the
    /// number of rows appended.
    pub fn push(&self, expenses: &[Expense], currency: &str) -> XpenseResult<usize> {
        let Some(identity) = self.session.identity() else {
            return Ok(0);
        };
        let wallets = WalletService::new(self.storage);

        let mut pushed = 0;
        for expense in expenses {
            let wallet_name = wallets.name_of(expense.wallet_id)?;
            let row = SheetRow::from_expense(expense, currency, &wallet_name);

            match self.remote.append_row(&row) {
                Ok(()) => pushed += 1,
                Err(e) => self.storage.log_sync(format!(
                    "{}: failed to push {}: {}",
                    identity.account, expense.id, e
                )),
            }
        }

        Ok(pushed)
    }
}
