//! Storage layer for xpense
//!
//! Provides JSON file storage with atomic writes for the expense and wallet
//! slots, plus the audit log that records every mutation.

pub mod expenses;
pub mod file_io;
pub mod init;
pub mod wallets;

pub use expenses::ExpenseRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::initialize_storage;
pub use wallets::WalletRepository;

use std::sync::atomic::AtomicBool;

use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::paths::XpensePaths;
use crate::error::XpenseError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: XpensePaths,
    pub expenses: ExpenseRepository,
    pub wallets: WalletRepository,
    audit: AuditLogger,
    /// Set while a sync is running against this storage
    sync_in_flight: AtomicBool,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: XpensePaths) -> Result<Self, XpenseError> {
        paths.ensure_directories()?;

        Ok(Self {
            expenses: ExpenseRepository::new(paths.expenses_file()),
            wallets: WalletRepository::new(paths.wallets_file()),
            audit: AuditLogger::new(paths.audit_log()),
            sync_in_flight: AtomicBool::new(false),
            paths,
        })
    }

    pub fn paths(&self) -> &XpensePaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), XpenseError> {
        self.wallets.load()?;
        self.expenses.load()?;
        Ok(())
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub(crate) fn sync_in_flight(&self) -> &AtomicBool {
        &self.sync_in_flight
    }

    /// Record a created entity in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        self.record(
            self.audit
                .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity)),
        );
    }

    /// Record several entries at once
    pub fn log_batch(&self, entries: &[AuditEntry]) {
        self.record(self.audit.log_batch(entries));
    }

    /// Record an updated entity, with a diff when the caller gives none
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) {
        let diff_summary = diff_summary.or_else(|| {
            let before = serde_json::to_value(before).ok()?;
            let after = serde_json::to_value(after).ok()?;
            generate_diff(&before, &after)
        });

        self.record(self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        )));
    }

    /// Record a deleted entity in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        self.record(
            self.audit
                .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity)),
        );
    }

    /// Record a sync run or sync failure
    pub fn log_sync(&self, summary: impl Into<String>) {
        self.record(self.audit.log(&AuditEntry::sync(summary)));
    }

    /// Audit entries follow an already committed change; a failed write
    /// is reported on stderr and never fails the change itself
    fn record(&self, result: Result<(), XpenseError>) {
        if let Err(e) = result {
            eprintln!(
                "Warning: could not write audit log {}: {}",
                self.audit.path().display(),
                e
            );
        }
    }
}
