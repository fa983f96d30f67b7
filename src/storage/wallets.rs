//! Wallet repository for JSON storage
//!
//! Manages loading and saving the ordered wallet list to wallets.json.
//! Registration order matters: the first wallet is the default.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::XpenseError;
use crate::models::{Wallet, WalletId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable wallet data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct WalletData {
    wallets: Vec<Wallet>,
}

/// Repository for wallet persistence
pub struct WalletRepository {
    path: PathBuf,
    data: RwLock<Vec<Wallet>>,
}

impl WalletRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load wallets from disk, seeding the default cash wallet when none exist
    pub fn load(&self) -> Result<(), XpenseError> {
        let file_data: WalletData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            XpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        if file_data.wallets.is_empty() {
            let seeded = WalletData {
                wallets: vec![Wallet::default_cash()],
            };
            write_json_atomic(&self.path, &seeded)?;
            *data = seeded.wallets;
        } else {
            *data = file_data.wallets;
        }

        Ok(())
    }

    /// All wallets in registration order
    pub fn get_all(&self) -> Result<Vec<Wallet>, XpenseError> {
        let data = self.data.read().map_err(|e| {
            XpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.clone())
    }

    pub fn get(&self, id: WalletId) -> Result<Option<Wallet>, XpenseError> {
        let data = self.data.read().map_err(|e| {
            XpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.iter().find(|w| w.id == id).cloned())
    }

    /// First registered wallet
    pub fn first(&self) -> Result<Option<Wallet>, XpenseError> {
        let data = self.data.read().map_err(|e| {
            XpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.first().cloned())
    }

    /// Append a wallet at the end of the registry and persist
    pub fn push(&self, wallet: Wallet) -> Result<(), XpenseError> {
        self.mutate(|wallets| {
            wallets.push(wallet);
            Some(())
        })?;
        Ok(())
    }

    /// Remove a wallet and persist, returning it if it existed
    pub fn delete(&self, id: WalletId) -> Result<Option<Wallet>, XpenseError> {
        self.mutate(|wallets| {
            let index = wallets.iter().position(|w| w.id == id)?;
            Some(wallets.remove(index))
        })
    }

    /// Same contract as the expense repository: disk first, then memory
    fn mutate<R>(
        &self,
        change: impl FnOnce(&mut Vec<Wallet>) -> Option<R>,
    ) -> Result<Option<R>, XpenseError> {
        let mut data = self.data.write().map_err(|e| {
            XpenseError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let mut working = data.clone();
        let Some(result) = change(&mut working) else {
            return Ok(None);
        };

        let file_data = WalletData { wallets: working };
        write_json_atomic(&self.path, &file_data)?;
        *data = file_data.wallets;
        Ok(Some(result))
    }

    pub fn count(&self) -> Result<usize, XpenseError> {
        let data = self.data.read().map_err(|e| {
            XpenseError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.len())
    }
}
