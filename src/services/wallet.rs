//! Wallet service
//!
//! Business logic for the wallet registry: registration, removal with the
//! last-wallet guard, and resolution of free-text wallet hints.

use crate::audit::EntityType;
use crate::error::{XpenseError, XpenseResult};
use crate::models::{Wallet, WalletId, WalletType};
use crate::storage::Storage;

/// Find the wallet a free-text hint refers to
///
/// First wallet in registry order whose name matches the hint (see
/// [`Wallet::matches_hint`]); a missing, blank or unmatched hint yields the
/// first wallet. `None` only when `wallets` is empty.
pub fn resolve_wallet<'w>(wallets: &'w [Wallet], hint: Option<&str>) -> Option<&'w Wallet> {
    hint.map(str::trim)
        .filter(|h| !h.is_empty())
        .and_then(|h| wallets.iter().find(|w| w.matches_hint(h)))
        .or_else(|| wallets.first())
}

/// Service for wallet management
pub struct WalletService<'a> {
    storage: &'a Storage,
}

impl<'a> WalletService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Register a new wallet at the end of the registry
    ///
    /// Names need not be unique.
    pub fn add(&self, name: &str, wallet_type: WalletType) -> XpenseResult<Wallet> {
        let wallet = Wallet::new(name.trim(), wallet_type);
        wallet
            .validate()
            .map_err(|e| XpenseError::Validation(e.to_string()))?;

        self.storage.wallets.push(wallet.clone())?;

        self.storage.log_create(
            EntityType::Wallet,
            wallet.id.to_string(),
            Some(wallet.name.clone()),
            &wallet,
        );

        Ok(wallet)
    }

    /// Remove a wallet
    ///
    /// Returns `Ok(false)` for an unknown ID. Fails with
    /// [`XpenseError::LastWallet`] when the registry would become empty.
    /// Expenses that referenced the wallet keep the dangling ID and are
    /// attributed to the default wallet wherever a wallet is resolved.
    pub fn remove(&self, id: WalletId) -> XpenseResult<bool> {
        if self.storage.wallets.get(id)?.is_none() {
            return Ok(false);
        }
        if self.storage.wallets.count()? <= 1 {
            return Err(XpenseError::LastWallet);
        }

        let Some(removed) = self.storage.wallets.delete(id)? else {
            return Ok(false);
        };

        self.storage.log_delete(
            EntityType::Wallet,
            removed.id.to_string(),
            Some(removed.name.clone()),
            &removed,
        );

        Ok(true)
    }

    /// The implicit default (first registered) wallet
    pub fn default_wallet(&self) -> XpenseResult<Wallet> {
        self.storage
            .wallets
            .first()?
            .ok_or_else(|| XpenseError::wallet_not_found("default"))
    }

    /// Resolve a wallet hint, falling back to the default wallet
    pub fn resolve_by_name(&self, hint: Option<&str>) -> XpenseResult<Wallet> {
        let wallets = self.storage.wallets.get_all()?;
        resolve_wallet(&wallets, hint)
            .cloned()
            .ok_or_else(|| XpenseError::wallet_not_found("default"))
    }

    /// Keep a known wallet ID, replace a missing or unknown one with the default
    pub fn resolve_id(&self, id: Option<WalletId>) -> XpenseResult<WalletId> {
        if let Some(id) = id {
            if self.storage.wallets.get(id)?.is_some() {
                return Ok(id);
            }
        }
        Ok(self.default_wallet()?.id)
    }

    pub fn list(&self) -> XpenseResult<Vec<Wallet>> {
        self.storage.wallets.get_all()
    }

    pub fn get(&self, id: WalletId) -> XpenseResult<Option<Wallet>> {
        self.storage.wallets.get(id)
    }

    /// Find a wallet by exact name (case-insensitive) or ID prefix
    pub fn find(&self, identifier: &str) -> XpenseResult<Option<Wallet>> {
        let identifier = identifier.trim();
        let wallets = self.storage.wallets.get_all()?;

        if let Some(wallet) = wallets
            .iter()
            .find(|w| w.name.eq_ignore_ascii_case(identifier))
        {
            return Ok(Some(wallet.clone()));
        }

        Ok(wallets.into_iter().find(|w| w.id.matches_prefix(identifier)))
    }

    /// Display name for a wallet reference, using the default for dangling IDs
    pub fn name_of(&self, id: Option<WalletId>) -> XpenseResult<String> {
        let id = self.resolve_id(id)?;
        Ok(self
            .storage
            .wallets
            .get(id)?
            .map(|w| w.name)
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::XpensePaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = XpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_add_wallet() {
        let (_temp_dir, storage) = create_test_storage();
        let service = WalletService::new(&storage);

        let card = service.add("  Card Visa ", WalletType::Card).unwrap();
        assert_eq!(card.name, "Card Visa");

        let names: Vec<_> = service.list().unwrap().into_iter().map(|w| w.name).collect();
        assert_eq!(names, vec!["Cash", "Card Visa"]);
    }

    #[test]
    fn test_add_rejects_empty_name() {
        let (_temp_dir, storage) = create_test_storage();
        let service = WalletService::new(&storage);

        let err = service.add("   ", WalletType::Cash).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_names_allowed() {
        let (_temp_dir, storage) = create_test_storage();
        let service = WalletService::new(&storage);

        service.add("Cash", WalletType::Cash).unwrap();
        assert_eq!(service.list().unwrap().len(), 2);
    }

    #[test]
    fn test_resolve_by_name() {
        let (_temp_dir, storage) = create_test_storage();
        let service = WalletService::new(&storage);
        let card = service.add("Card Visa", WalletType::Card).unwrap();

        assert_eq!(service.resolve_by_name(Some("Visa")).unwrap().id, card.id);
        assert_eq!(service.resolve_by_name(Some("my CARD VISA debit")).unwrap().id, card.id);
        assert_eq!(service.resolve_by_name(None).unwrap().name, "Cash");
        assert_eq!(service.resolve_by_name(Some("  ")).unwrap().name, "Cash");
        assert_eq!(service.resolve_by_name(Some("bKash")).unwrap().name, "Cash");
    }

    #[test]
    fn test_resolve_first_match_in_order() {
        let wallets = vec![
            Wallet::new("Cash", WalletType::Cash),
            Wallet::new("Card A", WalletType::Card),
            Wallet::new("Card B", WalletType::Card),
        ];

        assert_eq!(resolve_wallet(&wallets, Some("card")).unwrap().name, "Card A");
        assert!(resolve_wallet(&[], Some("card")).is_none());
    }

    #[test]
    fn test_remove_last_wallet_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = WalletService::new(&storage);
        let cash = service.default_wallet().unwrap();

        let err = service.remove(cash.id).unwrap_err();
        assert!(matches!(err, XpenseError::LastWallet));
        assert_eq!(service.list().unwrap(), vec![cash]);
    }

    #[test]
    fn test_remove_wallet() {
        let (temp_dir, storage) = create_test_storage();
        let service = WalletService::new(&storage);
        let card = service.add("Card", WalletType::Card).unwrap();

        assert!(service.remove(card.id).unwrap());
        assert!(!service.remove(card.id).unwrap());

        // Persisted
        let reloaded = crate::storage::WalletRepository::new(
            temp_dir.path().join("data").join("wallets.json"),
        );
        reloaded.load().unwrap();
        assert_eq!(reloaded.count().unwrap(), 1);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let (_temp_dir, storage) = create_test_storage();
        let service = WalletService::new(&storage);

        assert!(!service.remove(WalletId::new()).unwrap());
    }

    #[test]
    fn test_resolve_id_falls_back_to_default() {
        let (_temp_dir, storage) = create_test_storage();
        let service = WalletService::new(&storage);
        let cash = service.default_wallet().unwrap();
        let card = service.add("Card", WalletType::Card).unwrap();

        assert_eq!(service.resolve_id(Some(card.id)).unwrap(), card.id);
        assert_eq!(service.resolve_id(Some(WalletId::new())).unwrap(), cash.id);
        assert_eq!(service.resolve_id(None).unwrap(), cash.id);
    }

    #[test]
    fn test_find() {
        let (_temp_dir, storage) = create_test_storage();
        let service = WalletService::new(&storage);
        let card = service.add("Card", WalletType::Card).unwrap();

        assert_eq!(service.find("card").unwrap().unwrap().id, card.id);
        assert_eq!(
            service.find(&card.id.to_string()).unwrap().unwrap().id,
            card.id
        );
        assert!(service.find("Bank").unwrap().is_none());
    }

    #[test]
    fn test_unwritable_audit_log_keeps_registry_changes() {
        let temp_dir = TempDir::new().unwrap();
        let paths = XpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::create_dir_all(paths.audit_log()).unwrap();
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        let service = WalletService::new(&storage);

        let card = service.add("Card", WalletType::Card).unwrap();
        assert_eq!(service.list().unwrap().len(), 2);
        assert!(service.remove(card.id).unwrap());
        assert_eq!(service.list().unwrap().len(), 1);
    }
}
