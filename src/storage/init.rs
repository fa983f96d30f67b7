//! Storage initialization
//!
//! Handles first-run setup: directories, the default wallet and a settings
//! file.

use crate::config::paths::XpensePaths;
use crate::config::settings::Settings;
use crate::error::XpenseError;
use crate::models::Wallet;

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Existing slots are left as they are.
pub fn initialize_storage(paths: &XpensePaths) -> Result<(), XpenseError> {
    paths.ensure_directories()?;

    if !paths.wallets_file().exists() {
        write_json_atomic(
            paths.wallets_file(),
            &serde_json::json!({ "wallets": [Wallet::default_cash()] }),
        )?;
    }

    if !paths.settings_file().exists() {
        Settings::default().save(paths)?;
    }

    Ok(())
}
