//! Wallet CLI commands

use clap::Subcommand;

use crate::display::format_wallet_list;
use crate::error::{XpenseError, XpenseResult};
use crate::models::WalletType;
use crate::services::WalletService;
use crate::storage::Storage;

/// Wallet subcommands
#[derive(Subcommand)]
pub enum WalletCommands {
    /// List wallets (the first one is the default)
    List,
    /// Register a wallet
    Add {
        /// Wallet name
        name: String,
        /// Wallet type: cash, card, bank, digital, other
        #[arg(short = 't', long = "type", default_value = "cash")]
        wallet_type: String,
    },
    /// Remove a wallet
    Remove {
        /// Wallet name or ID
        wallet: String,
    },
}

/// Handle a wallet command
pub fn handle_wallet_command(storage: &Storage, cmd: WalletCommands) -> XpenseResult<()> {
    let service = WalletService::new(storage);

    match cmd {
        WalletCommands::List => {
            print!("{}", format_wallet_list(&service.list()?));
        }

        WalletCommands::Add { name, wallet_type } => {
            let wallet_type = WalletType::parse(&wallet_type).ok_or_else(|| {
                XpenseError::Validation(format!(
                    "Invalid wallet type: '{}'. Valid types: cash, card, bank, digital, other",
                    wallet_type
                ))
            })?;

            let wallet = service.add(&name, wallet_type)?;
            println!("Added wallet: {}", wallet);
            println!("  ID: {}", wallet.id);
        }

        WalletCommands::Remove { wallet } => {
            let found = service
                .find(&wallet)?
                .ok_or_else(|| XpenseError::wallet_not_found(&wallet))?;

            if service.remove(found.id)? {
                println!("Removed wallet: {}", found.name);
            }
        }
    }

    Ok(())
}
