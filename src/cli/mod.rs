//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod config;
pub mod expense;
pub mod sync;
pub mod wallet;

pub use audit::handle_audit_command;
pub use config::{handle_config_command, ConfigCommands};
pub use expense::{handle_expense_command, ExpenseCommands, FilterArgs};
pub use sync::{auto_sync, handle_sync_command, SyncCommands};
pub use wallet::{handle_wallet_command, WalletCommands};
