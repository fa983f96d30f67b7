//! Remote sheet CLI commands
//!
//! Connects an identity to a sheet, runs reconciliations, and holds the
//! helpers other commands use for auto-sync and backup pushes.

use std::path::PathBuf;

use clap::Subcommand;

use crate::audit::EntityType;
use crate::config::settings::Settings;
use crate::error::XpenseResult;
use crate::models::Expense;
use crate::remote::{CsvSheetStore, RemoteSession};
use crate::services::{Notice, SyncService};
use crate::storage::Storage;

/// Sync subcommands
#[derive(Subcommand)]
pub enum SyncCommands {
    /// Sign in to a remote sheet
    Connect {
        /// Account name
        account: String,
        /// CSV sheet to use instead of the default one
        #[arg(long)]
        sheet: Option<PathBuf>,
    },
    /// Sign out of the remote sheet
    Disconnect,
    /// Show the connection and recent sync runs
    Status,
    /// Merge the remote sheet into local expenses
    #[command(alias = "now")]
    Run,
}

fn sheet_store(storage: &Storage, session: &RemoteSession) -> XpenseResult<CsvSheetStore> {
    Ok(CsvSheetStore::new(session.sheet_path(storage.paths())?))
}

fn run_sync(storage: &Storage, session: &RemoteSession) -> XpenseResult<usize> {
    let store = sheet_store(storage, session)?;
    SyncService::new(storage, session, &store).sync()
}

/// Handle a sync command
pub fn handle_sync_command(
    storage: &Storage,
    session: &mut RemoteSession,
    cmd: SyncCommands,
) -> XpenseResult<()> {
    match cmd {
        SyncCommands::Connect { account, sheet } => {
            let identity = session.connect(&account, sheet)?;
            println!("Connected as {}", identity.account);

            let store = sheet_store(storage, session)?;
            store.ensure_exists()?;
            println!("Sheet: {}", store.path().display());
            session.save(storage.paths())?;

            if let Some(added) = auto_sync(storage, session)? {
                println!("Restored {} expenses from the sheet", added);
            }
        }

        SyncCommands::Disconnect => {
            match session.disconnect() {
                Some(identity) => println!("Disconnected {}", identity.account),
                None => println!("Not connected."),
            }
            session.save(storage.paths())?;
        }

        SyncCommands::Status => {
            match session.identity() {
                Some(identity) => {
                    println!("Account:   {}", identity.account);
                    println!("Sheet:     {}", session.sheet_path(storage.paths())?.display());
                    println!(
                        "Connected: {}",
                        identity.connected_at.format("%Y-%m-%d %H:%M UTC")
                    );
                }
                None => println!("Not connected. Run 'xpense sync connect <account>' first."),
            }

            let runs = storage.audit().read_recent_for(EntityType::Sheet, 5)?;
            if !runs.is_empty() {
                println!();
                println!("Recent sync activity:");
                for entry in runs {
                    println!(
                        "  [{}] {}",
                        entry.timestamp.format("%Y-%m-%d %H:%M"),
                        entry.diff_summary.unwrap_or_default()
                    );
                }
            }
        }

        SyncCommands::Run => {
            let added = run_sync(storage, session)?;
            if added == 0 {
                println!("Already up to date.");
            } else {
                println!("Added {} expenses from the sheet", added);
            }
        }
    }

    Ok(())
}

/// Run the one-shot sync for a fresh device when its latch fires
///
/// Returns the number of expenses added when a sync ran. A failed sync is
/// reported as a notice and does not fail the calling command.
pub fn auto_sync(storage: &Storage, session: &mut RemoteSession) -> XpenseResult<Option<usize>> {
    let before = session.auto_sync;
    let fire = session
        .auto_sync
        .observe(session.is_connected(), storage.expenses.is_empty()?);
    if session.auto_sync != before {
        session.save(storage.paths())?;
    }
    if !fire {
        return Ok(None);
    }

    match run_sync(storage, session) {
        Ok(added) => Ok(Some(added)),
        Err(e) => match Notice::from_error(&e) {
            Some(notice) => {
                eprintln!("{}", notice);
                Ok(None)
            }
            None => Err(e),
        },
    }
}

/// Back up freshly stored expenses to the remote sheet, if connected
pub fn push_new_expenses(
    storage: &Storage,
    settings: &Settings,
    session: &RemoteSession,
    expenses: &[Expense],
) -> XpenseResult<usize> {
    if !session.is_connected() || expenses.is_empty() {
        return Ok(0);
    }
    let store = sheet_store(storage, session)?;
    SyncService::new(storage, session, &store).push(expenses, &settings.currency)
}
