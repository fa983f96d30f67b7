use anyhow::Result;
use clap::{Parser, Subcommand};

use xpense::cli::{
    auto_sync, handle_audit_command, handle_config_command, handle_expense_command,
    handle_sync_command, handle_wallet_command, ConfigCommands, ExpenseCommands, SyncCommands,
    WalletCommands,
};
use xpense::config::{paths::XpensePaths, settings::Settings};
use xpense::error::XpenseResult;
use xpense::remote::RemoteSession;
use xpense::services::Notice;
use xpense::storage::Storage;

#[derive(Parser)]
#[command(
    name = "xpense",
    author = "Kaylee Beyene",
    version,
    about = "Local-first expense tracker",
    long_about = "xpense keeps a local list of everyday expenses and wallets, shows \
                  them by day, week or month, and keeps them in step with a remote \
                  expense sheet."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Expense(ExpenseCommands),

    /// Wallet management commands
    #[command(subcommand)]
    Wallet(WalletCommands),

    /// Show or change settings
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Remote sheet commands
    #[command(subcommand)]
    Sync(SyncCommands),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
        /// Only entries for: expense, wallet, settings, sheet
        #[arg(short, long)]
        entity: Option<String>,
    },

    /// Initialize the data directory
    Init,
}

fn run(cli: Cli) -> XpenseResult<()> {
    let paths = XpensePaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    let mut session = RemoteSession::load(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    if matches!(cli.command, Some(Commands::Expense(_))) {
        if let Some(added) = auto_sync(&storage, &mut session)? {
            println!("Restored {} expenses from the sheet", added);
        }
    }

    match cli.command {
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&storage, &settings, &session, cmd)?;
        }
        Some(Commands::Wallet(cmd)) => {
            handle_wallet_command(&storage, cmd)?;
        }
        Some(Commands::Config(cmd)) => {
            handle_config_command(&storage, &mut settings, cmd)?;
        }
        Some(Commands::Sync(cmd)) => {
            handle_sync_command(&storage, &mut session, cmd)?;
        }
        Some(Commands::Audit { limit, entity }) => {
            handle_audit_command(&storage, limit, entity)?;
        }
        Some(Commands::Init) => {
            if paths.is_initialized() && settings.onboarding_completed {
                println!("xpense is already initialized at: {}", paths.base_dir().display());
                return Ok(());
            }

            println!("Initializing xpense at: {}", paths.base_dir().display());
            xpense::storage::initialize_storage(&paths)?;
            settings.onboarding_completed = true;
            settings.save(&paths)?;
            println!("Initialization complete!");
            println!();
            println!("A 'Cash' wallet has been created. Run 'xpense wallet add' to add more.");
        }
        None => {
            println!("xpense - local-first expense tracker");
            println!();
            println!("Run 'xpense --help' for usage information.");
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        if let Some(notice) = Notice::from_error(&err) {
            eprintln!("{}", notice);
            std::process::exit(1);
        }
        return Err(err.into());
    }

    Ok(())
}
