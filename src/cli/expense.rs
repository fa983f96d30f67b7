//! Expense CLI commands
//!
//! Manual entry, import of extracted candidates, filtered listing, CSV
//! export, editing and deletion.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Subcommand};

use crate::config::settings::Settings;
use crate::display::{format_expense_details, format_expense_list, format_summary};
use crate::error::{XpenseError, XpenseResult};
use crate::export::export_expenses_csv;
use crate::models::{Amount, DateFilter, DateFilterKind, ExpenseDate};
use crate::remote::RemoteSession;
use crate::services::view::today;
use crate::services::{
    summarize, Candidate, CaptureOutcome, CaptureService, CaptureSource, ExpenseService,
    JsonFileExtractor, WalletService,
};
use crate::storage::Storage;

use super::sync::push_new_expenses;

/// Time window options shared by `list`, `export` and `summary`
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Window: all, today, yesterday, week, last-week, month, last-month
    #[arg(short, long)]
    pub filter: Option<String>,

    /// Custom range start (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Custom range end (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub to: Option<NaiveDate>,
}

impl FilterArgs {
    /// Build the date filter; a given range bound selects a custom window
    pub fn to_filter(&self) -> DateFilter {
        if self.from.is_some() || self.to.is_some() {
            return DateFilter {
                kind: DateFilterKind::Custom,
                start: self.from,
                end: self.to,
            };
        }

        match &self.filter {
            Some(name) => DateFilter::new(DateFilterKind::parse(name)),
            None => DateFilter::default(),
        }
    }
}

/// Expense commands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense by hand
    Add {
        /// Amount spent
        amount: String,
        /// Description
        #[arg(short, long)]
        description: Option<String>,
        /// Category (free text)
        #[arg(short, long)]
        category: Option<String>,
        /// Date (YYYY-MM-DD or RFC 3339); defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Wallet name (loose match)
        #[arg(short, long)]
        wallet: Option<String>,
    },
    /// Import extracted expenses from a JSON file
    Import {
        /// JSON file holding the candidate list
        file: PathBuf,
        /// How the expenses were captured: voice, photo, text
        #[arg(short, long, default_value = "text")]
        source: String,
    },
    /// List expenses in a time window
    List {
        #[command(flatten)]
        window: FilterArgs,
        /// Show at most this many expenses
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show expense details
    Show {
        /// Expense ID
        expense: String,
    },
    /// Edit an expense
    Edit {
        /// Expense ID
        expense: String,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(long)]
        date: Option<String>,
        /// Wallet name or ID
        #[arg(short, long)]
        wallet: Option<String>,
    },
    /// Delete an expense
    Delete {
        /// Expense ID
        expense: String,
    },
    /// Export expenses in a time window as CSV
    Export {
        #[command(flatten)]
        window: FilterArgs,
        /// Output file (prints to stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Total spending in a time window
    Summary {
        #[command(flatten)]
        window: FilterArgs,
    },
}

fn parse_amount(value: &str) -> XpenseResult<Amount> {
    Amount::parse(value).map_err(|e| XpenseError::Validation(e.to_string()))
}

fn parse_date(value: &str) -> XpenseResult<ExpenseDate> {
    let date = ExpenseDate::new(value);
    if !date.is_valid() {
        return Err(XpenseError::Validation(format!(
            "Invalid date '{}': expected YYYY-MM-DD",
            value
        )));
    }
    Ok(date)
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    session: &RemoteSession,
    cmd: ExpenseCommands,
) -> XpenseResult<()> {
    let service = ExpenseService::new(storage);
    let wallets = WalletService::new(storage);

    match cmd {
        ExpenseCommands::Add {
            amount,
            description,
            category,
            date,
            wallet,
        } => {
            let date = date.as_deref().map(parse_date).transpose()?;
            let candidate = Candidate {
                amount: parse_amount(&amount)?,
                category,
                description,
                date: date.map(|d| d.as_str().to_string()),
                wallet,
            };

            let outcome = CaptureService::new(storage).record(vec![candidate], CaptureSource::Manual, today())?;
            report_capture(storage, settings, session, outcome)?;
        }

        ExpenseCommands::Import { file, source } => {
            let source = CaptureSource::parse(&source).ok_or_else(|| {
                XpenseError::Validation(format!(
                    "Unknown source '{}'. Valid sources: voice, photo, text",
                    source
                ))
            })?;

            let outcome = CaptureService::new(storage).capture(
                &JsonFileExtractor,
                &file.to_string_lossy(),
                source,
                settings,
                today(),
            )?;
            report_capture(storage, settings, session, outcome)?;
        }

        ExpenseCommands::List { window, limit } => {
            let filter = window.to_filter();
            let mut expenses = service.list_view(&filter, settings.week_start_day, today())?;
            let total = expenses.len();
            if let Some(limit) = limit {
                expenses.truncate(limit);
            }

            println!("{}", filter.kind);
            println!();
            print!(
                "{}",
                format_expense_list(&expenses, &wallets.list()?, &settings.currency)
            );
            if expenses.len() < total {
                println!("\nShowing {} of {} expenses", expenses.len(), total);
            }
        }

        ExpenseCommands::Show { expense } => {
            let found = service
                .find(&expense)?
                .ok_or_else(|| XpenseError::expense_not_found(&expense))?;
            let wallet_name = wallets.name_of(found.wallet_id)?;

            print!(
                "{}",
                format_expense_details(&found, &wallet_name, &settings.currency)
            );
        }

        ExpenseCommands::Edit {
            expense,
            amount,
            description,
            category,
            date,
            wallet,
        } => {
            let mut edited = service
                .find(&expense)?
                .ok_or_else(|| XpenseError::expense_not_found(&expense))?;

            if let Some(amount) = amount {
                let amount = parse_amount(&amount)?;
                if !amount.is_positive() {
                    return Err(XpenseError::Validation("Amount must be greater than zero".into()));
                }
                edited.amount = amount;
            }
            if let Some(description) = description {
                edited.description = description;
            }
            if let Some(category) = category {
                edited.category = category;
            }
            if let Some(date) = date {
                edited.date = parse_date(&date)?;
            }
            if let Some(wallet) = wallet {
                let found = wallets
                    .find(&wallet)?
                    .ok_or_else(|| XpenseError::wallet_not_found(&wallet))?;
                edited.wallet_id = Some(found.id);
            }

            if service.update(edited.clone())? {
                println!("Updated expense: {}", edited);
            } else {
                println!("Expense {} no longer exists; nothing changed.", edited.id);
            }
        }

        ExpenseCommands::Delete { expense } => {
            let found = service
                .find(&expense)?
                .ok_or_else(|| XpenseError::expense_not_found(&expense))?;

            if service.remove(found.id)? {
                println!("Deleted expense: {}", found);
            }
        }

        ExpenseCommands::Export { window, output } => {
            let filter = window.to_filter();
            let expenses = service.list_view(&filter, settings.week_start_day, today())?;
            let registry = wallets.list()?;

            match output {
                Some(path) => {
                    if expenses.is_empty() {
                        println!("No expenses to export for {}", filter.kind);
                        return Ok(());
                    }
                    let file = std::fs::File::create(&path).map_err(|e| {
                        XpenseError::Export(format!("Failed to create {}: {}", path.display(), e))
                    })?;
                    let count = export_expenses_csv(&expenses, &registry, file)?;
                    println!("Exported {} expenses to {}", count, path.display());
                }
                None => {
                    export_expenses_csv(&expenses, &registry, std::io::stdout().lock())?;
                }
            }
        }

        ExpenseCommands::Summary { window } => {
            let filter = window.to_filter();
            let expenses = service.list_view(&filter, settings.week_start_day, today())?;
            let summary = summarize(&expenses, settings.spending_limit);

            print!(
                "{}",
                format_summary(&summary, &filter.kind.to_string(), &settings.currency)
            );
        }
    }

    Ok(())
}

fn report_capture(
    storage: &Storage,
    settings: &Settings,
    session: &RemoteSession,
    outcome: CaptureOutcome,
) -> XpenseResult<()> {
    match outcome {
        CaptureOutcome::Saved(saved) => {
            for expense in &saved {
                println!("Added expense: {}", expense);
            }
            let pushed = push_new_expenses(storage, settings, session, &saved)?;
            if pushed > 0 {
                println!("Backed up {} to the remote sheet", pushed);
            }
        }
        CaptureOutcome::Notice(notice) => println!("{}", notice),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_args_default_is_month() {
        assert_eq!(FilterArgs::default().to_filter().kind, DateFilterKind::Month);
    }

    #[test]
    fn test_filter_args_range_wins() {
        let args = FilterArgs {
            filter: Some("today".into()),
            from: NaiveDate::from_ymd_opt(2024, 5, 1),
            to: None,
        };

        let filter = args.to_filter();
        assert_eq!(filter.kind, DateFilterKind::Custom);
        assert_eq!(filter.start, NaiveDate::from_ymd_opt(2024, 5, 1));
    }

    #[test]
    fn test_filter_args_names() {
        let args = FilterArgs {
            filter: Some("last-week".into()),
            ..FilterArgs::default()
        };
        assert_eq!(args.to_filter().kind, DateFilterKind::LastWeek);
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2024-05-01").is_ok());
        assert!(parse_date("2024-05-01T10:00:00Z").is_ok());
        assert!(parse_date("May 1st").is_err());
    }
}
