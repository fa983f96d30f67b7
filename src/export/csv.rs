//! CSV export of expenses

use std::collections::HashMap;
use std::io::Write;

use csv::Writer;

use crate::error::{XpenseError, XpenseResult};
use crate::models::{Expense, Wallet};

/// Column names of an exported file
pub const EXPORT_HEADER: [&str; 5] = ["Date", "Category", "Description", "Amount", "Wallet"];

/// Wallet column value for expenses whose wallet no longer exists
pub const UNKNOWN_WALLET: &str = "Unknown";

fn export_err(e: impl std::fmt::Display) -> XpenseError {
    XpenseError::Export(e.to_string())
}

/// Write `expenses` as CSV in the order given
///
/// The date column holds the calendar day only and amounts have two
/// decimals. Returns the number of rows written, not counting the header.
pub fn export_expenses_csv<W: Write>(
    expenses: &[Expense],
    wallets: &[Wallet],
    writer: W,
) -> XpenseResult<usize> {
    let wallet_names: HashMap<_, _> = wallets.iter().map(|w| (w.id, w.name.as_str())).collect();

    let mut csv = Writer::from_writer(writer);
    csv.write_record(EXPORT_HEADER).map_err(export_err)?;

    for expense in expenses {
        let wallet = expense
            .wallet_id
            .and_then(|id| wallet_names.get(&id).copied())
            .unwrap_or(UNKNOWN_WALLET);
        let amount = expense.amount.to_string();

        csv.write_record([
            expense.date.day_key(),
            expense.category.as_str(),
            expense.description.as_str(),
            amount.as_str(),
            wallet,
        ])
        .map_err(export_err)?;
    }

    csv.flush().map_err(export_err)?;
    Ok(expenses.len())
}
