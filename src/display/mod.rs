//! Display formatting for terminal output
//!
//! Plain-text tables and detail views for expenses, wallets and spending
//! summaries.

pub mod expense;
pub mod summary;
pub mod wallet;

pub use expense::{format_expense_details, format_expense_list};
pub use summary::format_summary;
pub use wallet::format_wallet_list;

use crate::models::Amount;

/// Symbol shown in front of amounts for a currency code
pub fn currency_symbol(code: &str) -> String {
    match code.to_uppercase().as_str() {
        "BDT" => "৳".to_string(),
        "USD" => "$".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        "INR" => "₹".to_string(),
        "JPY" => "¥".to_string(),
        other => format!("{} ", other),
    }
}

pub fn format_amount(amount: Amount, currency: &str) -> String {
    amount.format_with_symbol(&currency_symbol(currency))
}

/// Shorten to `max` characters, marking the cut with "..."
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
