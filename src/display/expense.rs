//! Expense display formatting

use std::collections::HashMap;

use crate::models::{Expense, Wallet, WalletId};

use super::{format_amount, truncate};

fn wallet_label<'w>(names: &HashMap<WalletId, &'w str>, fallback: &'w str, id: Option<WalletId>) -> &'w str {
    id.and_then(|id| names.get(&id).copied()).unwrap_or(fallback)
}

/// Format expenses as a table (date, description, category, wallet, amount)
///
/// Expenses whose wallet no longer exists are shown under the first wallet.
pub fn format_expense_list(expenses: &[Expense], wallets: &[Wallet], currency: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let names: HashMap<WalletId, &str> = wallets.iter().map(|w| (w.id, w.name.as_str())).collect();
    let fallback = wallets.first().map(|w| w.name.as_str()).unwrap_or("");

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<10}  {:<24}  {:<14}  {:<12}  {:>12}\n",
        "ID", "Date", "Description", "Category", "Wallet", "Amount"
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<10}  {:-<24}  {:-<14}  {:-<12}  {:->12}\n",
        "", "", "", "", "", ""
    ));

    for expense in expenses {
        output.push_str(&format!(
            "{:<12}  {:<10}  {:<24}  {:<14}  {:<12}  {:>12}\n",
            expense.id.to_string(),
            expense.date.day_key(),
            truncate(&expense.description, 24),
            truncate(&expense.category, 14),
            truncate(wallet_label(&names, fallback, expense.wallet_id), 12),
            format_amount(expense.amount, currency),
        ));
    }

    output
}

/// Format one expense with all of its fields
pub fn format_expense_details(expense: &Expense, wallet_name: &str, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:     {}\n", expense.description));
    output.push_str(&format!("ID:          {}\n", expense.id));
    output.push_str(&format!("Amount:      {}\n", format_amount(expense.amount, currency)));
    output.push_str(&format!("Category:    {}\n", expense.category));
    output.push_str(&format!("Date:        {}\n", expense.date));
    output.push_str(&format!("Wallet:      {}\n", wallet_name));
    output.push_str(&format!(
        "Created:     {}\n",
        expense.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    if !expense.date.is_valid() {
        output.push_str("\nNote: the date could not be read; this expense is hidden from filtered lists.\n");
    }

    output
}
