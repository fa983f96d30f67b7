//! Core data models for xpense
//!
//! This module contains the data structures of the expense domain:
//! expenses, wallets, amounts and date filters.

pub mod amount;
pub mod expense;
pub mod filter;
pub mod ids;
pub mod wallet;

pub use amount::{Amount, AMOUNT_TOLERANCE};
pub use expense::{Expense, ExpenseDate, NewExpense, DEFAULT_CATEGORY, DEFAULT_DESCRIPTION};
pub use filter::{DateFilter, DateFilterKind};
pub use ids::{ExpenseId, WalletId};
pub use wallet::{Wallet, WalletType};
