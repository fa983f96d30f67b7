//! Remote tabular store
//!
//! The remote copy of the expense data is a sheet of rows
//! `Date, Category, Description, Amount, Currency, Wallet`. Rows are only
//! ever appended or read back in full. Access requires an explicit
//! [`RemoteSession`].

pub mod session;
pub mod sheet;

pub use session::{RemoteIdentity, RemoteSession};
pub use sheet::{CsvSheetStore, RemoteStore, SheetRow, SHEET_HEADER};
