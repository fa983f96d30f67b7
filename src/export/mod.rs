//! Export module for xpense
//!
//! Writes a filtered expense view as a spreadsheet-compatible CSV file.

pub mod csv;

pub use self::csv::{export_expenses_csv, EXPORT_HEADER, UNKNOWN_WALLET};
