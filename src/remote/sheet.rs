//! Expense sheet rows and the CSV-backed sheet store

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use crate::error::{XpenseError, XpenseResult};
use crate::models::{Amount, Expense};
use crate::services::capture::Candidate;

/// Column titles of the sheet's first row
pub const SHEET_HEADER: [&str; 6] = ["Date", "Category", "Description", "Amount", "Currency", "Wallet"];

/// One sheet row, every cell kept as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub date: String,
    pub category: String,
    pub description: String,
    pub amount: String,
    pub currency: String,
    pub wallet: String,
}

impl SheetRow {
    /// Row written for a locally stored expense
    pub fn from_expense(expense: &Expense, currency: &str, wallet_name: &str) -> Self {
        Self {
            date: expense.date.day_key().to_string(),
            category: expense.category.clone(),
            description: expense.description.clone(),
            amount: expense.amount.value().to_string(),
            currency: currency.to_string(),
            wallet: wallet_name.to_string(),
        }
    }

    fn from_record(record: &StringRecord) -> Self {
        let cell = |i: usize| record.get(i).unwrap_or("").trim().to_string();
        Self {
            date: cell(0),
            category: cell(1),
            description: cell(2),
            amount: cell(3),
            currency: cell(4),
            wallet: cell(5),
        }
    }

    fn to_record(&self) -> [&str; 6] {
        [
            &self.date,
            &self.category,
            &self.description,
            &self.amount,
            &self.currency,
            &self.wallet,
        ]
    }

    /// Interpret the row as a synced expense candidate
    ///
    /// `None` for rows whose amount is unreadable or not positive, or whose
    /// date is not a date. Blank cells stay `None` so defaults apply later.
    pub fn to_candidate(&self) -> Option<Candidate> {
        let amount = Amount::parse_lenient(&self.amount).ok()?;
        if !amount.is_positive() || !is_date(&self.date) {
            return None;
        }

        let non_blank = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Some(Candidate {
            amount,
            category: non_blank(&self.category),
            description: non_blank(&self.description),
            date: Some(self.date.clone()),
            wallet: non_blank(&self.wallet),
        })
    }
}

fn is_date(s: &str) -> bool {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok() || DateTime::parse_from_rfc3339(s).is_ok()
}

/// Append/read access to the remote expense sheet
pub trait RemoteStore: Send + Sync {
    /// Every data row (header excluded), in sheet order
    fn read_rows(&self) -> XpenseResult<Vec<SheetRow>>;

    fn append_row(&self, row: &SheetRow) -> XpenseResult<()>;
}

/// A sheet stored as a CSV file
#[derive(Debug, Clone)]
pub struct CsvSheetStore {
    path: PathBuf,
}

impl CsvSheetStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the sheet with its header row if it does not exist yet
    pub fn ensure_exists(&self) -> XpenseResult<()> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| XpenseError::Remote(format!("Failed to create sheet directory: {}", e)))?;
        }

        let mut writer = WriterBuilder::new().from_path(&self.path)?;
        writer.write_record(SHEET_HEADER)?;
        writer
            .flush()
            .map_err(|e| XpenseError::Remote(format!("Failed to write sheet header: {}", e)))
    }
}

impl RemoteStore for CsvSheetStore {
    fn read_rows(&self) -> XpenseResult<Vec<SheetRow>> {
        let file = File::open(&self.path).map_err(|e| {
            XpenseError::Remote(format!("Failed to open sheet {}: {}", self.path.display(), e))
        })?;

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(file);

        reader
            .records()
            .map(|record| {
                record
                    .map(|r| SheetRow::from_record(&r))
                    .map_err(XpenseError::from)
            })
            .collect()
    }

    fn append_row(&self, row: &SheetRow) -> XpenseResult<()> {
        self.ensure_exists()?;

        let file = OpenOptions::new().append(true).open(&self.path).map_err(|e| {
            XpenseError::Remote(format!("Failed to open sheet {}: {}", self.path.display(), e))
        })?;

        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        writer.write_record(row.to_record())?;
        writer
            .flush()
            .map_err(|e| XpenseError::Remote(format!("Failed to append to sheet: {}", e)))
    }
}
