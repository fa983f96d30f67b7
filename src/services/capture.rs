//! Capture pipeline
//!
//! Turns the candidate list produced by the extraction service (from voice,
//! a receipt photo or typed text) into stored expenses. The extraction
//! service itself sits behind the [`Extractor`] trait.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::settings::{Language, Settings};
use crate::error::{XpenseError, XpenseResult};
use crate::models::{Amount, Expense, ExpenseDate, NewExpense, Wallet, DEFAULT_CATEGORY};
use crate::storage::Storage;

use super::expense::ExpenseService;
use super::notice::Notice;
use super::wallet::resolve_wallet;

/// One expense tuple as returned by the extraction service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub amount: Amount,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// ISO-8601 date or timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Free-text wallet name ("paid with my visa")
    #[serde(default, alias = "wallet_name", skip_serializing_if = "Option::is_none")]
    pub wallet: Option<String>,
}

impl Candidate {
    pub fn new(amount: Amount) -> Self {
        Self {
            amount,
            category: None,
            description: None,
            date: None,
            wallet: None,
        }
    }
}

/// Where a capture came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureSource {
    Voice,
    Photo,
    Text,
    Manual,
}

impl CaptureSource {
    /// Description used when the candidate carries none
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Voice => "Voice Entry",
            Self::Photo => "Receipt",
            Self::Text | Self::Manual => "Expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "voice" | "audio" => Some(Self::Voice),
            "photo" | "image" | "receipt" => Some(Self::Photo),
            "text" => Some(Self::Text),
            "manual" => Some(Self::Manual),
            _ => None,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Normalize candidates into insertable expenses
///
/// Candidates with a non-positive amount are dropped. Blank categories,
/// descriptions and dates take their defaults (`today` for the date), and
/// the wallet hint is resolved against `wallets`.
pub fn prepare(
    candidates: Vec<Candidate>,
    source: CaptureSource,
    wallets: &[Wallet],
    today: NaiveDate,
) -> Vec<NewExpense> {
    candidates
        .into_iter()
        .filter(|c| c.amount.is_positive())
        .map(|c| {
            let date = non_blank(c.date.as_deref())
                .map(ExpenseDate::new)
                .unwrap_or_else(|| ExpenseDate::from_day(today));

            let mut item = NewExpense::new(c.amount, date)
                .with_category(non_blank(c.category.as_deref()).unwrap_or(DEFAULT_CATEGORY))
                .with_description(non_blank(c.description.as_deref()).unwrap_or(source.placeholder()));

            if let Some(wallet) = resolve_wallet(wallets, c.wallet.as_deref()) {
                item = item.with_wallet(wallet.id);
            }
            item
        })
        .collect()
}

/// Context handed to the extraction service
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionHints {
    pub currency: String,
    pub language: Language,
    pub wallet_names: Vec<String>,
}

impl ExtractionHints {
    pub fn new(settings: &Settings, wallets: &[Wallet]) -> Self {
        Self {
            currency: settings.currency.clone(),
            language: settings.language,
            wallet_names: wallets.iter().map(|w| w.name.clone()).collect(),
        }
    }
}

/// The natural-language / vision extraction collaborator
pub trait Extractor {
    /// Turn an input (text, or a reference to captured media) into candidates
    fn extract(&self, input: &str, hints: &ExtractionHints) -> XpenseResult<Vec<Candidate>>;
}

/// Reads an already-extracted candidate list from a JSON file
///
/// Accepts either a bare array or an object with an `expenses` array.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFileExtractor;

#[derive(Deserialize)]
#[serde(untagged)]
enum CandidateFile {
    List(Vec<Candidate>),
    Wrapped { expenses: Vec<Candidate> },
}

impl Extractor for JsonFileExtractor {
    fn extract(&self, input: &str, _hints: &ExtractionHints) -> XpenseResult<Vec<Candidate>> {
        let path = Path::new(input);
        let contents = std::fs::read_to_string(path).map_err(|e| {
            XpenseError::Extraction(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let parsed: CandidateFile = serde_json::from_str(&contents).map_err(|e| {
            XpenseError::Extraction(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        Ok(match parsed {
            CandidateFile::List(list) => list,
            CandidateFile::Wrapped { expenses } => expenses,
        })
    }
}

/// Result of a capture attempt
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    Saved(Vec<Expense>),
    Notice(Notice),
}

/// Runs candidates through `prepare` and into the expense store
pub struct CaptureService<'a> {
    storage: &'a Storage,
}

impl<'a> CaptureService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Extract and store expenses from one input
    ///
    /// Extraction failures become [`Notice::ProcessingFailed`] and leave the
    /// store untouched; storage failures are returned as errors.
    pub fn capture(
        &self,
        extractor: &dyn Extractor,
        input: &str,
        source: CaptureSource,
        settings: &Settings,
        today: NaiveDate,
    ) -> XpenseResult<CaptureOutcome> {
        let wallets = self.storage.wallets.get_all()?;
        let hints = ExtractionHints::new(settings, &wallets);

        match extractor.extract(input, &hints) {
            Ok(candidates) => self.record(candidates, source, today),
            Err(XpenseError::Extraction(_)) => Ok(CaptureOutcome::Notice(Notice::ProcessingFailed)),
            Err(e) => Err(e),
        }
    }

    /// Store candidates that were obtained without extraction
    pub fn record(
        &self,
        candidates: Vec<Candidate>,
        source: CaptureSource,
        today: NaiveDate,
    ) -> XpenseResult<CaptureOutcome> {
        let wallets = self.storage.wallets.get_all()?;
        let items = prepare(candidates, source, &wallets, today);
        if items.is_empty() {
            return Ok(CaptureOutcome::Notice(Notice::NoExpensesDetected));
        }

        let saved = ExpenseService::new(self.storage).insert_many(items)?;
        Ok(CaptureOutcome::Saved(saved))
    }
}
