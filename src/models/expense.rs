//! Expense model
//!
//! A single logged purchase. Dates are kept as the ISO-8601 text the capture
//! pathway produced; only the calendar-day part is used for filtering and
//! duplicate detection.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::amount::Amount;
use super::ids::{ExpenseId, WalletId};

/// Category used when a capture pathway supplies none
pub const DEFAULT_CATEGORY: &str = "Other";

/// Description used when nothing better is known
pub const DEFAULT_DESCRIPTION: &str = "Expense";

/// ISO-8601 date or timestamp of an expense
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseDate(String);

impl ExpenseDate {
    /// Wrap raw date text without validating it
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_string())
    }

    pub fn from_day(day: NaiveDate) -> Self {
        Self(day.format("%Y-%m-%d").to_string())
    }

    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self(at.to_rfc3339())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The date text with any time-of-day part removed
    pub fn day_key(&self) -> &str {
        self.0
            .split(|c: char| c == 'T' || c.is_whitespace())
            .next()
            .unwrap_or("")
    }

    /// Calendar day, or `None` when the text is not a valid date
    pub fn day(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.day_key(), "%Y-%m-%d").ok()
    }

    /// Point in time used for ordering
    ///
    /// Values with an offset are converted to UTC; values without one are
    /// taken as written, and date-only values mean midnight.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        if let Ok(at) = DateTime::parse_from_rfc3339(&self.0) {
            return Some(at.naive_utc());
        }
        if let Ok(at) = NaiveDateTime::parse_from_str(&self.0, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(at);
        }
        self.day().and_then(|d| d.and_hms_opt(0, 0, 0))
    }

    pub fn is_valid(&self) -> bool {
        self.day().is_some()
    }
}

impl fmt::Display for ExpenseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<NaiveDate> for ExpenseDate {
    fn from(day: NaiveDate) -> Self {
        Self::from_day(day)
    }
}

/// A logged purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,

    pub amount: Amount,

    #[serde(default = "default_category")]
    pub category: String,

    #[serde(default)]
    pub description: String,

    pub date: ExpenseDate,

    /// Wallet the expense was paid from
    #[serde(default)]
    pub wallet_id: Option<WalletId>,

    /// When the record was created (tie-breaking and audit only)
    pub created_at: DateTime<Utc>,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Expense {
    /// Materialize a new expense with a fresh ID and creation time
    pub fn from_new(input: NewExpense, wallet_id: WalletId) -> Self {
        Self {
            id: ExpenseId::new(),
            amount: input.amount,
            category: input.category,
            description: input.description,
            date: input.date,
            wallet_id: Some(wallet_id),
            created_at: Utc::now(),
        }
    }

    pub fn day(&self) -> Option<NaiveDate> {
        self.date.day()
    }

    /// Whether `other` describes the same purchase
    ///
    /// Same calendar day (date text before the time part), amounts within
    /// tolerance, and case-insensitive equal descriptions. Category and
    /// wallet are not compared.
    pub fn is_duplicate_of(&self, other: &Expense) -> bool {
        self.date.day_key() == other.date.day_key()
            && self.amount.approx_eq(other.amount)
            && self.description.to_lowercase() == other.description.to_lowercase()
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}] {}",
            self.date.day_key(),
            self.description,
            self.category,
            self.amount
        )
    }
}

/// An expense that has not been stored yet (no ID, no creation time)
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub amount: Amount,
    pub category: String,
    pub description: String,
    pub date: ExpenseDate,
    /// Unset means the default wallet
    pub wallet_id: Option<WalletId>,
}

impl NewExpense {
    pub fn new(amount: Amount, date: impl Into<ExpenseDate>) -> Self {
        Self {
            amount,
            category: DEFAULT_CATEGORY.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            date: date.into(),
            wallet_id: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_wallet(mut self, wallet_id: WalletId) -> Self {
        self.wallet_id = Some(wallet_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_day_key() {
        assert_eq!(ExpenseDate::new("2024-05-01T09:00:00Z").day_key(), "2024-05-01");
        assert_eq!(ExpenseDate::new("2024-05-01").day_key(), "2024-05-01");
        assert_eq!(ExpenseDate::new("2024-05-01 18:30").day_key(), "2024-05-01");
    }

    #[test]
    fn test_date_parsing() {
        assert_eq!(ExpenseDate::new("2024-05-01T23:30:00+06:00").day(), Some(day(2024, 5, 1)));
        assert_eq!(ExpenseDate::from_day(day(2024, 2, 29)).day(), Some(day(2024, 2, 29)));
        assert!(ExpenseDate::new("yesterday-ish").day().is_none());
        assert!(!ExpenseDate::new("2024-13-40").is_valid());
    }

    #[test]
    fn test_timestamp_orders_within_a_day() {
        let morning = ExpenseDate::new("2024-05-01T08:00:00Z").timestamp().unwrap();
        let evening = ExpenseDate::new("2024-05-01T20:00:00.123").timestamp().unwrap();
        let date_only = ExpenseDate::new("2024-05-01").timestamp().unwrap();
        assert!(date_only < morning);
        assert!(morning < evening);
    }

    #[test]
    fn test_timestamp_respects_offset() {
        // 23:00 at -05:00 is 04:00 UTC the next day
        let late_in_new_york = ExpenseDate::new("2024-05-01T23:00:00-05:00").timestamp().unwrap();
        let early_utc = ExpenseDate::new("2024-05-02T01:00:00Z").timestamp().unwrap();

        assert!(early_utc < late_in_new_york);
        assert_eq!(late_in_new_york, day(2024, 5, 2).and_hms_opt(4, 0, 0).unwrap());
    }

    #[test]
    fn test_from_new_assigns_identity() {
        let wallet = WalletId::new();
        let input = NewExpense::new(Amount::new(4.5), day(2024, 5, 1))
            .with_category("Food")
            .with_description("Tea");

        let a = Expense::from_new(input.clone(), wallet);
        let b = Expense::from_new(input, wallet);

        assert_ne!(a.id, b.id);
        assert_eq!(a.wallet_id, Some(wallet));
        assert_eq!(a.category, "Food");
    }

    #[test]
    fn test_new_expense_defaults() {
        let input = NewExpense::new(Amount::new(1.0), day(2024, 5, 1));
        assert_eq!(input.category, "Other");
        assert_eq!(input.description, "Expense");
        assert!(input.wallet_id.is_none());
    }

    #[test]
    fn test_duplicate_detection() {
        let wallet = WalletId::new();
        let local = Expense::from_new(
            NewExpense::new(Amount::new(12.50), day(2024, 5, 1)).with_description("Coffee"),
            wallet,
        );
        let mut remote = Expense::from_new(
            NewExpense::new(Amount::new(12.505), ExpenseDate::new("2024-05-01T09:00:00Z"))
                .with_description("coffee")
                .with_category("Drinks"),
            WalletId::new(),
        );
        assert!(remote.is_duplicate_of(&local));

        remote.amount = Amount::new(12.60);
        assert!(!remote.is_duplicate_of(&local));

        remote.amount = Amount::new(12.50);
        remote.description = "Coffee beans".into();
        assert!(!remote.is_duplicate_of(&local));
    }

    #[test]
    fn test_missing_category_defaults_on_load() {
        let json = format!(
            r#"{{"id":"{}","amount":3.0,"description":"x","date":"2024-05-01","created_at":"2024-05-01T00:00:00Z"}}"#,
            uuid::Uuid::new_v4()
        );
        let expense: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(expense.category, "Other");
        assert!(expense.wallet_id.is_none());
    }
}
