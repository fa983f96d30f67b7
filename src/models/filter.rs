//! Date filter specification
//!
//! A transient description of the time window the expense list is viewed
//! through. Never persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Time window kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DateFilterKind {
    All,
    Today,
    Yesterday,
    #[serde(alias = "this_week")]
    Week,
    LastWeek,
    #[default]
    #[serde(alias = "this_month")]
    Month,
    LastMonth,
    Custom,
}

impl DateFilterKind {
    /// Parse a filter kind; unrecognized names fall back to `All`
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "today" => Self::Today,
            "yesterday" => Self::Yesterday,
            "week" | "this_week" => Self::Week,
            "last_week" => Self::LastWeek,
            "month" | "this_month" => Self::Month,
            "last_month" => Self::LastMonth,
            "custom" => Self::Custom,
            _ => Self::All,
        }
    }
}

impl fmt::Display for DateFilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::All => "All time",
            Self::Today => "Today",
            Self::Yesterday => "Yesterday",
            Self::Week => "This week",
            Self::LastWeek => "Last week",
            Self::Month => "This month",
            Self::LastMonth => "Last month",
            Self::Custom => "Custom range",
        };
        write!(f, "{}", label)
    }
}

/// Filter applied by the view engine
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateFilter {
    pub kind: DateFilterKind,

    /// Inclusive start day (custom only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,

    /// Inclusive end day (custom only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
}

impl DateFilter {
    pub fn new(kind: DateFilterKind) -> Self {
        Self {
            kind,
            start: None,
            end: None,
        }
    }

    pub fn all() -> Self {
        Self::new(DateFilterKind::All)
    }

    /// Inclusive custom range
    pub fn custom(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            kind: DateFilterKind::Custom,
            start: Some(start),
            end: Some(end),
        }
    }
}
