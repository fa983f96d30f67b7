//! Custom error types for xpense
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for xpense operations
#[derive(Error, Debug)]
pub enum XpenseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// The wallet registry must keep at least one wallet
    #[error("Cannot remove the last wallet")]
    LastWallet,

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Remote sheet read/append failures
    #[error("Remote store error: {0}")]
    Remote(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Failures from the expense extraction collaborator
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// A sync run is already in flight
    #[error("A sync is already in progress")]
    SyncInProgress,

    /// No remote identity is connected
    #[error("Not connected to a remote sheet")]
    NotConnected,
}

impl XpenseError {
    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for wallets
    pub fn wallet_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Wallet",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for XpenseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for XpenseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for XpenseError {
    fn from(err: csv::Error) -> Self {
        Self::Remote(err.to_string())
    }
}

/// Result type alias for xpense operations
pub type XpenseResult<T> = Result<T, XpenseError>;
