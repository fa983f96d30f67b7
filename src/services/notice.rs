//! One-shot user-facing notices

use std::fmt;

use crate::error::XpenseError;

/// Short messages shown once after an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    NoExpensesDetected,
    ProcessingFailed,
    SyncFailed,
    CannotRemoveLastWallet,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Self::NoExpensesDetected => "No expenses detected. Please try again.",
            Self::ProcessingFailed => "Failed to process the input. Please try again.",
            Self::SyncFailed => "Failed to sync data from the remote sheet.",
            Self::CannotRemoveLastWallet => "You must have at least one wallet.",
        }
    }

    /// The notice an error surfaces as, if any
    pub fn from_error(err: &XpenseError) -> Option<Self> {
        match err {
            XpenseError::LastWallet => Some(Self::CannotRemoveLastWallet),
            XpenseError::Remote(_) => Some(Self::SyncFailed),
            XpenseError::Extraction(_) => Some(Self::ProcessingFailed),
            _ => None,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
