//! Wallet model
//!
//! A named payment source expenses are attributed to.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::WalletId;

/// Kind of payment source (label and icon selection only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WalletType {
    #[default]
    Cash,
    Card,
    Bank,
    Digital,
    Other,
}

impl WalletType {
    /// Parse wallet type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Some(Self::Cash),
            "card" | "credit" | "debit" => Some(Self::Card),
            "bank" => Some(Self::Bank),
            "digital" | "mobile" | "ewallet" => Some(Self::Digital),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Short glyph used in listings
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Cash => "💵",
            Self::Card => "💳",
            Self::Bank => "🏦",
            Self::Digital => "📱",
            Self::Other => "👛",
        }
    }
}

impl fmt::Display for WalletType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cash => write!(f, "Cash"),
            Self::Card => write!(f, "Card"),
            Self::Bank => write!(f, "Bank"),
            Self::Digital => write!(f, "Digital"),
            Self::Other => write!(f, "Other"),
        }
    }
}

/// A payment source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: WalletId,

    /// Display name (e.g., "Cash", "Visa card")
    pub name: String,

    #[serde(rename = "type", default)]
    pub wallet_type: WalletType,
}

impl Wallet {
    pub fn new(name: impl Into<String>, wallet_type: WalletType) -> Self {
        Self {
            id: WalletId::new(),
            name: name.into(),
            wallet_type,
        }
    }

    /// The wallet every fresh installation starts with
    pub fn default_cash() -> Self {
        Self::new("Cash", WalletType::Cash)
    }

    /// Loose name match used for free-text wallet hints
    ///
    /// Case-insensitive; true when either name contains the other.
    pub fn matches_hint(&self, hint: &str) -> bool {
        let hint = hint.trim().to_lowercase();
        let name = self.name.to_lowercase();
        !hint.is_empty() && !name.is_empty() && (hint.contains(&name) || name.contains(&hint))
    }

    /// Validate the wallet
    pub fn validate(&self) -> Result<(), WalletValidationError> {
        if self.name.trim().is_empty() {
            return Err(WalletValidationError::EmptyName);
        }
        Ok(())
    }
}

impl fmt::Display for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.wallet_type.icon(), self.name)
    }
}

/// Validation errors for wallets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletValidationError {
    EmptyName,
}

impl fmt::Display for WalletValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Wallet name cannot be empty"),
        }
    }
}

impl std::error::Error for WalletValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_parse() {
        assert_eq!(WalletType::parse("CARD"), Some(WalletType::Card));
        assert_eq!(WalletType::parse("mobile"), Some(WalletType::Digital));
        assert_eq!(WalletType::parse("crypto"), None);
    }

    #[test]
    fn test_matches_hint_both_directions() {
        let wallet = Wallet::new("Card", WalletType::Card);
        assert!(wallet.matches_hint("Visa card"));
        assert!(wallet.matches_hint("CARD"));

        let wallet = Wallet::new("Card Visa", WalletType::Card);
        assert!(wallet.matches_hint("visa"));
        assert!(!wallet.matches_hint("bKash"));
        assert!(!wallet.matches_hint("  "));
    }

    #[test]
    fn test_validate() {
        assert!(Wallet::default_cash().validate().is_ok());
        assert_eq!(
            Wallet::new("   ", WalletType::Other).validate(),
            Err(WalletValidationError::EmptyName)
        );
    }

    #[test]
    fn test_serialization_uses_type_key() {
        let wallet = Wallet::new("bKash", WalletType::Digital);
        let json = serde_json::to_value(&wallet).unwrap();
        assert_eq!(json["type"], "digital");

        let back: Wallet = serde_json::from_value(json).unwrap();
        assert_eq!(back, wallet);
    }
}
