//! Amount type for expense values
//!
//! Expenses are currency-agnostic decimals: an amount is whatever unit the
//! user's configured currency uses. Comparisons across sources (local store,
//! remote sheet, extraction service) use an absolute tolerance instead of
//! exact equality.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// Tolerance under which two amounts are considered the same value
pub const AMOUNT_TOLERANCE: f64 = 0.01;

/// A decimal expense amount
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(f64);

impl Amount {
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    pub const fn zero() -> Self {
        Self(0.0)
    }

    pub const fn value(&self) -> f64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0.0
    }

    /// Whether two amounts are within [`AMOUNT_TOLERANCE`] of each other
    pub fn approx_eq(&self, other: Amount) -> bool {
        (self.0 - other.0).abs() < AMOUNT_TOLERANCE
    }

    /// Parse an amount typed by the user
    ///
    /// Accepts formats: "10.50", "-10.50", "10", " 7.5 "
    pub fn parse(s: &str) -> Result<Self, AmountParseError> {
        let trimmed = s.trim();
        let value: f64 = trimmed
            .parse()
            .map_err(|_| AmountParseError::InvalidFormat(trimmed.to_string()))?;

        if !value.is_finite() {
            return Err(AmountParseError::InvalidFormat(trimmed.to_string()));
        }

        Ok(Self(value))
    }

    /// Parse a locale-formatted amount such as "৳1,250.00" or "$ 12.5"
    ///
    /// Every character other than digits, '.' and '-' is discarded first.
    pub fn parse_lenient(s: &str) -> Result<Self, AmountParseError> {
        let cleaned: String = s
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
            .collect();

        if cleaned.is_empty() {
            return Err(AmountParseError::InvalidFormat(s.to_string()));
        }

        Self::parse(&cleaned).map_err(|_| AmountParseError::InvalidFormat(s.to_string()))
    }

    /// Format with a currency symbol or code prefix
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{:.2}", symbol, self.0.abs())
        } else {
            format!("{}{:.2}", symbol, self.0)
        }
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, a| acc + a)
    }
}

/// Error type for amount parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountParseError {
    InvalidFormat(String),
}

impl fmt::Display for AmountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountParseError::InvalidFormat(s) => write!(f, "Invalid amount format: {}", s),
        }
    }
}

impl std::error::Error for AmountParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Amount::new(10.5).to_string(), "10.50");
        assert_eq!(Amount::zero().to_string(), "0.00");
        assert_eq!(Amount::new(12.5).format_with_symbol("$"), "$12.50");
        assert_eq!(Amount::new(-3.0).format_with_symbol("€"), "-€3.00");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Amount::parse("10.50").unwrap(), Amount::new(10.5));
        assert_eq!(Amount::parse(" 7 ").unwrap(), Amount::new(7.0));
        assert_eq!(Amount::parse("-2.25").unwrap(), Amount::new(-2.25));
        assert!(Amount::parse("abc").is_err());
        assert!(Amount::parse("NaN").is_err());
        assert!(Amount::parse("").is_err());
    }

    #[test]
    fn test_parse_lenient_strips_symbols() {
        assert_eq!(Amount::parse_lenient("৳1,250.00").unwrap(), Amount::new(1250.0));
        assert_eq!(Amount::parse_lenient("$ 12.5").unwrap(), Amount::new(12.5));
        assert_eq!(Amount::parse_lenient("45").unwrap(), Amount::new(45.0));
        assert!(Amount::parse_lenient("n/a").is_err());
        assert!(Amount::parse_lenient("1.2.3").is_err());
    }

    #[test]
    fn test_approx_eq() {
        assert!(Amount::new(12.50).approx_eq(Amount::new(12.505)));
        assert!(!Amount::new(12.50).approx_eq(Amount::new(12.52)));
        assert!(!Amount::new(12.50).approx_eq(Amount::new(13.50)));
    }

    #[test]
    fn test_sum() {
        let total: Amount = vec![Amount::new(1.25), Amount::new(2.5), Amount::new(3.0)]
            .into_iter()
            .sum();
        assert!(total.approx_eq(Amount::new(6.75)));
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Amount::new(12.5)).unwrap();
        assert_eq!(json, "12.5");

        let deserialized: Amount = serde_json::from_str("8").unwrap();
        assert_eq!(deserialized, Amount::new(8.0));
    }
}
