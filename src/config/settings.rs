//! User settings for xpense
//!
//! A single record holding currency, theme, capture toggles, the monthly
//! spending limit and the week-start convention. It is persisted whole on
//! every change.

use std::fmt;

use chrono::{Datelike, Weekday};
use serde::{Deserialize, Serialize};

use super::paths::XpensePaths;
use crate::error::XpenseError;
use crate::models::Amount;
use crate::storage::write_json_atomic;

/// Color theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Interface language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
    Bn,
    Hi,
}

impl Language {
    /// Parse a language code
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" => Some(Self::En),
            "es" => Some(Self::Es),
            "fr" => Some(Self::Fr),
            "bn" => Some(Self::Bn),
            "hi" => Some(Self::Hi),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
            Self::Fr => "fr",
            Self::Bn => "bn",
            Self::Hi => "hi",
        }
    }
}

/// First day of the week, used by the week filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    /// Number of days between the start of the week and `weekday`
    pub fn days_since_start(&self, weekday: Weekday) -> i64 {
        match self {
            Self::Sunday => weekday.num_days_from_sunday() as i64,
            Self::Monday => weekday.num_days_from_monday() as i64,
        }
    }

    /// Start of the week containing `day`
    pub fn week_start_of(&self, day: chrono::NaiveDate) -> chrono::NaiveDate {
        day - chrono::Duration::days(self.days_since_start(day.weekday()))
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "sunday" | "sun" => Some(Self::Sunday),
            "monday" | "mon" => Some(Self::Monday),
            _ => None,
        }
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sunday => write!(f, "sunday"),
            Self::Monday => write!(f, "monday"),
        }
    }
}

/// User settings for xpense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// ISO currency code shown next to amounts
    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default)]
    pub theme: Theme,

    /// Show the photo capture entry point
    #[serde(default)]
    pub show_camera: bool,

    /// Show the manual entry form
    #[serde(default = "default_true")]
    pub show_manual_entry: bool,

    /// Monthly spending limit (0 disables the limit)
    #[serde(default)]
    pub spending_limit: Amount,

    #[serde(default)]
    pub travel_mode: bool,

    #[serde(default)]
    pub language: Language,

    #[serde(default)]
    pub week_start_day: WeekStart,

    /// Set once `init` has completed
    #[serde(default)]
    pub onboarding_completed: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "BDT".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency: default_currency(),
            theme: Theme::default(),
            show_camera: false,
            show_manual_entry: true,
            spending_limit: Amount::zero(),
            travel_mode: false,
            language: Language::default(),
            week_start_day: WeekStart::default(),
            onboarding_completed: false,
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &XpensePaths) -> Result<Self, XpenseError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| XpenseError::Io(format!("Failed to read settings file: {}", e)))?;

        Self::from_json(&contents)
    }

    /// Parse a settings document, applying legacy field migrations
    pub fn from_json(contents: &str) -> Result<Self, XpenseError> {
        let mut raw: serde_json::Value = serde_json::from_str(contents)
            .map_err(|e| XpenseError::Config(format!("Failed to parse settings file: {}", e)))?;

        // Older files only had the manual-entry toggle; the camera toggle followed it.
        if let Some(obj) = raw.as_object_mut() {
            if !obj.contains_key("show_camera") {
                if let Some(manual) = obj.get("show_manual_entry").cloned() {
                    obj.insert("show_camera".to_string(), manual);
                }
            }
        }

        serde_json::from_value(raw)
            .map_err(|e| XpenseError::Config(format!("Failed to parse settings file: {}", e)))
    }

    /// Save settings to disk, replacing the file atomically
    pub fn save(&self, paths: &XpensePaths) -> Result<(), XpenseError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Set a single field by name from its string form
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), XpenseError> {
        let invalid = |expected: &str| {
            XpenseError::Validation(format!(
                "Invalid value '{}' for '{}': expected {}",
                value, key, expected
            ))
        };

        match key {
            "currency" => {
                let code = value.trim().to_uppercase();
                if code.is_empty() {
                    return Err(invalid("a currency code"));
                }
                self.currency = code;
            }
            "theme" => {
                self.theme = match value.trim().to_lowercase().as_str() {
                    "light" => Theme::Light,
                    "dark" => Theme::Dark,
                    _ => return Err(invalid("light or dark")),
                };
            }
            "show_camera" => self.show_camera = parse_bool(value).ok_or_else(|| invalid("true or false"))?,
            "show_manual_entry" => {
                self.show_manual_entry = parse_bool(value).ok_or_else(|| invalid("true or false"))?
            }
            "travel_mode" => self.travel_mode = parse_bool(value).ok_or_else(|| invalid("true or false"))?,
            "spending_limit" => {
                let limit = Amount::parse(value).map_err(|_| invalid("a non-negative number"))?;
                if limit.is_negative() {
                    return Err(invalid("a non-negative number"));
                }
                self.spending_limit = limit;
            }
            "language" => {
                self.language = Language::parse(value).ok_or_else(|| invalid("en, es, fr, bn or hi"))?
            }
            "week_start_day" => {
                self.week_start_day = WeekStart::parse(value).ok_or_else(|| invalid("sunday or monday"))?
            }
            _ => return Err(XpenseError::Config(format!("Unknown setting: {}", key))),
        }

        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency, "BDT");
        assert_eq!(settings.week_start_day, WeekStart::Sunday);
        assert!(settings.show_manual_entry);
        assert!(!settings.show_camera);
        assert!(settings.spending_limit.is_zero());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = XpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.week_start_day = WeekStart::Monday;
        settings.theme = Theme::Dark;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_failed_save_keeps_previous_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = XpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.currency = "EUR".into();
        settings.save(&paths).unwrap();
        assert!(!temp_dir.path().join("config.json.tmp").exists());

        // A directory in the temp file's place makes the write fail
        std::fs::create_dir_all(temp_dir.path().join("config.json.tmp")).unwrap();
        settings.currency = "USD".into();
        assert!(settings.save(&paths).is_err());

        assert_eq!(Settings::load_or_create(&paths).unwrap().currency, "EUR");
    }

    #[test]
    fn test_legacy_manual_entry_migrates_to_camera() {
        let settings = Settings::from_json(r#"{"currency": "USD", "show_manual_entry": true}"#).unwrap();
        assert!(settings.show_camera);
        assert_eq!(settings.currency, "USD");
        assert_eq!(settings.language, Language::En);
    }

    #[test]
    fn test_explicit_camera_flag_is_kept() {
        let settings =
            Settings::from_json(r#"{"show_manual_entry": true, "show_camera": false}"#).unwrap();
        assert!(!settings.show_camera);
    }

    #[test]
    fn test_set_fields() {
        let mut settings = Settings::default();
        settings.set("week_start_day", "Monday").unwrap();
        settings.set("spending_limit", "500").unwrap();
        settings.set("currency", "usd").unwrap();

        assert_eq!(settings.week_start_day, WeekStart::Monday);
        assert_eq!(settings.spending_limit, Amount::new(500.0));
        assert_eq!(settings.currency, "USD");

        assert!(settings.set("theme", "purple").is_err());
        assert!(settings.set("spending_limit", "-5").is_err());
        assert!(settings.set("nope", "x").is_err());
    }

    #[test]
    fn test_week_start_distance() {
        // 2024-05-15 is a Wednesday
        let wednesday = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        assert_eq!(
            WeekStart::Monday.week_start_of(wednesday),
            NaiveDate::from_ymd_opt(2024, 5, 13).unwrap()
        );
        assert_eq!(
            WeekStart::Sunday.week_start_of(wednesday),
            NaiveDate::from_ymd_opt(2024, 5, 12).unwrap()
        );

        // Sunday is the last day of a Monday-start week
        let sunday = NaiveDate::from_ymd_opt(2024, 5, 19).unwrap();
        assert_eq!(WeekStart::Monday.days_since_start(sunday.weekday()), 6);
        assert_eq!(WeekStart::Sunday.days_since_start(sunday.weekday()), 0);
    }
}
