//! Path management for xpense
//!
//! ## Path Resolution Order
//!
//! 1. `XPENSE_DATA_DIR` environment variable (if set)
//! 2. The platform config directory for `xpense` (via `directories`),
//!    e.g. `~/.config/xpense` on Linux

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::XpenseError;

/// Manages all paths used by xpense
#[derive(Debug, Clone)]
pub struct XpensePaths {
    /// Base directory for all xpense data
    base_dir: PathBuf,
}

impl XpensePaths {
    /// Create a new XpensePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, XpenseError> {
        let base_dir = if let Ok(custom) = std::env::var("XPENSE_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create XpensePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (`<base>/data/`)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to expenses.json
    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    /// Get the path to wallets.json
    pub fn wallets_file(&self) -> PathBuf {
        self.data_dir().join("wallets.json")
    }

    /// Get the path to the persisted remote session
    pub fn session_file(&self) -> PathBuf {
        self.base_dir.join("session.json")
    }

    /// Default location of the CSV sheet used as the remote store
    pub fn default_sheet_file(&self) -> PathBuf {
        self.base_dir.join("xPense_Expenses.csv")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), XpenseError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| XpenseError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| XpenseError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if xpense has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, XpenseError> {
    ProjectDirs::from("", "", "xpense")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| XpenseError::Config("Could not determine a home directory".into()))
}
