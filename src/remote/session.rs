//! Remote identity handling
//!
//! The signed-in remote identity is held by a `RemoteSession` value and
//! persisted next to the settings, so each command sees the same session.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::paths::XpensePaths;
use crate::error::{XpenseError, XpenseResult};
use crate::services::sync::AutoSync;
use crate::storage::{read_json, write_json_atomic};

/// The account the remote sheet belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteIdentity {
    pub account: String,

    /// Sheet location; the default sheet file when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet: Option<PathBuf>,

    pub connected_at: DateTime<Utc>,
}

/// Connection state for the remote sheet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteSession {
    #[serde(default)]
    identity: Option<RemoteIdentity>,

    /// Auto-sync latch for the current identity
    #[serde(default)]
    pub auto_sync: AutoSync,
}

impl RemoteSession {
    /// Load the persisted session (disconnected when none was saved)
    pub fn load(paths: &XpensePaths) -> XpenseResult<Self> {
        read_json(paths.session_file())
    }

    pub fn save(&self, paths: &XpensePaths) -> XpenseResult<()> {
        write_json_atomic(paths.session_file(), self)
    }

    /// Acquire a remote identity, replacing any previous one
    pub fn connect(&mut self, account: &str, sheet: Option<PathBuf>) -> XpenseResult<&RemoteIdentity> {
        let account = account.trim();
        if account.is_empty() {
            return Err(XpenseError::Validation("Account name cannot be empty".into()));
        }

        self.auto_sync = AutoSync::default();
        Ok(self.identity.insert(RemoteIdentity {
            account: account.to_string(),
            sheet,
            connected_at: Utc::now(),
        }))
    }

    /// Drop the identity, returning it if there was one
    pub fn disconnect(&mut self) -> Option<RemoteIdentity> {
        self.auto_sync = AutoSync::default();
        self.identity.take()
    }

    pub fn identity(&self) -> Option<&RemoteIdentity> {
        self.identity.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.identity.is_some()
    }

    /// The identity, or [`XpenseError::NotConnected`]
    pub fn require(&self) -> XpenseResult<&RemoteIdentity> {
        self.identity.as_ref().ok_or(XpenseError::NotConnected)
    }

    /// Where the connected identity's sheet lives
    pub fn sheet_path(&self, paths: &XpensePaths) -> XpenseResult<PathBuf> {
        let identity = self.require()?;
        Ok(identity
            .sheet
            .clone()
            .unwrap_or_else(|| paths.default_sheet_file()))
    }
}
