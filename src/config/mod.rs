//! Configuration module for xpense
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::XpensePaths;
pub use settings::{Language, Settings, Theme, WeekStart};
