//! xpense - local-first expense tracking
//!
//! This library keeps a durable list of expenses and payment wallets, derives
//! date-windowed views of it, and reconciles it with a remote expense sheet
//! without creating duplicates or touching local edits.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Paths and user settings
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, wallets, amounts, date filters)
//! - `storage`: JSON file storage layer
//! - `services`: Business logic (capture, views, sync, summaries)
//! - `remote`: Remote session and sheet store
//! - `audit`: Audit logging system
//! - `export`: CSV export of filtered views
//! - `cli`, `display`: Command handlers and terminal formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use xpense::config::{paths::XpensePaths, settings::Settings};
//! use xpense::services::{view::today, ExpenseService};
//! use xpense::storage::Storage;
//!
//! let paths = XpensePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let mut storage = Storage::new(paths)?;
//! storage.load_all()?;
//!
//! let this_month = ExpenseService::new(&storage).list_view(
//!     &Default::default(),
//!     settings.week_start_day,
//!     today(),
//! )?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod remote;
pub mod services;
pub mod storage;

pub use error::{XpenseError, XpenseResult};
