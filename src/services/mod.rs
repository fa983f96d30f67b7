//! Service layer for xpense
//!
//! The service layer provides business logic on top of the storage layer:
//! validation, defaulting, wallet resolution, derived views and the sync
//! with the remote sheet.

pub mod capture;
pub mod expense;
pub mod notice;
pub mod summary;
pub mod sync;
pub mod view;
pub mod wallet;

pub use capture::{
    prepare, Candidate, CaptureOutcome, CaptureService, CaptureSource, ExtractionHints, Extractor,
    JsonFileExtractor,
};
pub use expense::ExpenseService;
pub use notice::Notice;
pub use summary::{summarize, CategoryTotal, SpendingSummary};
pub use sync::{reconcile, AutoSync, Merge, SyncService};
pub use view::view;
pub use wallet::{resolve_wallet, WalletService};
