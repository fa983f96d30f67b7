//! Audit log for xpense
//!
//! Every change to the expense collection, the wallet registry and the
//! settings is appended to `audit.log` as one JSON object per line, together
//! with a record of each sync run against the remote sheet.
//!
//! - `AuditEntry`: one record (timestamp, operation, entity, before/after).
//! - `AuditLogger`: appends entries to the JSONL file and reads them back.
//! - `generate_diff`: top-level field diff used for update entries.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
