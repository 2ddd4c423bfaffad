//! Audit trail for spendboard
//!
//! Records every expense and user that is created or deleted in an
//! append-only, line-delimited JSON log.
//!
//! - `AuditEntry`: one logged operation with the entity before or after it.
//! - `AuditLogger`: appends entries to the log file and reads them back.
//!
//! # Example
//!
//! ```rust,ignore
//! use spendboard::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! let entry = AuditEntry::create(
//!     EntityType::Expense,
//!     expense.id.as_str(),
//!     Some(expense.label()),
//!     &expense,
//! );
//! logger.log(&entry)?;
//! ```

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
