//! Storage layer for spendboard
//!
//! Holds the expense and user collections in memory for the lifetime of a
//! session and routes mutations to the optional audit trail. Records can be
//! seeded from the sample ledger or loaded from a JSON or CSV file; nothing
//! is written back.

pub mod expenses;
pub mod file_io;
pub mod sample;
pub mod users;

pub use expenses::ExpenseRepository;
pub use file_io::read_expenses;
pub use users::UserRepository;

use std::path::Path;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::error::SpendResult;
use crate::models::Expense;

/// Main storage coordinator that provides access to all repositories
#[derive(Debug, Default)]
pub struct Storage {
    pub expenses: ExpenseRepository,
    pub users: UserRepository,
    audit: Option<AuditLogger>,
}

impl Storage {
    /// Empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage seeded with the given expenses
    pub fn with_expenses(expenses: Vec<Expense>) -> SpendResult<Self> {
        Ok(Self {
            expenses: ExpenseRepository::from_records(expenses)?,
            ..Self::default()
        })
    }

    /// Storage seeded with the sample ledger
    pub fn from_sample() -> SpendResult<Self> {
        Self::with_expenses(sample::sample_expenses()?)
    }

    /// Storage seeded from a JSON or CSV expense file
    pub fn from_file<P: AsRef<Path>>(path: P) -> SpendResult<Self> {
        Self::with_expenses(read_expenses(path)?)
    }

    /// Record creates and deletes in the given audit log
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn audit(&self) -> Option<&AuditLogger> {
        self.audit.as_ref()
    }

    /// Log a create operation to the audit trail, if one is attached
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> SpendResult<()> {
        match &self.audit {
            Some(logger) => logger.log(&AuditEntry::create(
                entity_type,
                entity_id,
                entity_name,
                entity,
            )),
            None => Ok(()),
        }
    }

    /// Log a delete operation to the audit trail, if one is attached
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> SpendResult<()> {
        match &self.audit {
            Some(logger) => logger.log(&AuditEntry::delete(
                entity_type,
                entity_id,
                entity_name,
                entity,
            )),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use tempfile::TempDir;

    #[test]
    fn test_from_sample() {
        let storage = Storage::from_sample().unwrap();
        assert_eq!(storage.expenses.len(), 6);
        assert!(storage.users.is_empty());
        assert!(storage.audit().is_none());
    }

    #[test]
    fn test_logging_without_audit_is_noop() {
        let storage = Storage::new();
        storage
            .log_create(EntityType::Expense, "1", None, &"anything")
            .unwrap();
    }

    #[test]
    fn test_logging_with_audit() {
        let temp_dir = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp_dir.path().join("audit.log"));
        let storage = Storage::from_sample().unwrap().with_audit(logger);

        let expense = storage.expenses.all()[0].clone();
        storage
            .log_delete(EntityType::Expense, expense.id.as_str(), Some(expense.label()), &expense)
            .unwrap();

        let entries = storage.audit().unwrap().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].operation, Operation::Delete);
        assert_eq!(entries[0].entity_id, "1");
    }
}
