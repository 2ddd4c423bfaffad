//! JSON export

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{SpendError, SpendResult};
use crate::models::Expense;
use crate::reports::ExpenseSummary;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Filtered ledger export with metadata
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseExport<'a> {
    pub schema_version: &'static str,
    pub exported_at: DateTime<Utc>,
    pub app_version: &'static str,
    /// Active filters, as text
    pub filters: String,
    pub summary: ExpenseSummary,
    pub expenses: Vec<&'a Expense>,
}

impl<'a> ExpenseExport<'a> {
    pub fn new(filters: impl Into<String>, expenses: &[&'a Expense]) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION"),
            filters: filters.into(),
            summary: ExpenseSummary::from_expenses(expenses.iter().copied()),
            expenses: expenses.to_vec(),
        }
    }
}

/// Write any serializable value as pretty-printed JSON
pub fn export_json<T: Serialize, W: Write>(value: &T, mut writer: W) -> SpendResult<()> {
    serde_json::to_writer_pretty(&mut writer, value)
        .map_err(|e| SpendError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| SpendError::Export(e.to_string()))?;
    Ok(())
}
