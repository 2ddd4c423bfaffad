//! CSV export
//!
//! Ledger rows and summary figures in spreadsheet-friendly CSV.

use std::io::Write;

use serde::Serialize;

use crate::error::{SpendError, SpendResult};
use crate::models::Expense;
use crate::reports::ExpenseSummary;

/// Flat CSV row; every column is always present
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExpenseCsvRow<'a> {
    id: &'a str,
    date: String,
    price: String,
    currency: &'a str,
    #[serde(rename = "type")]
    expense_type: &'a str,
    category: &'a str,
    subcategory: &'a str,
    account: &'a str,
    created_by: &'a str,
    description: &'a str,
    created_at: String,
}

impl<'a> From<&'a Expense> for ExpenseCsvRow<'a> {
    fn from(expense: &'a Expense) -> Self {
        Self {
            id: expense.id.as_str(),
            date: expense.date.to_string(),
            price: expense.price.to_string(),
            currency: expense.currency.code(),
            expense_type: &expense.expense_type,
            category: &expense.category,
            subcategory: &expense.subcategory,
            account: &expense.account,
            created_by: &expense.created_by,
            description: expense.description.as_deref().unwrap_or(""),
            created_at: expense.created_at.to_rfc3339(),
        }
    }
}

/// Export expenses to CSV. The header matches what `--data` accepts, so an
/// export can be loaded back.
pub fn export_expenses_csv<W: Write>(expenses: &[&Expense], writer: W) -> SpendResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for expense in expenses {
        csv_writer
            .serialize(ExpenseCsvRow::from(*expense))
            .map_err(|e| SpendError::Export(e.to_string()))?;
    }
    csv_writer
        .flush()
        .map_err(|e| SpendError::Export(e.to_string()))?;
    Ok(())
}

/// Export summary figures to CSV
pub fn export_summary_csv<W: Write>(summary: &ExpenseSummary, writer: W) -> SpendResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(["Count", "Total", "Average"])
        .map_err(|e| SpendError::Export(e.to_string()))?;
    csv_writer
        .write_record([
            summary.count.to_string(),
            summary.total.to_string(),
            summary.average.to_string(),
        ])
        .map_err(|e| SpendError::Export(e.to_string()))?;
    csv_writer
        .flush()
        .map_err(|e| SpendError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::file_io::read_expenses_csv;
    use crate::storage::sample::sample_expenses;

    #[test]
    fn test_export_expenses_csv() {
        let expenses = sample_expenses().unwrap();
        let refs: Vec<&Expense> = expenses.iter().collect();

        let mut out = Vec::new();
        export_expenses_csv(&refs, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "id,date,price,currency,type,category,subcategory,account,createdBy,description,createdAt"
        );
        assert!(lines.next().unwrap().starts_with("1,2024-12-15,85.50,EUR,Business,Food"));
        assert_eq!(text.lines().count(), 7);
    }

    #[test]
    fn test_exported_csv_loads_back() {
        let expenses = sample_expenses().unwrap();
        let refs: Vec<&Expense> = expenses.iter().collect();

        let mut out = Vec::new();
        export_expenses_csv(&refs, &mut out).unwrap();
        let loaded = read_expenses_csv(out.as_slice()).unwrap();

        assert_eq!(loaded, expenses);
    }

    #[test]
    fn test_export_summary_csv() {
        let expenses = sample_expenses().unwrap();
        let summary = ExpenseSummary::from_expenses(&expenses);

        let mut out = Vec::new();
        export_summary_csv(&summary, &mut out).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Count,Total,Average\n6,1868.50,311.42\n"
        );
    }
}
