//! Breakdown report
//!
//! Groups expenses by one categorical field and totals the price of each
//! group, largest first.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

use crate::display::chart::render_bar_chart;
use crate::error::{SpendError, SpendResult};
use crate::models::{Expense, Money};

/// The field expenses are grouped by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum GroupBy {
    #[default]
    Category,
    Account,
    Type,
    Subcategory,
    CreatedBy,
}

impl GroupBy {
    /// The grouping key of an expense
    pub fn key<'a>(&self, expense: &'a Expense) -> &'a str {
        match self {
            Self::Category => &expense.category,
            Self::Account => &expense.account,
            Self::Type => &expense.expense_type,
            Self::Subcategory => &expense.subcategory,
            Self::CreatedBy => &expense.created_by,
        }
    }

    /// Column heading for the key
    pub fn label(&self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Account => "Account",
            Self::Type => "Type",
            Self::Subcategory => "Subcategory",
            Self::CreatedBy => "Created By",
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Category => "category",
            Self::Account => "account",
            Self::Type => "type",
            Self::Subcategory => "subcategory",
            Self::CreatedBy => "created-by",
        };
        f.write_str(name)
    }
}

impl FromStr for GroupBy {
    type Err = SpendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "category" => Ok(Self::Category),
            "account" => Ok(Self::Account),
            "type" => Ok(Self::Type),
            "subcategory" => Ok(Self::Subcategory),
            "created-by" | "createdby" | "user" => Ok(Self::CreatedBy),
            other => Err(SpendError::Validation(format!(
                "Unknown grouping '{}' (expected category, account, type, subcategory or created-by)",
                other
            ))),
        }
    }
}

/// Total spent in one group
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateRow {
    pub key: String,
    #[serde(with = "crate::models::money::decimal")]
    pub total: Money,
    pub count: usize,
}

/// A row together with its share of the largest total
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledRow<'a> {
    pub row: &'a AggregateRow,
    /// `total / max_total`, in `[0, 1]`
    pub share: f64,
}

/// Group expenses and total their prices.
///
/// Rows are ordered by descending total. Groups with equal totals keep the
/// order in which their keys were first encountered in `records`. No input
/// yields no rows.
pub fn aggregate<'a, I>(records: I, group_by: GroupBy) -> Vec<AggregateRow>
where
    I: IntoIterator<Item = &'a Expense>,
{
    let mut rows: Vec<AggregateRow> = Vec::new();
    let mut index: HashMap<&'a str, usize> = HashMap::new();

    for expense in records {
        let key = group_by.key(expense);
        match index.get(key) {
            Some(&i) => {
                rows[i].total += expense.price;
                rows[i].count += 1;
            }
            None => {
                index.insert(key, rows.len());
                rows.push(AggregateRow {
                    key: key.to_string(),
                    total: expense.price,
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable
    rows.sort_by(|a, b| b.total.cmp(&a.total));
    rows
}

/// Largest total among the rows
pub fn max_total(rows: &[AggregateRow]) -> Option<Money> {
    rows.iter().map(|r| r.total).max()
}

/// Each row with its share of the largest total. Empty when there are no
/// rows; every share is 0 when the largest total is 0.
pub fn scale_to_max(rows: &[AggregateRow]) -> Vec<ScaledRow<'_>> {
    let Some(max) = max_total(rows) else {
        return Vec::new();
    };

    rows.iter()
        .map(|row| {
            let share = if max.is_zero() {
                0.0
            } else {
                row.total.cents() as f64 / max.cents() as f64
            };
            ScaledRow { row, share }
        })
        .collect()
}

/// Expenses grouped by one field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breakdown {
    pub group_by: GroupBy,
    pub rows: Vec<AggregateRow>,
}

impl Breakdown {
    pub fn generate<'a, I>(records: I, group_by: GroupBy) -> Self
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        Self {
            group_by,
            rows: aggregate(records, group_by),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn max_total(&self) -> Option<Money> {
        max_total(&self.rows)
    }

    pub fn scaled_rows(&self) -> Vec<ScaledRow<'_>> {
        scale_to_max(&self.rows)
    }

    /// Sum of every group total
    pub fn total(&self) -> Money {
        self.rows.iter().map(|r| r.total).sum()
    }

    /// Format the breakdown as a bar chart for terminal display
    pub fn format_terminal(&self, symbol: &str, width: usize) -> String {
        let title = format!("Expenses by {}", self.group_by.label());
        render_bar_chart(&title, &self.scaled_rows(), symbol, width)
    }

    /// Export the rows to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> SpendResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer
            .write_record([self.group_by.label(), "Total", "Count"])
            .map_err(|e| SpendError::Export(e.to_string()))?;

        for row in &self.rows {
            csv_writer
                .write_record([
                    row.key.clone(),
                    format!("{:.2}", row.total.to_decimal()),
                    row.count.to_string(),
                ])
                .map_err(|e| SpendError::Export(e.to_string()))?;
        }

        csv_writer
            .flush()
            .map_err(|e| SpendError::Export(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::sample::sample_expenses;

    fn keyed(rows: &[AggregateRow]) -> Vec<(&str, i64)> {
        rows.iter().map(|r| (r.key.as_str(), r.total.cents())).collect()
    }

    #[test]
    fn test_aggregate_by_category() {
        let expenses = sample_expenses().unwrap();
        let picked: Vec<&Expense> = expenses
            .iter()
            .filter(|e| ["1", "5", "2"].contains(&e.id.as_str()))
            .collect();

        let rows = aggregate(picked, GroupBy::Category);
        assert_eq!(keyed(&rows), vec![("Transportation", 120000), ("Food", 15330)]);
        assert_eq!(rows[1].count, 2);
    }

    #[test]
    fn test_aggregate_sample_ordering() {
        let expenses = sample_expenses().unwrap();
        let rows = aggregate(&expenses, GroupBy::Category);

        assert_eq!(
            keyed(&rows),
            vec![
                ("Transportation", 120000),
                ("Office", 32000),
                ("Food", 15330),
                ("Marketing", 15000),
                ("Entertainment", 4520),
            ]
        );
    }

    #[test]
    fn test_ties_keep_first_encountered_order() {
        let mut expenses = sample_expenses().unwrap();
        for expense in &mut expenses {
            expense.price = Money::from_cents(1000);
        }

        let rows = aggregate(&expenses, GroupBy::Account);
        let keys: Vec<_> = rows.iter().map(|r| r.key.as_str()).collect();
        let expected: Vec<_> = expenses.iter().map(|e| e.account.as_str()).collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_aggregate_preserves_total() {
        let expenses = sample_expenses().unwrap();
        for group_by in [GroupBy::Category, GroupBy::Account, GroupBy::CreatedBy] {
            let breakdown = Breakdown::generate(&expenses, group_by);
            assert_eq!(breakdown.total().cents(), 186850);
        }
    }

    #[test]
    fn test_empty_input() {
        let rows = aggregate(Vec::<&Expense>::new(), GroupBy::Category);
        assert!(rows.is_empty());
        assert!(scale_to_max(&rows).is_empty());
        assert_eq!(max_total(&rows), None);
    }

    #[test]
    fn test_scaled_rows() {
        let expenses = sample_expenses().unwrap();
        let breakdown = Breakdown::generate(&expenses, GroupBy::Category);
        let scaled = breakdown.scaled_rows();

        assert_eq!(scaled[0].share, 1.0);
        assert!((scaled[1].share - 320.0 / 1200.0).abs() < 1e-9);
        assert!(scaled.iter().all(|s| (0.0..=1.0).contains(&s.share)));
    }

    #[test]
    fn test_zero_max_scales_to_zero() {
        let mut expenses = sample_expenses().unwrap();
        for expense in &mut expenses {
            expense.price = Money::zero();
        }
        let breakdown = Breakdown::generate(&expenses, GroupBy::Type);
        assert!(breakdown.scaled_rows().iter().all(|s| s.share == 0.0));
    }

    #[test]
    fn test_group_by_parse() {
        assert_eq!("Account".parse::<GroupBy>().unwrap(), GroupBy::Account);
        assert_eq!("created-by".parse::<GroupBy>().unwrap(), GroupBy::CreatedBy);
        assert!("payee".parse::<GroupBy>().is_err());
        assert_eq!(GroupBy::CreatedBy.to_string(), "created-by");
    }

    #[test]
    fn test_export_csv() {
        let expenses = sample_expenses().unwrap();
        let breakdown = Breakdown::generate(&expenses, GroupBy::Type);

        let mut out = Vec::new();
        breakdown.export_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text, "Type,Total,Count\nBusiness,1755.50,4\nPersonal,113.00,2\n");
    }
}
