//! Expenses overview
//!
//! Everything the expenses page shows for one set of filter criteria: the
//! summary cards, spending by category and by account, and the ledger.

use serde::Serialize;

use crate::config::Settings;
use crate::display::format_expense_table;
use crate::models::Expense;
use crate::services::filter::{filter_expenses, FilterCriteria};

use super::breakdown::{Breakdown, GroupBy};
use super::summary::ExpenseSummary;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpensesOverview {
    /// Active filters, as text
    pub filters: String,
    /// Number of records before filtering
    pub total_records: usize,
    pub summary: ExpenseSummary,
    pub by_category: Breakdown,
    pub by_account: Breakdown,
    pub expenses: Vec<Expense>,
}

impl ExpensesOverview {
    /// Filter the records and compute every figure over the result
    pub fn generate(records: &[Expense], criteria: &FilterCriteria) -> Self {
        let filtered = filter_expenses(records, criteria);

        Self {
            filters: criteria.to_string(),
            total_records: records.len(),
            summary: ExpenseSummary::from_expenses(filtered.iter().copied()),
            by_category: Breakdown::generate(filtered.iter().copied(), GroupBy::Category),
            by_account: Breakdown::generate(filtered.iter().copied(), GroupBy::Account),
            expenses: filtered.into_iter().cloned().collect(),
        }
    }

    /// Format the overview for terminal display
    pub fn format_terminal(&self, settings: &Settings) -> String {
        let symbol = settings.currency.symbol();
        let mut output = String::new();

        output.push_str("Expenses Overview\n");
        output.push_str(&"=".repeat(80));
        output.push('\n');
        output.push_str(&format!("Filters: {}\n\n", self.filters));

        output.push_str(&self.summary.format_terminal(symbol));
        output.push('\n');

        output.push_str(&self.by_category.format_terminal(symbol, settings.chart_width));
        output.push('\n');
        output.push_str(&self.by_account.format_terminal(symbol, settings.chart_width));
        output.push('\n');

        let refs: Vec<&Expense> = self.expenses.iter().collect();
        output.push_str(&format_expense_table(
            &refs,
            &settings.date_format,
            self.total_records == 0,
        ));

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::filter::DateWindow;
    use crate::storage::sample::sample_expenses;
    use chrono::NaiveDate;

    fn december() -> FilterCriteria {
        FilterCriteria::new(DateWindow::new(
            NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        ))
    }

    #[test]
    fn test_generate_whole_month() {
        let expenses = sample_expenses().unwrap();
        let overview = ExpensesOverview::generate(&expenses, &december());

        assert_eq!(overview.summary.count, 6);
        assert_eq!(overview.by_category.rows.len(), 5);
        assert_eq!(overview.by_account.rows.len(), 6);
        assert_eq!(overview.by_account.rows[0].key, "Company Bank Account");
        assert_eq!(overview.expenses.len(), 6);
    }

    #[test]
    fn test_generate_filtered() {
        let expenses = sample_expenses().unwrap();
        let overview = ExpensesOverview::generate(&expenses, &december().category("Food"));

        assert_eq!(overview.summary.count, 2);
        assert_eq!(overview.summary.total.cents(), 15330);
        assert_eq!(overview.by_category.rows.len(), 1);
        assert_eq!(overview.total_records, 6);
    }

    #[test]
    fn test_format_terminal_empty_states() {
        let settings = Settings::default();
        let expenses = sample_expenses().unwrap();

        let nothing_matches =
            ExpensesOverview::generate(&expenses, &december().category("Travel"));
        let text = nothing_matches.format_terminal(&settings);
        assert!(text.contains("No data available for selected filters"));
        assert!(text.contains("Try adjusting your filters"));

        let empty_store = ExpensesOverview::generate(&[], &december());
        let text = empty_store.format_terminal(&settings);
        assert!(text.contains("Add your first expense"));
        assert!(text.contains("Average Amount:     €0.00"));
    }

    #[test]
    fn test_format_terminal_sections() {
        let settings = Settings::default();
        let expenses = sample_expenses().unwrap();
        let text = ExpensesOverview::generate(&expenses, &december()).format_terminal(&settings);

        assert!(text.contains("Expenses by Category"));
        assert!(text.contains("Expenses by Account"));
        assert!(text.contains("Total Expenses:     €1868.50"));
        assert!(text.contains("15/12/2024"));
    }
}
