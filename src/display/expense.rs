//! Expense display formatting
//!
//! The ledger table and single-expense details.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Expense;

/// Headline shown when the ledger has nothing to list
pub const NO_EXPENSES: &str = "No expenses found";

#[derive(Tabled)]
struct LedgerRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Type")]
    expense_type: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Subcategory")]
    subcategory: String,
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Created By")]
    created_by: String,
    #[tabled(rename = "ID")]
    id: String,
}

impl LedgerRow {
    fn new(expense: &Expense, date_format: &str) -> Self {
        Self {
            date: expense.date.format(date_format).to_string(),
            amount: expense.price.format_with_symbol(expense.currency.symbol()),
            expense_type: expense.expense_type.clone(),
            category: expense.category.clone(),
            subcategory: expense.subcategory.clone(),
            account: expense.account.clone(),
            created_by: expense.created_by.clone(),
            id: expense.id.to_string(),
        }
    }
}

/// Format expenses as a ledger table.
///
/// `store_is_empty` picks the hint shown when there is nothing to list.
pub fn format_expense_table(expenses: &[&Expense], date_format: &str, store_is_empty: bool) -> String {
    if expenses.is_empty() {
        return format_empty_ledger(store_is_empty);
    }

    let rows = expenses.iter().map(|e| LedgerRow::new(e, date_format));
    let mut table = Table::new(rows);
    table.with(Style::modern());
    format!("{}\n", table)
}

/// Empty state for the ledger, distinguishing an empty store from a filter
/// that excludes everything
pub fn format_empty_ledger(store_is_empty: bool) -> String {
    let hint = if store_is_empty {
        "Add your first expense to get started"
    } else {
        "Try adjusting your filters to see more results"
    };
    format!("{}\n{}\n", NO_EXPENSES, hint)
}

/// Format expense details for display
pub fn format_expense_details(expense: &Expense, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Expense:     {}\n", expense.id));
    output.push_str(&format!("Date:        {}\n", expense.date.format(date_format)));
    output.push_str(&format!(
        "Amount:      {}\n",
        expense.price.format_with_symbol(expense.currency.symbol())
    ));
    output.push_str(&format!("Type:        {}\n", expense.expense_type));

    if expense.subcategory.is_empty() {
        output.push_str(&format!("Category:    {}\n", expense.category));
    } else {
        output.push_str(&format!(
            "Category:    {} / {}\n",
            expense.category, expense.subcategory
        ));
    }

    output.push_str(&format!("Account:     {}\n", expense.account));
    output.push_str(&format!("Created By:  {}\n", expense.created_by));

    if let Some(description) = &expense.description {
        output.push_str(&format!("Description: {}\n", description));
    }

    output
}
