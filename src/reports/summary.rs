//! Summary figures over a set of expenses

use serde::Serialize;

use crate::models::{Expense, Money};

/// Count, total and average price of a set of expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ExpenseSummary {
    pub count: usize,
    #[serde(with = "crate::models::money::decimal")]
    pub total: Money,
    /// `total / count` rounded to the nearest cent, or zero for no expenses
    #[serde(with = "crate::models::money::decimal")]
    pub average: Money,
}

impl ExpenseSummary {
    pub fn from_expenses<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        let (count, total) = records
            .into_iter()
            .fold((0, Money::zero()), |(count, total), e| (count + 1, total + e.price));

        Self {
            count,
            total,
            average: total.divide_rounded(count),
        }
    }

    /// Format the summary cards for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        format!(
            "Total Expenses:     {}\nNumber of Expenses: {}\nAverage Amount:     {}\n",
            self.total.format_with_symbol(symbol),
            self.count,
            self.average.format_with_symbol(symbol)
        )
    }
}
