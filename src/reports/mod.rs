//! Reports module for spendboard
//!
//! Summaries and breakdowns computed over filtered expenses, plus the
//! combined expenses overview.

pub mod breakdown;
pub mod overview;
pub mod summary;

pub use breakdown::{aggregate, max_total, scale_to_max, AggregateRow, Breakdown, GroupBy, ScaledRow};
pub use overview::ExpensesOverview;
pub use summary::ExpenseSummary;
