//! Display formatting for terminal output
//!
//! Tables for the ledger and users, and text bar charts for breakdowns.

pub mod chart;
pub mod expense;
pub mod user;

pub use chart::render_bar_chart;
pub use expense::{format_empty_ledger, format_expense_details, format_expense_table};
pub use user::format_user_table;
