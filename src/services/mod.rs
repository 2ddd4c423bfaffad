//! Service layer for spendboard
//!
//! Business logic on top of the storage layer: filtering, expense creation
//! and deletion, and user management.

pub mod expense;
pub mod filter;
pub mod user;

pub use expense::{DeleteOutcome, ExpenseService};
pub use filter::{
    filter_expenses, DateWindow, FilterCriteria, FilterField, FilterInput, FilterOptions,
};
pub use user::UserService;
