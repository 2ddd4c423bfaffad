//! Core data models for spendboard
//!
//! This module contains the data structures of the expense ledger: expenses,
//! users, the forms used to create them, and the money and ID types they use.

pub mod expense;
pub mod form;
pub mod ids;
pub mod money;
pub mod user;

pub use expense::{Currency, Expense, ExpenseValidationError, NewExpense};
pub use form::{ExpenseForm, FormErrors, UserForm};
pub use ids::{ExpenseId, UserId};
pub use money::{Money, MoneyParseError, Rounding};
pub use user::User;
