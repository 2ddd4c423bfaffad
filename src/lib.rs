//! spendboard - Terminal expense ledger
//!
//! This library provides the core of the spendboard expense ledger: an
//! in-memory record store, a filter and aggregation pipeline over it, and the
//! user management that goes with it. The `spendboard` binary puts a terminal
//! front end on top.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, users, forms, money, IDs)
//! - `storage`: In-memory repositories and read-only record loading
//! - `services`: Filtering, expense and user management
//! - `reports`: Summaries, breakdowns and the expenses overview
//! - `display`: Tables and bar charts for the terminal
//! - `export`: CSV, JSON and YAML output
//! - `audit`: Audit logging system
//! - `crypto`: Password hashing
//! - `cli`: Command-line and interactive shell handlers
//!
//! # Example
//!
//! ```
//! use spendboard::reports::{Breakdown, ExpenseSummary, GroupBy};
//! use spendboard::services::filter::{filter_expenses, DateWindow, FilterCriteria};
//! use spendboard::storage::Storage;
//! use chrono::NaiveDate;
//!
//! let storage = Storage::from_sample().unwrap();
//! let criteria = FilterCriteria::new(DateWindow::new(
//!     NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
//! ))
//! .category("Food");
//!
//! let food = filter_expenses(storage.expenses.all(), &criteria);
//! assert_eq!(ExpenseSummary::from_expenses(food.iter().copied()).count, 2);
//!
//! let by_category = Breakdown::generate(storage.expenses.all(), GroupBy::Category);
//! assert_eq!(by_category.rows[0].key, "Transportation");
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{SpendError, SpendResult};
