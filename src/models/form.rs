//! Form input models
//!
//! Forms hold raw, string-typed input exactly as a user typed it. Validation
//! is a pure function from a form to either a typed value or a set of
//! per-field error messages.

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::expense::NewExpense;
use super::money::{Money, MoneyParseError};
use super::user::User;

/// Minimum username length accepted by the user form
pub const MIN_USERNAME_LEN: usize = 3;

/// Minimum password length accepted by the user form
pub const MIN_PASSWORD_LEN: usize = 6;

/// Per-field validation messages, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<&'static str, String>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the message for a field, replacing any earlier one
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Raw input for a new expense
#[derive(Debug, Clone, Default)]
pub struct ExpenseForm {
    /// Date as YYYY-MM-DD
    pub date: String,
    pub price: String,
    pub expense_type: String,
    pub category: String,
    pub subcategory: String,
    pub account: String,
    pub created_by: String,
    pub description: String,
}

impl ExpenseForm {
    /// Validate the form and produce the typed expense content
    pub fn validate(&self) -> Result<NewExpense, FormErrors> {
        let mut errors = FormErrors::new();

        let date = match self.date.trim() {
            "" => {
                errors.insert("date", "Date is required");
                None
            }
            raw => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.insert("date", "Date must be in YYYY-MM-DD format");
                    None
                }
            },
        };

        let price = match self.price.trim() {
            "" => {
                errors.insert("price", "Price is required");
                None
            }
            raw => match Money::parse(raw) {
                Ok(price) if price.is_negative() => {
                    errors.insert("price", "Price cannot be negative");
                    None
                }
                Ok(price) => Some(price),
                Err(MoneyParseError::TooPrecise(_)) => {
                    errors.insert("price", "Price cannot have more than two decimal places");
                    None
                }
                Err(MoneyParseError::OutOfRange(_)) => {
                    errors.insert("price", "Price is too large");
                    None
                }
                Err(MoneyParseError::InvalidFormat(_)) => {
                    errors.insert("price", "Price must be a number");
                    None
                }
            },
        };

        let required = [
            ("type", &self.expense_type, "Type is required"),
            ("category", &self.category, "Category is required"),
            ("account", &self.account, "Account is required"),
            ("created_by", &self.created_by, "Created by is required"),
        ];
        for (field, value, message) in required {
            if value.trim().is_empty() {
                errors.insert(field, message);
            }
        }

        match (date, price) {
            (Some(date), Some(price)) if errors.is_empty() => {
                let description = self.description.trim();
                Ok(NewExpense {
                    date,
                    price,
                    expense_type: self.expense_type.trim().to_string(),
                    category: self.category.trim().to_string(),
                    subcategory: self.subcategory.trim().to_string(),
                    account: self.account.trim().to_string(),
                    created_by: self.created_by.trim().to_string(),
                    description: (!description.is_empty()).then(|| description.to_string()),
                })
            }
            _ => Err(errors),
        }
    }
}

/// Raw input for a new user. The fields are wiped from memory on drop.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct UserForm {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password: String,
}

impl UserForm {
    /// Validate the form against the users that already exist.
    ///
    /// Rules run in order and a later rule replaces an earlier message for
    /// the same field, so an empty username reports the length rule and a
    /// taken username always reports that it exists.
    pub fn validate(&self, existing: &[User]) -> FormErrors {
        let mut errors = FormErrors::new();

        if self.first_name.trim().is_empty() {
            errors.insert("first_name", "First name is required");
        }
        if self.last_name.trim().is_empty() {
            errors.insert("last_name", "Last name is required");
        }
        if self.username.trim().is_empty() {
            errors.insert("username", "Username is required");
        }
        if self.username.chars().count() < MIN_USERNAME_LEN {
            errors.insert(
                "username",
                format!("Username must be at least {} characters", MIN_USERNAME_LEN),
            );
        }
        if self.password.trim().is_empty() {
            errors.insert("password", "Password is required");
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.insert(
                "password",
                format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
            );
        }

        let wanted = self.username.trim().to_lowercase();
        if existing
            .iter()
            .any(|user| user.username.to_lowercase() == wanted)
        {
            errors.insert("username", "Username already exists");
        }

        errors
    }
}

impl fmt::Debug for UserForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserForm")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
