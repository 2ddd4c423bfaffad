//! Expense model
//!
//! An expense is an immutable ledger entry: a dated, non-negative amount in
//! the ledger currency, tagged with free-text categorical fields.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ExpenseId;
use super::money::{self, Money};

/// Currency of an expense. The ledger currently supports a single code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    /// Euro
    #[default]
    #[serde(rename = "EUR")]
    Eur,
}

impl Currency {
    /// ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Self::Eur => "EUR",
        }
    }

    /// Display symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Eur => "€",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Validated content of an expense that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub date: NaiveDate,
    pub price: Money,
    pub expense_type: String,
    pub category: String,
    pub subcategory: String,
    pub account: String,
    pub created_by: String,
    pub description: Option<String>,
}

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Unique identifier within the store
    pub id: ExpenseId,

    /// Date the expense was incurred
    pub date: NaiveDate,

    /// Amount spent (never negative)
    #[serde(with = "money::decimal")]
    pub price: Money,

    /// Currency of `price`
    #[serde(default)]
    pub currency: Currency,

    /// Expense type, e.g. "Business" or "Personal"
    #[serde(rename = "type")]
    pub expense_type: String,

    pub category: String,

    #[serde(default)]
    pub subcategory: String,

    /// Account the expense was paid from
    pub account: String,

    /// Name of the person who recorded the expense
    pub created_by: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Build an expense from validated input, stamping the creation time
    pub fn from_new(id: ExpenseId, new: NewExpense) -> Self {
        Self {
            id,
            date: new.date,
            price: new.price,
            currency: Currency::default(),
            expense_type: new.expense_type,
            category: new.category,
            subcategory: new.subcategory,
            account: new.account,
            created_by: new.created_by,
            description: new.description,
            created_at: Utc::now(),
        }
    }

    /// Check the record invariants that the type system doesn't cover
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.id.as_str().trim().is_empty() {
            return Err(ExpenseValidationError::EmptyId);
        }

        if self.price.is_negative() {
            return Err(ExpenseValidationError::NegativePrice {
                id: self.id.clone(),
                price: self.price,
            });
        }

        Ok(())
    }

    /// Short label used in logs and audit entries
    pub fn label(&self) -> String {
        format!("{} {} {}", self.date, self.category, self.price)
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} / {} ({})",
            self.date,
            self.price.format_with_symbol(self.currency.symbol()),
            self.category,
            self.subcategory,
            self.account
        )
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyId,
    NegativePrice { id: ExpenseId, price: Money },
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "Expense ID cannot be empty"),
            Self::NegativePrice { id, price } => {
                write!(f, "Expense {} has a negative price ({})", id, price)
            }
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_expense() -> NewExpense {
        NewExpense {
            date: NaiveDate::from_ymd_opt(2024, 12, 15).unwrap(),
            price: Money::from_cents(8550),
            expense_type: "Business".into(),
            category: "Food".into(),
            subcategory: "Restaurant".into(),
            account: "Business Credit Card".into(),
            created_by: "John Doe".into(),
            description: Some("Team lunch".into()),
        }
    }

    #[test]
    fn test_from_new() {
        let expense = Expense::from_new(ExpenseId::new("1"), new_expense());
        assert_eq!(expense.id.as_str(), "1");
        assert_eq!(expense.currency, Currency::Eur);
        assert_eq!(expense.price.cents(), 8550);
        assert!(expense.validate().is_ok());
    }

    #[test]
    fn test_negative_price_is_invalid() {
        let mut expense = Expense::from_new(ExpenseId::new("1"), new_expense());
        expense.price = Money::from_cents(-1);
        assert!(matches!(
            expense.validate(),
            Err(ExpenseValidationError::NegativePrice { .. })
        ));
    }

    #[test]
    fn test_empty_id_is_invalid() {
        let expense = Expense::from_new(ExpenseId::new(" "), new_expense());
        assert_eq!(expense.validate(), Err(ExpenseValidationError::EmptyId));
    }

    #[test]
    fn test_camel_case_json() {
        let json = r#"{
            "id": "1",
            "date": "2024-12-15",
            "price": 85.50,
            "currency": "EUR",
            "type": "Business",
            "category": "Food",
            "subcategory": "Restaurant",
            "account": "Business Credit Card",
            "createdBy": "John Doe",
            "description": "Team lunch",
            "createdAt": "2024-12-15T10:30:00Z"
        }"#;

        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.expense_type, "Business");
        assert_eq!(expense.created_by, "John Doe");
        assert_eq!(expense.price.cents(), 8550);

        let out = serde_json::to_value(&expense).unwrap();
        assert_eq!(out["type"], "Business");
        assert_eq!(out["createdBy"], "John Doe");
        assert_eq!(out["currency"], "EUR");
    }

    #[test]
    fn test_unknown_currency_rejected() {
        let json = r#"{"id":"1","date":"2024-12-15","price":1,"currency":"USD",
            "type":"t","category":"c","account":"a","createdBy":"u",
            "createdAt":"2024-12-15T10:30:00Z"}"#;
        assert!(serde_json::from_str::<Expense>(json).is_err());
    }

    #[test]
    fn test_display() {
        let expense = Expense::from_new(ExpenseId::new("1"), new_expense());
        assert_eq!(
            expense.to_string(),
            "2024-12-15 €85.50 Food / Restaurant (Business Credit Card)"
        );
    }
}
