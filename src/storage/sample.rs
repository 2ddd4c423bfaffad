//! Sample ledger used when no data file is given

use crate::error::SpendResult;
use crate::models::Expense;

const SAMPLE_EXPENSES: &str = r#"[
  {
    "id": "1", "date": "2024-12-15", "price": 85.50, "currency": "EUR",
    "type": "Business", "category": "Food", "subcategory": "Restaurant",
    "account": "Business Credit Card", "createdBy": "John Doe",
    "description": "Team lunch", "createdAt": "2024-12-15T10:30:00Z"
  },
  {
    "id": "2", "date": "2024-12-14", "price": 1200.00, "currency": "EUR",
    "type": "Business", "category": "Transportation", "subcategory": "Flight",
    "account": "Company Bank Account", "createdBy": "Jane Smith",
    "description": "Business trip to Berlin", "createdAt": "2024-12-14T09:15:00Z"
  },
  {
    "id": "3", "date": "2024-12-13", "price": 45.20, "currency": "EUR",
    "type": "Personal", "category": "Entertainment", "subcategory": "Movies",
    "account": "Personal Debit Card", "createdBy": "John Doe",
    "description": "Cinema tickets", "createdAt": "2024-12-13T19:45:00Z"
  },
  {
    "id": "4", "date": "2024-12-12", "price": 320.00, "currency": "EUR",
    "type": "Business", "category": "Office", "subcategory": "Equipment",
    "account": "Petty Cash", "createdBy": "Mike Johnson",
    "description": "Wireless mouse and keyboard", "createdAt": "2024-12-12T14:20:00Z"
  },
  {
    "id": "5", "date": "2024-12-11", "price": 67.80, "currency": "EUR",
    "type": "Personal", "category": "Food", "subcategory": "Groceries",
    "account": "Personal Credit Card", "createdBy": "Jane Smith",
    "description": "Weekly shopping", "createdAt": "2024-12-11T16:30:00Z"
  },
  {
    "id": "6", "date": "2024-12-10", "price": 150.00, "currency": "EUR",
    "type": "Business", "category": "Marketing", "subcategory": "Advertising",
    "account": "Marketing Budget", "createdBy": "John Doe",
    "description": "Google Ads campaign", "createdAt": "2024-12-10T11:15:00Z"
  }
]"#;

/// The six December 2024 demo expenses
pub fn sample_expenses() -> SpendResult<Vec<Expense>> {
    Ok(serde_json::from_str(SAMPLE_EXPENSES)?)
}
