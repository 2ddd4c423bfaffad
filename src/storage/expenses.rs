//! Expense repository
//!
//! An ordered, in-memory collection of expenses. Records keep their insertion
//! order; IDs are unique. There is no update path: records are appended or
//! removed.

use std::collections::HashSet;

use crate::error::{SpendError, SpendResult};
use crate::models::{Expense, ExpenseId};

/// In-memory store of expenses
#[derive(Debug, Default)]
pub struct ExpenseRepository {
    records: Vec<Expense>,
}

impl ExpenseRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository from existing records, checking invariants
    pub fn from_records(records: Vec<Expense>) -> SpendResult<Self> {
        let mut seen = HashSet::new();
        for expense in &records {
            expense
                .validate()
                .map_err(|e| SpendError::Validation(e.to_string()))?;
            if !seen.insert(expense.id.clone()) {
                return Err(SpendError::duplicate_expense(expense.id.as_str()));
            }
        }
        Ok(Self { records })
    }

    /// All expenses in insertion order
    pub fn all(&self) -> &[Expense] {
        &self.records
    }

    /// Get an expense by ID
    pub fn get(&self, id: &ExpenseId) -> Option<&Expense> {
        self.records.iter().find(|e| &e.id == id)
    }

    pub fn contains(&self, id: &ExpenseId) -> bool {
        self.get(id).is_some()
    }

    /// Append an expense
    pub fn insert(&mut self, expense: Expense) -> SpendResult<()> {
        expense
            .validate()
            .map_err(|e| SpendError::Validation(e.to_string()))?;
        if self.contains(&expense.id) {
            return Err(SpendError::duplicate_expense(expense.id.as_str()));
        }
        self.records.push(expense);
        Ok(())
    }

    /// Remove an expense, returning it if it was present
    pub fn remove(&mut self, id: &ExpenseId) -> Option<Expense> {
        let index = self.records.iter().position(|e| &e.id == id)?;
        Some(self.records.remove(index))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
