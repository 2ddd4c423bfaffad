//! Expense service
//!
//! Business logic for recording and removing expenses, on top of the
//! in-memory store.

use log::info;

use crate::audit::EntityType;
use crate::error::{SpendError, SpendResult};
use crate::models::{Expense, ExpenseForm, ExpenseId};
use crate::storage::Storage;

use super::filter::{filter_expenses, FilterCriteria, FilterOptions};

/// Result of a delete request
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteOutcome<T> {
    /// The record was removed
    Deleted(T),
    /// The record exists but the confirmation was declined
    Cancelled,
    /// No record has that id; nothing changed
    NotFound,
}

impl<T> DeleteOutcome<T> {
    pub fn is_deleted(&self) -> bool {
        matches!(self, Self::Deleted(_))
    }
}

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a mut Storage,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a mut Storage) -> Self {
        Self { storage }
    }

    /// Validate a form and append the resulting expense.
    ///
    /// The new expense gets a fresh id and a creation timestamp of now.
    pub fn create(&mut self, form: &ExpenseForm) -> SpendResult<Expense> {
        let new = form.validate()?;

        let mut id = ExpenseId::generate();
        while self.storage.expenses.contains(&id) {
            id = ExpenseId::generate();
        }

        let expense = Expense::from_new(id, new);
        self.storage.expenses.insert(expense.clone())?;
        info!("Created expense {} ({})", expense.id, expense.label());

        self.storage.log_create(
            EntityType::Expense,
            expense.id.as_str(),
            Some(expense.label()),
            &expense,
        )?;

        Ok(expense)
    }

    /// Delete an expense after confirmation.
    ///
    /// `confirm` is only asked when the expense exists. Deleting an unknown
    /// id leaves the store untouched.
    pub fn delete<F>(&mut self, id: &ExpenseId, confirm: F) -> SpendResult<DeleteOutcome<Expense>>
    where
        F: FnOnce(&Expense) -> bool,
    {
        let Some(expense) = self.storage.expenses.get(id) else {
            return Ok(DeleteOutcome::NotFound);
        };

        if !confirm(expense) {
            return Ok(DeleteOutcome::Cancelled);
        }

        let Some(removed) = self.storage.expenses.remove(id) else {
            return Ok(DeleteOutcome::NotFound);
        };
        info!("Deleted expense {} ({})", removed.id, removed.label());

        self.storage.log_delete(
            EntityType::Expense,
            removed.id.as_str(),
            Some(removed.label()),
            &removed,
        )?;

        Ok(DeleteOutcome::Deleted(removed))
    }

    /// Editing recorded expenses is not supported
    pub fn edit(&self, id: &ExpenseId) -> SpendResult<Expense> {
        if !self.storage.expenses.contains(id) {
            return Err(SpendError::expense_not_found(id.as_str()));
        }
        Err(SpendError::Validation(
            "Edit functionality will be added later".to_string(),
        ))
    }

    /// Expenses matching the criteria, in store order
    pub fn list(&self, criteria: &FilterCriteria) -> Vec<&Expense> {
        filter_expenses(self.storage.expenses.all(), criteria)
    }

    /// Distinct values available for each categorical filter
    pub fn options(&self) -> FilterOptions {
        FilterOptions::from_expenses(self.storage.expenses.all())
    }
}
