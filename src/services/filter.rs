//! Expense filtering
//!
//! A [`FilterCriteria`] is a set of independent predicates combined with
//! logical AND: a mandatory inclusive date window, optional price bounds and
//! optional exact-match categorical constraints. Matching is a pure function
//! of the record and the criteria.

use chrono::NaiveDate;
use log::debug;
use std::fmt;
use std::str::FromStr;

use crate::error::{SpendError, SpendResult};
use crate::models::{Expense, Money, Rounding};

/// Inclusive date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Check whether a date falls inside the window (both ends inclusive).
    /// A window whose start is after its end contains nothing.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Constraints used to include or exclude expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub window: DateWindow,
    pub price_min: Option<Money>,
    pub price_max: Option<Money>,
    pub expense_type: Option<String>,
    pub category: Option<String>,
    pub account: Option<String>,
    pub created_by: Option<String>,
}

impl FilterCriteria {
    /// Criteria with only the date window set
    pub fn new(window: DateWindow) -> Self {
        Self {
            window,
            price_min: None,
            price_max: None,
            expense_type: None,
            category: None,
            account: None,
            created_by: None,
        }
    }

    /// Reset every constraint and restore the given window
    pub fn clear(&mut self, window: DateWindow) {
        *self = Self::new(window);
    }

    pub fn price_min(mut self, min: Money) -> Self {
        self.price_min = Some(min);
        self
    }

    pub fn price_max(mut self, max: Money) -> Self {
        self.price_max = Some(max);
        self
    }

    pub fn expense_type(mut self, expense_type: impl Into<String>) -> Self {
        self.expense_type = Some(expense_type.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    pub fn created_by(mut self, created_by: impl Into<String>) -> Self {
        self.created_by = Some(created_by.into());
        self
    }

    /// Decide whether an expense is included
    pub fn matches(&self, expense: &Expense) -> bool {
        if !self.window.contains(expense.date) {
            return false;
        }

        if let Some(min) = self.price_min {
            if expense.price < min {
                return false;
            }
        }
        if let Some(max) = self.price_max {
            if expense.price > max {
                return false;
            }
        }

        field_matches(&self.expense_type, &expense.expense_type)
            && field_matches(&self.category, &expense.category)
            && field_matches(&self.account, &expense.account)
            && field_matches(&self.created_by, &expense.created_by)
    }

    /// Update a single constraint from raw text, the way a filter form does.
    ///
    /// Empty text clears a constraint. A price bound that isn't a number is
    /// treated as no constraint. Dates must be valid `YYYY-MM-DD` dates.
    pub fn set_field(&mut self, field: FilterField, raw: &str) -> SpendResult<()> {
        let raw = raw.trim();
        match field {
            FilterField::From => self.window.start = parse_date(raw)?,
            FilterField::To => self.window.end = parse_date(raw)?,
            FilterField::Min => self.price_min = parse_price_bound(Rounding::Up, raw),
            FilterField::Max => self.price_max = parse_price_bound(Rounding::Down, raw),
            FilterField::Type => self.expense_type = non_empty(raw),
            FilterField::Category => self.category = non_empty(raw),
            FilterField::Account => self.account = non_empty(raw),
            FilterField::CreatedBy => self.created_by = non_empty(raw),
        }
        Ok(())
    }

    /// Whether any constraint beyond the date window is active
    pub fn has_optional_constraints(&self) -> bool {
        self.price_min.is_some()
            || self.price_max.is_some()
            || is_set(&self.expense_type)
            || is_set(&self.category)
            || is_set(&self.account)
            || is_set(&self.created_by)
    }
}

impl fmt::Display for FilterCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = vec![self.window.to_string()];

        if let Some(min) = self.price_min {
            parts.push(format!("price >= {}", min));
        }
        if let Some(max) = self.price_max {
            parts.push(format!("price <= {}", max));
        }

        let categorical = [
            ("type", &self.expense_type),
            ("category", &self.category),
            ("account", &self.account),
            ("created by", &self.created_by),
        ];
        for (label, value) in categorical {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                parts.push(format!("{} = {}", label, value));
            }
        }

        f.write_str(&parts.join(", "))
    }
}

fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

/// An unset or empty constraint accepts everything; otherwise exact,
/// case-sensitive equality.
fn field_matches(wanted: &Option<String>, actual: &str) -> bool {
    match wanted.as_deref() {
        None | Some("") => true,
        Some(wanted) => wanted == actual,
    }
}

fn non_empty(raw: &str) -> Option<String> {
    (!raw.is_empty()).then(|| raw.to_string())
}

fn parse_date(raw: &str) -> SpendResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| SpendError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", raw)))
}

/// Parse a price bound; a minimum rounds up to the next cent and a maximum
/// rounds down, so the bound never admits a price outside it.
fn parse_price_bound(rounding: Rounding, raw: &str) -> Option<Money> {
    if raw.is_empty() {
        return None;
    }
    match Money::parse_rounded(raw, rounding) {
        Ok(amount) => Some(amount),
        Err(e) => {
            let label = match rounding {
                Rounding::Up => "minimum",
                Rounding::Down => "maximum",
            };
            debug!("Ignoring {} price '{}': {}", label, raw, e);
            None
        }
    }
}

/// A single filter dimension, as named on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    From,
    To,
    Min,
    Max,
    Type,
    Category,
    Account,
    CreatedBy,
}

impl FromStr for FilterField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "from" | "start" => Ok(Self::From),
            "to" | "end" => Ok(Self::To),
            "min" | "price-min" => Ok(Self::Min),
            "max" | "price-max" => Ok(Self::Max),
            "type" => Ok(Self::Type),
            "category" => Ok(Self::Category),
            "account" => Ok(Self::Account),
            "created-by" | "createdby" | "user" => Ok(Self::CreatedBy),
            other => Err(format!(
                "unknown filter '{}' (expected from, to, min, max, type, category, account, created-by)",
                other
            )),
        }
    }
}

/// Raw, string-typed filter state as a filter form holds it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterInput {
    pub price_min: String,
    pub price_max: String,
    pub expense_type: String,
    pub category: String,
    pub account: String,
    pub created_by: String,
}

impl FilterInput {
    /// Turn the raw input into criteria over the given window.
    ///
    /// Empty fields mean "no constraint"; so do price bounds that don't parse.
    pub fn to_criteria(&self, window: DateWindow) -> FilterCriteria {
        FilterCriteria {
            window,
            price_min: parse_price_bound(Rounding::Up, self.price_min.trim()),
            price_max: parse_price_bound(Rounding::Down, self.price_max.trim()),
            expense_type: non_empty(self.expense_type.trim()),
            category: non_empty(self.category.trim()),
            account: non_empty(self.account.trim()),
            created_by: non_empty(self.created_by.trim()),
        }
    }
}

/// Return the expenses matching the criteria, in store order
pub fn filter_expenses<'a, I>(records: I, criteria: &FilterCriteria) -> Vec<&'a Expense>
where
    I: IntoIterator<Item = &'a Expense>,
{
    let filtered: Vec<&Expense> = records
        .into_iter()
        .filter(|expense| criteria.matches(expense))
        .collect();
    debug!("Filter [{}] matched {} expenses", criteria, filtered.len());
    filtered
}

/// Distinct values of each categorical field, in first-appearance order
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub types: Vec<String>,
    pub categories: Vec<String>,
    pub accounts: Vec<String>,
    pub created_by: Vec<String>,
}

impl FilterOptions {
    pub fn from_expenses<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Expense>,
    {
        let mut options = Self::default();
        for expense in records {
            push_distinct(&mut options.types, &expense.expense_type);
            push_distinct(&mut options.categories, &expense.category);
            push_distinct(&mut options.accounts, &expense.account);
            push_distinct(&mut options.created_by, &expense.created_by);
        }
        options
    }
}

fn push_distinct(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|v| v == value) {
        values.push(value.to_string());
    }
}
