//! Filter and output flags shared by the report commands

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Args;

use crate::error::{SpendError, SpendResult};
use crate::export::OutputFormat;
use crate::services::filter::{DateWindow, FilterCriteria, FilterInput};

/// Filter flags
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Start of the date window (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub from: Option<String>,

    /// End of the date window (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub to: Option<String>,

    /// Minimum price; ignored if not a number
    #[arg(long, allow_hyphen_values = true)]
    pub min: Option<String>,

    /// Maximum price; ignored if not a number
    #[arg(long, allow_hyphen_values = true)]
    pub max: Option<String>,

    /// Expense type (exact match)
    #[arg(long = "type")]
    pub expense_type: Option<String>,

    /// Category (exact match)
    #[arg(long)]
    pub category: Option<String>,

    /// Account (exact match)
    #[arg(long)]
    pub account: Option<String>,

    /// Person who recorded the expense (exact match)
    #[arg(long)]
    pub created_by: Option<String>,
}

impl FilterArgs {
    /// Build criteria, starting from the default window for any date that
    /// isn't given
    pub fn to_criteria(&self, default_window: DateWindow) -> SpendResult<FilterCriteria> {
        let window = DateWindow::new(
            parse_date_flag("--from", self.from.as_deref())?.unwrap_or(default_window.start),
            parse_date_flag("--to", self.to.as_deref())?.unwrap_or(default_window.end),
        );

        let input = FilterInput {
            price_min: self.min.clone().unwrap_or_default(),
            price_max: self.max.clone().unwrap_or_default(),
            expense_type: self.expense_type.clone().unwrap_or_default(),
            category: self.category.clone().unwrap_or_default(),
            account: self.account.clone().unwrap_or_default(),
            created_by: self.created_by.clone().unwrap_or_default(),
        };

        Ok(input.to_criteria(window))
    }
}

fn parse_date_flag(flag: &str, value: Option<&str>) -> SpendResult<Option<NaiveDate>> {
    value
        .map(|raw| {
            NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
                SpendError::Validation(format!("Invalid {} date '{}', expected YYYY-MM-DD", flag, raw))
            })
        })
        .transpose()
}

/// Output flags
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl OutputArgs {
    /// Open the output destination
    pub fn writer(&self) -> SpendResult<Box<dyn Write>> {
        match &self.output {
            Some(path) => {
                let file = File::create(path).map_err(|e| {
                    SpendError::Export(format!("Failed to create {}: {}", path.display(), e))
                })?;
                Ok(Box::new(BufWriter::new(file)))
            }
            None => Ok(Box::new(io::stdout().lock())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn december() -> DateWindow {
        DateWindow::new(
            NaiveDate::from_ymd_opt(2024, 12, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        )
    }

    #[test]
    fn test_defaults_to_window_only() {
        let criteria = FilterArgs::default().to_criteria(december()).unwrap();
        assert_eq!(criteria, FilterCriteria::new(december()));
    }

    #[test]
    fn test_all_flags() {
        let args = FilterArgs {
            from: Some("2024-12-10".into()),
            to: Some("2024-12-12".into()),
            min: Some("€50".into()),
            max: Some("abc".into()),
            expense_type: Some("Business".into()),
            category: Some("".into()),
            account: Some("Petty Cash".into()),
            created_by: None,
        };
        let criteria = args.to_criteria(december()).unwrap();

        assert_eq!(criteria.window.start, NaiveDate::from_ymd_opt(2024, 12, 10).unwrap());
        assert_eq!(criteria.window.end, NaiveDate::from_ymd_opt(2024, 12, 12).unwrap());
        assert_eq!(criteria.price_min, Some(Money::from_cents(5000)));
        assert_eq!(criteria.price_max, None);
        assert_eq!(criteria.expense_type.as_deref(), Some("Business"));
        assert_eq!(criteria.category, None);
        assert_eq!(criteria.account.as_deref(), Some("Petty Cash"));
    }

    #[test]
    fn test_bad_date_is_an_error() {
        let args = FilterArgs {
            from: Some("12/01/2024".into()),
            ..FilterArgs::default()
        };
        let err = args.to_criteria(december()).unwrap_err();
        assert!(err.to_string().contains("--from"));
    }
}
