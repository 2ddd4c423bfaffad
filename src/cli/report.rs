//! Report commands
//!
//! Renders ledgers, summaries, breakdowns and the overview in the requested
//! output format. Shared by the one-shot commands and the interactive shell.

use std::io::Write;

use crate::config::Settings;
use crate::display::format_expense_table;
use crate::error::{SpendError, SpendResult};
use crate::export::{
    export_expenses_csv, export_json, export_summary_csv, export_yaml, ExpenseExport, OutputFormat,
};
use crate::models::Expense;
use crate::reports::{Breakdown, ExpenseSummary, ExpensesOverview, GroupBy};
use crate::services::filter::{filter_expenses, FilterCriteria, FilterOptions};

/// Write the filtered ledger
pub fn write_list<W: Write>(
    records: &[Expense],
    criteria: &FilterCriteria,
    settings: &Settings,
    format: OutputFormat,
    mut out: W,
) -> SpendResult<()> {
    let filtered = filter_expenses(records, criteria);

    match format {
        OutputFormat::Table => {
            write!(
                out,
                "{}",
                format_expense_table(&filtered, &settings.date_format, records.is_empty())
            )?;
            if !filtered.is_empty() {
                writeln!(out, "Showing {} of {} expenses", filtered.len(), records.len())?;
            }
            Ok(())
        }
        OutputFormat::Csv => export_expenses_csv(&filtered, out),
        OutputFormat::Json => export_json(&ExpenseExport::new(criteria.to_string(), &filtered), out),
        OutputFormat::Yaml => export_yaml(&ExpenseExport::new(criteria.to_string(), &filtered), out),
    }
}

/// Write count, total and average of the filtered expenses
pub fn write_summary<W: Write>(
    records: &[Expense],
    criteria: &FilterCriteria,
    settings: &Settings,
    format: OutputFormat,
    mut out: W,
) -> SpendResult<()> {
    let summary = ExpenseSummary::from_expenses(filter_expenses(records, criteria));

    match format {
        OutputFormat::Table => {
            writeln!(out, "Filters: {}", criteria)?;
            write!(out, "{}", summary.format_terminal(settings.currency.symbol()))?;
            Ok(())
        }
        OutputFormat::Csv => export_summary_csv(&summary, out),
        OutputFormat::Json => export_json(&summary, out),
        OutputFormat::Yaml => export_yaml(&summary, out),
    }
}

/// Write the filtered expenses grouped by one field
pub fn write_breakdown<W: Write>(
    records: &[Expense],
    criteria: &FilterCriteria,
    group_by: GroupBy,
    settings: &Settings,
    format: OutputFormat,
    mut out: W,
) -> SpendResult<()> {
    let breakdown = Breakdown::generate(filter_expenses(records, criteria), group_by);

    match format {
        OutputFormat::Table => {
            write!(
                out,
                "{}",
                breakdown.format_terminal(settings.currency.symbol(), settings.chart_width)
            )?;
            Ok(())
        }
        OutputFormat::Csv => breakdown.export_csv(out),
        OutputFormat::Json => export_json(&breakdown, out),
        OutputFormat::Yaml => export_yaml(&breakdown, out),
    }
}

/// Write the full overview: summary, both charts and the ledger
pub fn write_overview<W: Write>(
    records: &[Expense],
    criteria: &FilterCriteria,
    settings: &Settings,
    format: OutputFormat,
    mut out: W,
) -> SpendResult<()> {
    let overview = ExpensesOverview::generate(records, criteria);

    match format {
        OutputFormat::Table => {
            write!(out, "{}", overview.format_terminal(settings))?;
            Ok(())
        }
        OutputFormat::Csv => Err(SpendError::Validation(
            "The overview report has no CSV form; use list, summary or breakdown".into(),
        )),
        OutputFormat::Json => export_json(&overview, out),
        OutputFormat::Yaml => export_yaml(&overview, out),
    }
}

/// Write the distinct values available to each categorical filter
pub fn write_options<W: Write>(records: &[Expense], format: OutputFormat, mut out: W) -> SpendResult<()> {
    let options = FilterOptions::from_expenses(records);

    match format {
        OutputFormat::Table => {
            let sections = [
                ("Types", &options.types),
                ("Categories", &options.categories),
                ("Accounts", &options.accounts),
                ("Created By", &options.created_by),
            ];
            for (label, values) in sections {
                writeln!(out, "{}:", label)?;
                for value in values {
                    writeln!(out, "  {}", value)?;
                }
            }
            Ok(())
        }
        OutputFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(out);
            csv_writer.write_record(["field", "value"])?;
            let sections = [
                ("type", &options.types),
                ("category", &options.categories),
                ("account", &options.accounts),
                ("createdBy", &options.created_by),
            ];
            for (field, values) in sections {
                for value in values {
                    csv_writer.write_record([field, value.as_str()])?;
                }
            }
            csv_writer.flush()?;
            Ok(())
        }
        OutputFormat::Json => export_json(&options, out),
        OutputFormat::Yaml => export_yaml(&options, out),
    }
}
