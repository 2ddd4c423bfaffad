//! Export module for spendboard
//!
//! Writes filtered expenses, breakdowns and summaries in machine-readable
//! formats:
//! - CSV: ledger rows and summary figures (spreadsheet-compatible)
//! - JSON: pretty-printed, with export metadata for ledgers
//! - YAML: human-readable

pub mod csv;
pub mod json;
pub mod yaml;

use std::fmt;

pub use self::csv::{export_expenses_csv, export_summary_csv};
pub use json::{export_json, ExpenseExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_yaml;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Terminal tables and charts
    #[default]
    Table,
    Csv,
    Json,
    Yaml,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Table => "table",
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Yaml => "yaml",
        };
        f.write_str(name)
    }
}
