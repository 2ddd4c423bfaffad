//! Read-only loading of expense files
//!
//! Expense files are either a JSON array or a CSV table using the same
//! camelCase field names. Files are only ever read.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{SpendError, SpendResult};
use crate::models::Expense;

/// Supported expense file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Csv,
}

impl FileFormat {
    /// Pick a format from the file extension
    pub fn from_path(path: &Path) -> SpendResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            _ => Err(SpendError::Import(format!(
                "Unsupported file type for {} (expected .json or .csv)",
                path.display()
            ))),
        }
    }
}

/// Read JSON from a file, returning an error if the file doesn't exist
pub fn read_json_required<T, P>(path: P) -> SpendResult<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = open(path)?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| SpendError::Import(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Read expenses from any reader holding CSV with a header row
pub fn read_expenses_csv<R: Read>(reader: R) -> SpendResult<Vec<Expense>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut expenses = Vec::new();
    for (index, row) in csv_reader.deserialize().enumerate() {
        // Row 1 is the header
        let expense: Expense = row
            .map_err(|e| SpendError::Import(format!("Invalid CSV row {}: {}", index + 2, e)))?;
        expenses.push(expense);
    }
    Ok(expenses)
}

/// Load expenses from a JSON or CSV file
pub fn read_expenses<P: AsRef<Path>>(path: P) -> SpendResult<Vec<Expense>> {
    let path = path.as_ref();
    match FileFormat::from_path(path)? {
        FileFormat::Json => read_json_required(path),
        FileFormat::Csv => read_expenses_csv(BufReader::new(open(path)?)),
    }
}

fn open(path: &Path) -> SpendResult<File> {
    if !path.exists() {
        return Err(SpendError::Import(format!(
            "File not found: {}",
            path.display()
        )));
    }
    File::open(path)
        .map_err(|e| SpendError::Io(format!("Failed to open {}: {}", path.display(), e)))
}
