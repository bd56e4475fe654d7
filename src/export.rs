//! CSV Export
//!
//! Flattens the whole record collection into a spreadsheet-friendly table:
//! the column set is the union of every record's keys in alphabetical order,
//! and the output starts with a UTF-8 byte-order mark so spreadsheet tools
//! decode non-ASCII exercise names correctly.

use serde_json::Value;
use std::collections::BTreeSet;
use thiserror::Error;

use crate::storage::ExerciseRecord;

/// UTF-8 byte-order mark
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Errors that can occur while exporting
#[derive(Error, Debug)]
pub enum ExportError {
    /// Nothing to export
    #[error("No data")]
    NoData,

    /// CSV encoding failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Buffer flush failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Render a single cell. Missing and null values are empty; nested values are JSON.
fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Encode records as BOM-prefixed CSV
pub fn records_to_csv(records: &[ExerciseRecord]) -> Result<Vec<u8>, ExportError> {
    if records.is_empty() {
        return Err(ExportError::NoData);
    }

    let rows: Vec<_> = records.iter().map(ExerciseRecord::fields).collect();

    let headers: BTreeSet<&str> = rows
        .iter()
        .flat_map(|row| row.keys().map(String::as_str))
        .collect();

    let mut buffer = UTF8_BOM.to_vec();
    {
        let mut writer = csv::Writer::from_writer(&mut buffer);
        writer.write_record(&headers)?;
        for row in &rows {
            writer.write_record(headers.iter().map(|key| cell(row.get(*key))))?;
        }
        writer.flush()?;
    }

    tracing::debug!(rows = rows.len(), columns = headers.len(), "Exported records to CSV");
    Ok(buffer)
}
