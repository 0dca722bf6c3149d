//! Reading exported CSV files back.

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::ExportError;
use crate::writer::UTF8_BOM;

/// An exported CSV file: header plus string rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// The cell under `column` in row `row`.
    #[must_use]
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.header.iter().position(|h| h == column)?;
        self.rows.get(row)?.get(idx).map(String::as_str)
    }

    /// Rows as JSON objects keyed by header. Every value is a string.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let objects = self
            .rows
            .iter()
            .map(|row| {
                let object: Map<String, Value> = self
                    .header
                    .iter()
                    .zip(row)
                    .map(|(key, value)| (key.clone(), Value::String(value.clone())))
                    .collect();
                Value::Object(object)
            })
            .collect();
        Value::Array(objects)
    }
}

/// Reads a CSV written by [`crate::write_csv`]. A leading BOM is stripped.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the file cannot be read or
/// [`ExportError::Csv`] if it is not valid CSV.
pub fn read_csv(path: &Path) -> Result<CsvTable, ExportError> {
    let bytes = std::fs::read(path).map_err(|e| ExportError::io(path, e))?;
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes[..]);

    let mut reader = csv::Reader::from_reader(body);
    let header = reader.headers()?.iter().map(str::to_owned).collect();
    let rows = reader
        .records()
        .map(|record| record.map(|r| r.iter().map(str::to_owned).collect()))
        .collect::<Result<Vec<Vec<String>>, csv::Error>>()?;

    Ok(CsvTable { header, rows })
}
