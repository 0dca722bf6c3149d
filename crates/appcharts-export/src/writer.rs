//! CSV and JSON file output.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use appcharts_core::OutputFormat;

use crate::error::ExportError;
use crate::row::ExportRow;

/// Leads every CSV file so spreadsheet tools detect UTF-8.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes `records` as CSV: BOM, header row, one row per record.
///
/// The header comes from the first record. An existing file is overwritten.
///
/// # Errors
///
/// Returns [`ExportError::Empty`] for an empty batch, [`ExportError::Io`] if
/// the file cannot be created, or [`ExportError::Csv`] if a row fails to
/// write.
pub fn write_csv<R: ExportRow>(path: &Path, records: &[R]) -> Result<(), ExportError> {
    let first = records.first().ok_or(ExportError::Empty)?;

    let mut file = File::create(path).map_err(|e| ExportError::io(path, e))?;
    file.write_all(UTF8_BOM).map_err(|e| ExportError::io(path, e))?;

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(first.header())?;
    for record in records {
        writer.write_record(record.row())?;
    }
    writer.flush().map_err(|e| ExportError::io(path, e))?;
    Ok(())
}

/// Writes `records` as a 2-space indented JSON array. Non-ASCII text is
/// written as-is.
///
/// # Errors
///
/// Returns [`ExportError::Empty`] for an empty batch, [`ExportError::Io`] if
/// the file cannot be written, or [`ExportError::Json`] on serialization
/// failure.
pub fn write_json<R: ExportRow>(path: &Path, records: &[R]) -> Result<(), ExportError> {
    if records.is_empty() {
        return Err(ExportError::Empty);
    }
    let file = File::create(path).map_err(|e| ExportError::io(path, e))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, records)?;
    out.write_all(b"\n").map_err(|e| ExportError::io(path, e))?;
    out.flush().map_err(|e| ExportError::io(path, e))?;
    Ok(())
}

/// Best-effort export: creates the parent directory, writes the file, and
/// logs any failure instead of returning it.
///
/// Returns the written path, or `None` when nothing was written.
pub fn export<R: ExportRow>(path: &Path, format: OutputFormat, records: &[R]) -> Option<PathBuf> {
    if records.is_empty() {
        tracing::warn!(path = %path.display(), "no records to export");
        return None;
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = fs::create_dir_all(parent) {
            tracing::error!(
                dir = %parent.display(),
                error = %e,
                "failed to create export directory"
            );
            return None;
        }
    }

    let result = match format {
        OutputFormat::Csv => write_csv(path, records),
        OutputFormat::Json => write_json(path, records),
    };
    match result {
        Ok(()) => {
            tracing::info!(
                path = %path.display(),
                count = records.len(),
                format = format.extension(),
                "export written"
            );
            Some(path.to_path_buf())
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "export failed");
            None
        }
    }
}
