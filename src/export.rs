//! File export for row collections and digests.

use std::fs;
use std::path::Path;

use jiff::civil::Date;

use crate::error::{Result, ScopeError};
use crate::table::{Row, Value};

/// Default file name for the tariff comparison export.
pub const TARIFFS_CSV: &str = "tariffs.csv";

/// Separator for list values inside a single CSV field.
pub const LIST_SEPARATOR: &str = ";";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
}

fn field_text(value: &Value) -> String {
    match value {
        Value::List(items) => items.join(LIST_SEPARATOR),
        other => other.raw_text(),
    }
}

/// Render `rows` as CSV text.
///
/// The header is the key order of the first row; every row is written in
/// that order, with absent keys as empty fields.
pub fn rows_to_csv(rows: &[Row]) -> Result<String> {
    let Some(first) = rows.first() else {
        return Err(ScopeError::NothingToExport);
    };
    let keys: Vec<&str> = first.keys().collect();

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&keys)?;
    for row in rows {
        writer.write_record(keys.iter().map(|key| field_text(row.get(key))))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ScopeError::Io(err.into_error()))?;
    String::from_utf8(bytes).map_err(|err| ScopeError::Other(err.to_string()))
}

/// Write `rows` to `path`. An empty collection is rejected and no file is
/// created.
pub fn export_rows(rows: &[Row], path: &Path, format: ExportFormat) -> Result<usize> {
    let content = match format {
        ExportFormat::Csv => rows_to_csv(rows)?,
    };
    fs::write(path, content)?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "exported rows");
    Ok(rows.len())
}

/// Write markdown `content` to `path` as-is.
pub fn export_markdown(content: &str, path: &Path) -> Result<()> {
    fs::write(path, content)?;
    Ok(())
}

/// `digest-YYYY-MM-DD.md`
pub fn digest_filename(date: Date) -> String {
    format!("digest-{date}.md")
}
