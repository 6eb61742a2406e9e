//! Spreadsheet and JSON writers
//!
//! Output is rendered to bytes first and written in one step, so a save
//! that fails on a locked file can be repeated without rendering again.

use crate::error::Result;
use crate::search::{Field, RepositoryRecord};
use crate::types::OutputFormat;
use chrono::{DateTime, SecondsFormat, Utc};
use rust_xlsxwriter::{Table, TableColumn, TableStyle, Workbook};
use std::fs;
use std::path::Path;

/// Column headers, in record field order
pub const COLUMNS: [&str; 13] = [
    "id",
    "name",
    "full_name",
    "description",
    "stargazers_count",
    "forks_count",
    "language",
    "updated_at",
    "owner_login",
    "owner_html_url",
    "created_at",
    "pushed_at",
    "html_url",
];

/// Shown in place of a key the API left out; `null` values are left blank
pub const MISSING_VALUE: &str = "N/A";

const WORKSHEET_NAME: &str = "Repositories";

/// One spreadsheet cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Blank,
}

/// Cells for one record, in `COLUMNS` order
pub fn record_row(record: &RepositoryRecord) -> Vec<CellValue> {
    vec![
        CellValue::Number(record.id as f64),
        CellValue::Text(record.name.clone()),
        CellValue::Text(record.full_name.clone()),
        field_cell(&record.description, |s| CellValue::Text(s.clone())),
        field_cell(&record.star_count, |n| CellValue::Number(*n as f64)),
        field_cell(&record.fork_count, |n| CellValue::Number(*n as f64)),
        field_cell(&record.primary_language, |s| CellValue::Text(s.clone())),
        field_cell(&record.updated_at, timestamp_cell),
        CellValue::Text(record.owner_login.clone()),
        CellValue::Text(record.owner_url.clone()),
        timestamp_cell(&record.created_at),
        record.pushed_at.as_ref().map_or(CellValue::Blank, timestamp_cell),
        CellValue::Text(record.html_url.clone()),
    ]
}

fn field_cell<T>(field: &Field<T>, cell: impl FnOnce(&T) -> CellValue) -> CellValue {
    match field {
        Field::Value(value) => cell(value),
        Field::Null => CellValue::Blank,
        Field::Missing => CellValue::Text(MISSING_VALUE.to_string()),
    }
}

fn timestamp_cell(ts: &DateTime<Utc>) -> CellValue {
    CellValue::Text(format_timestamp(ts))
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Table settings for the spreadsheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetConfig {
    table_name: String,
    banded_rows: bool,
    banded_columns: bool,
}

impl Default for SpreadsheetConfig {
    fn default() -> Self {
        Self {
            table_name: "RepoTable".to_string(),
            banded_rows: true,
            banded_columns: true,
        }
    }
}

impl SpreadsheetConfig {
    /// Create a config with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the table name
    #[must_use]
    pub fn with_table_name(mut self, name: impl Into<String>) -> Self {
        self.table_name = name.into();
        self
    }

    /// Enable or disable row stripes
    #[must_use]
    pub fn with_banded_rows(mut self, enabled: bool) -> Self {
        self.banded_rows = enabled;
        self
    }

    /// Enable or disable column stripes
    #[must_use]
    pub fn with_banded_columns(mut self, enabled: bool) -> Self {
        self.banded_columns = enabled;
        self
    }

    /// Table name
    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

/// Render records as an `.xlsx` workbook.
///
/// With no records only the header row is written; a table needs at least
/// one data row.
pub fn render_spreadsheet(records: &[RepositoryRecord], config: &SpreadsheetConfig) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(WORKSHEET_NAME)?;

    if records.is_empty() {
        for (col, name) in COLUMNS.iter().enumerate() {
            worksheet.write_string(0, col as u16, *name)?;
        }
    } else {
        for (index, record) in records.iter().enumerate() {
            let row = index as u32 + 1;
            for (col, cell) in record_row(record).into_iter().enumerate() {
                let col = col as u16;
                match cell {
                    CellValue::Number(n) => {
                        worksheet.write_number(row, col, n)?;
                    }
                    CellValue::Text(text) => {
                        worksheet.write_string(row, col, text)?;
                    }
                    CellValue::Blank => {}
                }
            }
        }

        let columns: Vec<TableColumn> = COLUMNS
            .iter()
            .map(|name| TableColumn::new().set_header(*name))
            .collect();
        let table = Table::new()
            .set_name(config.table_name.as_str())
            .set_style(TableStyle::Medium9)
            .set_banded_rows(config.banded_rows)
            .set_banded_columns(config.banded_columns)
            .set_columns(&columns);

        worksheet.add_table(
            0,
            0,
            records.len() as u32,
            (COLUMNS.len() - 1) as u16,
            &table,
        )?;
    }

    worksheet.autofit();
    Ok(workbook.save_to_buffer()?)
}

/// Render records as a pretty-printed JSON array
pub fn render_json(records: &[RepositoryRecord]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(records)?)
}

/// Render records in the given format
pub fn render_records(
    format: OutputFormat,
    records: &[RepositoryRecord],
    config: &SpreadsheetConfig,
) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Xlsx => render_spreadsheet(records, config),
        OutputFormat::Json => render_json(records),
    }
}

/// Write rendered output, creating the parent directory if needed
pub fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, bytes)?;
    Ok(())
}

/// Write records as an `.xlsx` workbook, returning the number of rows written
pub fn write_spreadsheet(
    path: impl AsRef<Path>,
    records: &[RepositoryRecord],
    config: &SpreadsheetConfig,
) -> Result<usize> {
    let bytes = render_spreadsheet(records, config)?;
    write_bytes(path.as_ref(), &bytes)?;
    Ok(records.len())
}

/// Write records as a JSON array, returning the number of records written
pub fn write_json(path: impl AsRef<Path>, records: &[RepositoryRecord]) -> Result<usize> {
    let bytes = render_json(records)?;
    write_bytes(path.as_ref(), &bytes)?;
    Ok(records.len())
}

/// Write records in the given format
pub fn write_records(
    path: impl AsRef<Path>,
    format: OutputFormat,
    records: &[RepositoryRecord],
    config: &SpreadsheetConfig,
) -> Result<usize> {
    match format {
        OutputFormat::Xlsx => write_spreadsheet(path, records, config),
        OutputFormat::Json => write_json(path, records),
    }
}
