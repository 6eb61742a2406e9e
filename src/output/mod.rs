//! Output module
//!
//! Writes harvested records to disk.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Rendering records as an `.xlsx` workbook with a styled table
//! - Rendering records as JSON
//! - Saving with a bounded retry when the file is held open elsewhere

mod lock;
mod writer;

pub use lock::{save_with_retry, LockNotifier, LockRetryPolicy, LogNotifier, PromptNotifier};
pub use writer::{
    record_row, render_json, render_records, render_spreadsheet, write_bytes, write_json,
    write_records, write_spreadsheet, CellValue, SpreadsheetConfig, COLUMNS, MISSING_VALUE,
};
