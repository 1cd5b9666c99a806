//! Spreadsheet layer for camp registry bulk import and export
//!
//! This crate knows nothing about HTTP or the database. It translates between
//! workbook bytes (`.xlsx`, `.xls`, `.ods`) and string-keyed rows described by a
//! [`Column`] catalogue, so the API layer can validate rows exactly like JSON
//! payloads.

mod columns;
mod error;
mod reader;
mod writer;

pub use columns::{CHILD_COLUMNS, Column, Locale, PREGNANT_WOMAN_COLUMNS};
pub use error::SheetError;
pub use reader::{SheetRow, parse_bool, parse_int, read_rows};
pub use writer::{CellValue, write_sheet};

/// File extensions accepted by [`read_rows`]
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["xlsx", "xls", "ods"];

/// Whether `file_name` ends with one of [`SUPPORTED_EXTENSIONS`] (case-insensitive)
pub fn is_supported_file_name(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()))
}
