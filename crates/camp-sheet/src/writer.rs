use rust_xlsxwriter::Workbook;

use crate::columns::{Column, Locale};
use crate::error::SheetError;

/// A single value written below the header row
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Blank,
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<Option<String>> for CellValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Blank, Self::Text)
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

/// Write a single-sheet `.xlsx` workbook: localized headers, then `rows`.
///
/// Each row is written positionally against `columns`; extra cells are ignored.
pub fn write_sheet(
    sheet_name: &str,
    columns: &[Column],
    locale: Locale,
    rows: &[Vec<CellValue>],
) -> Result<Vec<u8>, SheetError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name)?;

    for (col, column) in (0u16..).zip(columns) {
        worksheet.write_string(0, col, column.label(locale))?;
    }

    for (row_idx, row) in (1u32..).zip(rows) {
        for (col, cell) in (0u16..).zip(row.iter().take(columns.len())) {
            match cell {
                CellValue::Text(value) => {
                    worksheet.write_string(row_idx, col, value)?;
                }
                CellValue::Number(value) => {
                    worksheet.write_number(row_idx, col, *value)?;
                }
                CellValue::Blank => {}
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}
