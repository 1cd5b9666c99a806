use std::collections::HashMap;
use std::io::Cursor;

use calamine::{Data, DataType, Reader, open_workbook_auto_from_rs};

use crate::columns::Column;
use crate::error::SheetError;

/// A non-blank data row keyed by [`Column::key`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    /// 1-based row number as shown by spreadsheet applications
    pub number: u32,
    values: HashMap<&'static str, String>,
}

impl SheetRow {
    /// Trimmed cell value, `None` when the column is absent or the cell is blank
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }
}

/// Read the first worksheet of a workbook held in memory.
///
/// The first non-empty row is the header row. Every header cell is matched
/// against `columns`; unknown headers are ignored and missing required
/// columns are reported together.
pub fn read_rows(bytes: &[u8], columns: &[Column]) -> Result<Vec<SheetRow>, SheetError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SheetError::NoWorksheet)??;

    let first_row = range.start().map_or(0, |(row, _)| row);
    let mut rows = range
        .rows()
        .enumerate()
        .map(|(idx, cells)| (first_row + idx as u32 + 1, cells))
        .skip_while(|(_, cells)| is_blank(cells));

    let (_, header) = rows.next().ok_or(SheetError::EmptySheet)?;
    let header: Vec<String> = header.iter().map(cell_to_string).collect();

    let mut positions: Vec<(&'static str, usize)> = Vec::with_capacity(columns.len());
    let mut missing = Vec::new();
    for column in columns {
        match header.iter().position(|cell| column.matches_header(cell)) {
            Some(idx) => positions.push((column.key, idx)),
            None if column.required => missing.push(column.label_en),
            None => {}
        }
    }
    if !missing.is_empty() {
        return Err(SheetError::MissingColumns(missing));
    }

    Ok(rows
        .filter(|(_, cells)| !is_blank(cells))
        .map(|(number, cells)| {
            let values = positions
                .iter()
                .map(|&(key, idx)| (key, cells.get(idx).map(cell_to_string).unwrap_or_default()))
                .collect();
            SheetRow { number, values }
        })
        .collect())
}

fn is_blank(cells: &[Data]) -> bool {
    cells.iter().all(|cell| cell_to_string(cell).trim().is_empty())
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(value) => value.clone(),
        Data::Float(value) => format_number(*value),
        Data::Int(value) => value.to_string(),
        Data::Bool(value) => value.to_string(),
        Data::DateTime(_) | Data::DateTimeIso(_) => cell
            .as_date()
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| cell.to_string()),
        _ => String::new(),
    }
}

// Identity numbers typed into numeric cells must not come back as "123.0"
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

/// Parse a yes/no cell in English or Arabic
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "yes" | "y" | "true" | "1" | "نعم" => Some(true),
        "no" | "n" | "false" | "0" | "لا" => Some(false),
        _ => None,
    }
}

/// Parse an integer cell, accepting integral decimals such as `7.0`
pub fn parse_int(value: &str) -> Option<i32> {
    let value = value.trim();
    if let Ok(parsed) = value.parse::<i32>() {
        return Some(parsed);
    }
    let parsed = value.parse::<f64>().ok()?;
    (parsed.fract() == 0.0 && parsed >= f64::from(i32::MIN) && parsed <= f64::from(i32::MAX))
        .then_some(parsed as i32)
}

#[cfg(test)]
mod tests {
    use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

    use super::*;
    use crate::columns::{CHILD_COLUMNS, PREGNANT_WOMAN_COLUMNS};

    fn workbook_bytes(build: impl FnOnce(&mut rust_xlsxwriter::Worksheet)) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        build(worksheet);
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn test_reads_rows_with_english_headers() {
        let bytes = workbook_bytes(|ws| {
            let headers = [
                "Full Name",
                "ID Number",
                "Health Status",
                "Pregnancy Month",
                "Husband Name",
                "Husband ID",
            ];
            for (col, header) in (0u16..).zip(headers) {
                ws.write_string(0, col, header).unwrap();
            }
            ws.write_string(1, 0, "Mona Ali").unwrap();
            ws.write_number(1, 1, 123456789.0).unwrap();
            ws.write_string(1, 2, "good").unwrap();
            ws.write_number(1, 3, 5.0).unwrap();
            ws.write_string(1, 4, "Ali Hassan").unwrap();
            ws.write_string(1, 5, "987654321").unwrap();
        });

        let rows = read_rows(&bytes, PREGNANT_WOMAN_COLUMNS).unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.number, 2);
        assert_eq!(row.get("fullName"), Some("Mona Ali"));
        assert_eq!(row.get("idNumber"), Some("123456789"));
        assert_eq!(row.get("pregnancyMonth"), Some("5"));
        assert_eq!(row.get("healthNotes"), None);
        assert_eq!(row.get("camp"), None);
    }

    #[test]
    fn test_header_row_may_be_preceded_by_blank_rows() {
        let bytes = workbook_bytes(|ws| {
            for (col, column) in (0u16..).zip(CHILD_COLUMNS) {
                ws.write_string(2, col, column.label_ar).unwrap();
            }
            ws.write_string(3, 0, "Sara").unwrap();
            ws.write_string(3, 1, "111").unwrap();
            let date_format = Format::new().set_num_format("yyyy-mm-dd");
            let dob = ExcelDateTime::from_ymd(2021, 3, 9).unwrap();
            ws.write_datetime_with_format(3, 2, &dob, &date_format).unwrap();
            ws.write_string(3, 9, "نعم").unwrap();
            // blank separator row, then a second child
            ws.write_string(5, 0, "Omar").unwrap();
        });

        let rows = read_rows(&bytes, CHILD_COLUMNS).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].number, 4);
        assert_eq!(rows[0].get("dateOfBirth"), Some("2021-03-09"));
        assert_eq!(rows[0].get("isBreastfeeding").and_then(parse_bool), Some(true));
        assert_eq!(rows[1].number, 6);
        assert_eq!(rows[1].get("fullName"), Some("Omar"));
    }

    #[test]
    fn test_missing_required_columns_are_listed() {
        let bytes = workbook_bytes(|ws| {
            ws.write_string(0, 0, "fullName").unwrap();
            ws.write_string(0, 1, "idNumber").unwrap();
        });

        let err = read_rows(&bytes, PREGNANT_WOMAN_COLUMNS).unwrap_err();
        match err {
            SheetError::MissingColumns(missing) => {
                assert_eq!(
                    missing,
                    vec!["Health Status", "Pregnancy Month", "Husband Name", "Husband ID"]
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_sheet() {
        let bytes = workbook_bytes(|_| {});
        assert!(matches!(
            read_rows(&bytes, CHILD_COLUMNS),
            Err(SheetError::EmptySheet)
        ));
    }

    #[test]
    fn test_garbage_bytes_are_rejected() {
        let err = read_rows(b"definitely not a workbook", CHILD_COLUMNS).unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("Yes"), Some(true));
        assert_eq!(parse_bool(" TRUE "), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("لا"), Some(false));
        assert_eq!(parse_bool("no"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("7"), Some(7));
        assert_eq!(parse_int(" 3.0 "), Some(3));
        assert_eq!(parse_int("3.5"), None);
        assert_eq!(parse_int("seven"), None);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(2.5), "2.5");
    }
}
