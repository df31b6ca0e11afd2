//! Common test utilities for the checker-lib integration tests

use checker_lib::{CellValue, FileValidator, Sheet};
use rust_xlsxwriter::{Format, Workbook};

// Re-export shared test utilities from src/test_utils.rs
#[allow(unused_imports)]
pub use checker_lib::test_utils::{
    InMemorySource, SheetBuilder, conforming_sheet, metadata_rows, sheet_with_column,
};

/// Serialize `sheets` into real .xlsx bytes, one worksheet per sheet.
/// Blank cells are left unwritten.
#[allow(dead_code)]
pub fn workbook_bytes(sheets: &[Sheet]) -> Vec<u8> {
    workbook_bytes_with_dates(sheets, &[])
}

/// A date-formatted serial to write over a sheet cell: (sheet name, data row,
/// column, serial).
pub type DateCell<'a> = (&'a str, usize, &'a str, f64);

/// Like [`workbook_bytes`], with some cells written as `yyyy-mm-dd` dates.
#[allow(dead_code)]
pub fn workbook_bytes_with_dates(sheets: &[Sheet], dates: &[DateCell]) -> Vec<u8> {
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let mut workbook = Workbook::new();

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.name()).unwrap();

        for (col, header) in sheet.headers().iter().enumerate() {
            if header.is_empty() {
                continue;
            }
            worksheet.write_string(0, col as u16, header).unwrap();
        }

        for (row_index, row) in sheet.rows().iter().enumerate() {
            let excel_row = (row_index + 1) as u32;
            for (col, cell) in row.iter().enumerate() {
                match cell {
                    CellValue::Blank => {}
                    CellValue::Text(text) => {
                        worksheet.write_string(excel_row, col as u16, text).unwrap();
                    }
                    CellValue::Number(number) => {
                        worksheet.write_number(excel_row, col as u16, *number).unwrap();
                    }
                }
            }
        }

        for (_, row, column, serial) in dates.iter().filter(|date| date.0 == sheet.name()) {
            let col = sheet.column_index(column).unwrap() as u16;
            worksheet
                .write_number_with_format((row + 1) as u32, col, *serial, &date_format)
                .unwrap();
        }
    }

    workbook.save_to_buffer().unwrap()
}

/// Calamine-backed validator that leaves the errors log alone.
#[allow(dead_code)]
pub fn create_validator() -> FileValidator {
    FileValidator::builder().without_errors_log().build()
}

/// Copy of `sheet` with `value` written at (`row`, `column`).
#[allow(dead_code)]
pub fn with_cell(sheet: &Sheet, row: usize, column: &str, value: CellValue) -> Sheet {
    let headers: Vec<&str> = sheet.headers().iter().map(String::as_str).collect();
    let mut rows = sheet.rows().to_vec();
    let column_index = sheet.column_index(column).unwrap();
    rows[row][column_index] = value;
    SheetBuilder::new(sheet.name())
        .headers(&headers)
        .rows(rows)
        .build()
}
