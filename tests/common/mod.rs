//! Common test utilities for the sheet-checker tests

use std::path::{Path, PathBuf};

use checker_lib::{CellValue, Sheet, SheetKind};
use rust_xlsxwriter::Workbook;
use sheet_checker::cli::{Args, OutputFormat};

pub use checker_lib::test_utils::conforming_sheet;

/// Write `sheets` as an .xlsx workbook at `dir/file_name`.
#[allow(dead_code)]
pub fn write_workbook(dir: &Path, file_name: &str, sheets: &[Sheet]) -> PathBuf {
    let mut workbook = Workbook::new();

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.name()).unwrap();

        for (col, header) in sheet.headers().iter().enumerate() {
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
    }

    let path = dir.join(file_name);
    workbook.save(&path).unwrap();
    path
}

#[allow(dead_code)]
pub fn conforming_workbook(dir: &Path, file_name: &str) -> PathBuf {
    write_workbook(
        dir,
        file_name,
        &[
            conforming_sheet(SheetKind::Referentiel, 3),
            conforming_sheet(SheetKind::Promo, 3),
        ],
    )
}

/// Arguments for `files`, writing the errors log inside `dir`.
#[allow(dead_code)]
pub fn create_args(dir: &Path, files: Vec<PathBuf>, format: OutputFormat) -> Args {
    Args {
        files,
        format,
        summary_csv: None,
        errors_log: dir.join("errors.log"),
        no_errors_log: false,
    }
}
