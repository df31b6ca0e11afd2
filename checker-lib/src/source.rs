use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use thiserror::Error;

use crate::sheet::{CellValue, Sheet};

const ISO_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("not a readable workbook: {0}")]
    InvalidWorkbook(String),

    #[error("worksheet named '{0}' not found")]
    SheetNotFound(String),

    #[error("error reading sheet '{sheet}': {message}")]
    Sheet { sheet: String, message: String },
}

/// Turns raw workbook bytes into a [`Sheet`].
pub trait TabularSource {
    fn decode(&self, bytes: &[u8], sheet_name: &str) -> Result<Sheet, DecodeError>;
}

/// Workbook decoder backed by calamine. The format (xlsb, xlsx, xls, ods) is
/// detected from the content.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalamineSource;

impl TabularSource for CalamineSource {
    fn decode(&self, bytes: &[u8], sheet_name: &str) -> Result<Sheet, DecodeError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
            .map_err(|e| DecodeError::InvalidWorkbook(e.to_string()))?;

        if !workbook.sheet_names().iter().any(|name| name == sheet_name) {
            return Err(DecodeError::SheetNotFound(sheet_name.to_string()));
        }

        let range = workbook
            .worksheet_range(sheet_name)
            .map_err(|e| DecodeError::Sheet {
                sheet: sheet_name.to_string(),
                message: e.to_string(),
            })?;

        let mut headers: Vec<String> = Vec::new();
        let mut rows: Vec<Vec<CellValue>> = Vec::new();

        for (row_index, row) in range.rows().enumerate() {
            if row_index == 0 {
                headers = row
                    .iter()
                    .enumerate()
                    .map(|(col_idx, cell)| header_name(col_idx, cell))
                    .collect();
                continue;
            }
            rows.push(row.iter().map(convert_cell).collect());
        }

        tracing::debug!(
            sheet = sheet_name,
            columns = headers.len(),
            rows = rows.len(),
            "decoded sheet"
        );

        Ok(Sheet::new(sheet_name, headers, rows))
    }
}

/// Blank header cells get a positional placeholder name.
fn header_name(col_idx: usize, cell: &Data) -> String {
    convert_cell(cell)
        .as_text()
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| format!("Unnamed: {col_idx}"))
}

pub(crate) fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Blank,
        Data::Error(_) => CellValue::Blank,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(if *b { "True" } else { "False" }.to_string()),
        Data::DateTime(dt) => match excel_datetime_to_chrono(dt) {
            Some(datetime) => CellValue::Text(datetime.format(ISO_DATETIME_FORMAT).to_string()),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(dt_str) => CellValue::Text(dt_str.clone()),
        Data::DurationIso(dur_str) => CellValue::Text(dur_str.clone()),
    }
}

/// Serial dates outside chrono's range give `None`.
fn excel_datetime_to_chrono(dt: &calamine::ExcelDateTime) -> Option<chrono::NaiveDateTime> {
    use chrono::{NaiveDate, TimeDelta};
    let excel_base = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let value = dt.as_f64();
    if !value.is_finite() {
        return None;
    }
    let days = value.trunc();
    let seconds = ((value - days) * 86400.0).round();
    excel_base
        .checked_add_signed(TimeDelta::try_days(days as i64)?)?
        .checked_add_signed(TimeDelta::try_seconds(seconds as i64)?)
}
