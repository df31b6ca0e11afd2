use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::region::{RegionError, UsefulRegion};
use crate::report::{
    CheckStatus, ClientCodeCheck, DuplicateColumnsCheck, NumericColumnCheck,
    RequiredColumnsCheck, SheetChecks,
};
use crate::schema::{SheetKind, VALID_CLIENT_CODES, excel_row_number};
use crate::sheet::Sheet;

/// Sample size for offending values in a numeric column report.
const MAX_NON_NUMERIC_SAMPLES: usize = 10;

static DIGITS_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("Hardcode regex pattern"));

/// Runs the fixed rule set against one decoded sheet.
///
/// Every check is read-only; the same validator can run them in any order.
pub struct SheetValidator<'a> {
    sheet: &'a Sheet,
}

impl<'a> SheetValidator<'a> {
    pub fn new(sheet: &'a Sheet) -> Self {
        SheetValidator { sheet }
    }

    /// Run every check configured for `kind`.
    pub fn run(&self, kind: SheetKind) -> SheetChecks {
        let checks = SheetChecks {
            duplicate_columns: self.check_duplicate_columns(),
            required_columns: self.check_required_columns(kind.required_columns()),
            client_codes: self.check_client_codes(kind.anchor_column(), VALID_CLIENT_CODES),
            numeric_columns: self
                .check_numeric_columns(kind.numeric_columns(), kind.anchor_column()),
            row_count: self.sheet.row_count(),
        };

        tracing::debug!(
            sheet = self.sheet.name(),
            failed_checks = checks.failed_check_count(),
            "sheet checks done"
        );

        checks
    }

    //////////////////////////////////////////////////////////////
    ///  Header checks
    //////////////////////////////////////////////////////////////

    /// Names appearing more than once in `headers`, each listed once, in the
    /// order their first repeat shows up.
    pub fn find_duplicate_headers(headers: &[String]) -> Vec<String> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut duplicates: Vec<String> = Vec::new();

        for header in headers {
            if !seen.insert(header.as_str()) && !duplicates.contains(header) {
                duplicates.push(header.clone());
            }
        }

        duplicates
    }

    pub fn check_duplicate_columns(&self) -> DuplicateColumnsCheck {
        let duplicate_columns = Self::find_duplicate_headers(self.sheet.headers());

        let details = if duplicate_columns.is_empty() {
            "No duplicate columns detected".to_string()
        } else {
            format!(
                "Duplicate columns detected: {}",
                duplicate_columns.join(", ")
            )
        };

        DuplicateColumnsCheck {
            status: CheckStatus::from_errors(!duplicate_columns.is_empty()),
            duplicate_columns,
            details,
        }
    }

    /// Required columns missing from the header, in `required` order.
    pub fn check_required_columns(&self, required: &[&str]) -> RequiredColumnsCheck {
        let missing_columns: Vec<String> = required
            .iter()
            .filter(|column| !self.sheet.has_column(column))
            .map(|column| column.to_string())
            .collect();

        RequiredColumnsCheck {
            sheet_name: self.sheet.name().to_string(),
            missing_count: missing_columns.len(),
            required_count: required.len(),
            status: CheckStatus::from_errors(!missing_columns.is_empty()),
            missing_columns,
        }
    }

    //////////////////////////////////////////////////////////////
    ///  Value checks
    //////////////////////////////////////////////////////////////

    /// Every non-blank `anchor` cell of the useful region must be one of
    /// `valid_codes` (exact match after trimming). Blank cells inside the
    /// region are errors too.
    pub fn check_client_codes(&self, anchor: &str, valid_codes: &[&str]) -> ClientCodeCheck {
        let Some(column_index) = self.sheet.column_index(anchor) else {
            return ClientCodeCheck::without_region(
                anchor,
                CheckStatus::Absent,
                format!("Column {anchor} is missing"),
            );
        };

        let region = match UsefulRegion::resolve(self.sheet, anchor) {
            Ok(region) => region,
            Err(e @ RegionError::Empty { .. }) => {
                return ClientCodeCheck::without_region(anchor, CheckStatus::Error, e.to_string());
            }
            Err(e @ RegionError::AbsentColumn { .. }) => {
                return ClientCodeCheck::without_region(anchor, CheckStatus::Absent, e.to_string());
            }
        };

        let mut blank_rows: Vec<usize> = Vec::new();
        let mut invalid_rows: Vec<usize> = Vec::new();
        let mut invalid_values: Vec<String> = Vec::new();

        for &row in region.rows() {
            let cell = self.sheet.cell(row, column_index);
            if cell.is_blank() {
                blank_rows.push(excel_row_number(row));
                continue;
            }

            let value = cell.as_text().unwrap_or_default();
            let code = value.trim();
            if !valid_codes.contains(&code) {
                invalid_rows.push(excel_row_number(row));
                if !invalid_values.iter().any(|v| v == code) {
                    invalid_values.push(code.to_string());
                }
            }
        }

        let zone = format!(
            "Analyzed zone: {} rows (up to Excel row {})",
            region.len(),
            region.last_excel_row().unwrap_or_default()
        );

        let has_errors = !blank_rows.is_empty() || !invalid_rows.is_empty();
        let details = if has_errors {
            let mut parts: Vec<String> = Vec::new();
            if !blank_rows.is_empty() {
                parts.push(format!(
                    "{} blank rows (Excel rows: {:?})",
                    blank_rows.len(),
                    blank_rows
                ));
            }
            if !invalid_rows.is_empty() {
                parts.push(format!(
                    "{} invalid codes: {:?} (Excel rows: {:?})",
                    invalid_rows.len(),
                    invalid_values,
                    invalid_rows
                ));
            }
            parts.push(zone);
            parts.join(" | ")
        } else {
            format!("All client codes are valid (metadata rows excluded). {zone}")
        };

        tracing::debug!(
            column = anchor,
            blanks = blank_rows.len(),
            invalid = invalid_rows.len(),
            "client code check"
        );

        ClientCodeCheck {
            column: anchor.to_string(),
            status: CheckStatus::from_errors(has_errors),
            details,
            blank_rows,
            invalid_rows,
            invalid_values,
            analyzed_rows: Some(region.len()),
            last_useful_row: region.last_excel_row(),
        }
    }

    /// Every cell of `columns` inside the region must be digits only.
    ///
    /// The region is bounded by `reference_anchor` when that column exists and
    /// holds data; otherwise the whole sheet below the metadata rows is
    /// checked. A blank cell is a non-numeric value.
    pub fn check_numeric_columns(
        &self,
        columns: &[&str],
        reference_anchor: &str,
    ) -> Vec<NumericColumnCheck> {
        let region = UsefulRegion::resolve(self.sheet, reference_anchor).unwrap_or_else(|e| {
            tracing::debug!(reason = %e, "numeric checks fall back to the whole sheet");
            UsefulRegion::excluded_only(self.sheet)
        });

        columns
            .iter()
            .map(|column| self.check_numeric_column(column, &region))
            .collect()
    }

    fn check_numeric_column(&self, column: &str, region: &UsefulRegion) -> NumericColumnCheck {
        let Some(column_index) = self.sheet.column_index(column) else {
            return NumericColumnCheck {
                column: column.to_string(),
                status: CheckStatus::Absent,
                error_count: 0,
                error_rows: Vec::new(),
                non_numeric_values: Vec::new(),
                analyzed_rows: None,
            };
        };

        let mut error_rows: Vec<usize> = Vec::new();
        let mut non_numeric_values: Vec<String> = Vec::new();

        for &row in region.rows() {
            let text = self.sheet.cell(row, column_index).as_text();
            let value = text.as_deref().map(str::trim);

            if value.is_some_and(|v| DIGITS_ONLY.is_match(v)) {
                continue;
            }

            error_rows.push(excel_row_number(row));
            if let Some(v) = value {
                if !v.is_empty() && !non_numeric_values.iter().any(|seen| seen == v) {
                    non_numeric_values.push(v.to_string());
                }
            }
        }

        non_numeric_values.truncate(MAX_NON_NUMERIC_SAMPLES);

        NumericColumnCheck {
            column: column.to_string(),
            status: CheckStatus::from_errors(!error_rows.is_empty()),
            error_count: error_rows.len(),
            error_rows,
            non_numeric_values,
            analyzed_rows: Some(region.len()),
        }
    }
}
