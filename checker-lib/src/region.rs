use thiserror::Error;

use crate::schema::{EXCLUDED_EXCEL_ROWS, EXCEL_ROW_OFFSET, excel_row_number};
use crate::sheet::Sheet;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegionError {
    #[error("No data found in {column}")]
    Empty { column: String },

    #[error("Column {column} is missing")]
    AbsentColumn { column: String },
}

/// Data rows that value checks look at: the metadata block below the header
/// is dropped, and so is the padding after the last row where the anchor
/// column is filled.
///
/// Row indices are 0-based data row positions in the source sheet, in
/// ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsefulRegion {
    rows: Vec<usize>,
}

impl UsefulRegion {
    /// Every data row except the fixed metadata block.
    ///
    /// Positions past the end of a short sheet are simply not there to drop.
    pub fn excluded_only(sheet: &Sheet) -> Self {
        let rows = (0..sheet.row_count())
            .filter(|index| !is_excluded(*index))
            .collect();
        UsefulRegion { rows }
    }

    /// Resolve the region of `sheet` bounded by `anchor`.
    pub fn resolve(sheet: &Sheet, anchor: &str) -> Result<Self, RegionError> {
        Self::excluded_only(sheet).narrow(sheet, anchor)
    }

    /// Cut the rows after the last non-blank `anchor` cell.
    ///
    /// Blank anchor cells before that row stay in the region. Applying this
    /// twice with the same anchor gives the same region.
    pub fn narrow(self, sheet: &Sheet, anchor: &str) -> Result<Self, RegionError> {
        let column_index = sheet
            .column_index(anchor)
            .ok_or_else(|| RegionError::AbsentColumn {
                column: anchor.to_string(),
            })?;

        let last_filled = self
            .rows
            .iter()
            .copied()
            .filter(|row| !sheet.cell(*row, column_index).is_blank())
            .max()
            .ok_or_else(|| RegionError::Empty {
                column: anchor.to_string(),
            })?;

        let rows = self
            .rows
            .into_iter()
            .filter(|row| *row <= last_filled)
            .collect();

        Ok(UsefulRegion { rows })
    }

    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Excel row number of the last row in the region.
    pub fn last_excel_row(&self) -> Option<usize> {
        self.rows.last().map(|row| excel_row_number(*row))
    }
}

fn is_excluded(data_row_index: usize) -> bool {
    EXCLUDED_EXCEL_ROWS.contains(&(data_row_index + EXCEL_ROW_OFFSET))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{metadata_rows, sheet_with_column};

    #[test]
    fn test_metadata_rows_are_excluded() {
        let sheet = sheet_with_column("CODECLIENT", &["a", "b", "c", "d", "e", "FRCA", "FRCH"]);
        let region = UsefulRegion::resolve(&sheet, "CODECLIENT").unwrap();
        assert_eq!(region.rows(), &[5, 6]);
        assert_eq!(region.last_excel_row(), Some(8));
    }

    #[test]
    fn test_trailing_padding_is_cut() {
        let mut values = metadata_rows();
        values.extend(["FRCA", "", "FRCH", "", "  ", ""]);
        let sheet = sheet_with_column("CODECLIENT", &values);

        let region = UsefulRegion::resolve(&sheet, "CODECLIENT").unwrap();
        // interior blank at index 6 stays, padding after index 7 goes
        assert_eq!(region.rows(), &[5, 6, 7]);
        assert_eq!(region.len(), 3);
        assert_eq!(region.last_excel_row(), Some(9));
    }

    #[test]
    fn test_short_sheet_inside_exclusion_window() {
        let sheet = sheet_with_column("CLIENT", &["FRCA", "FRCH"]);
        assert!(UsefulRegion::excluded_only(&sheet).is_empty());
        assert_eq!(
            UsefulRegion::resolve(&sheet, "CLIENT"),
            Err(RegionError::Empty {
                column: "CLIENT".to_string()
            })
        );
    }

    #[test]
    fn test_all_blank_anchor_is_empty_region() {
        let mut values = metadata_rows();
        values.extend(["", " ", ""]);
        let sheet = sheet_with_column("CLIENT", &values);
        let result = UsefulRegion::resolve(&sheet, "CLIENT");
        assert!(matches!(result, Err(RegionError::Empty { .. })));
        assert_eq!(
            result.unwrap_err().to_string(),
            "No data found in CLIENT"
        );
    }

    #[test]
    fn test_absent_anchor() {
        let sheet = sheet_with_column("CLIENT", &["x"]);
        let result = UsefulRegion::resolve(&sheet, "CODECLIENT");
        assert_eq!(
            result,
            Err(RegionError::AbsentColumn {
                column: "CODECLIENT".to_string()
            })
        );
    }

    #[test]
    fn test_narrowing_is_idempotent() {
        let mut values = metadata_rows();
        values.extend(["FRCA", "", "FRCX", "FRCH", "", ""]);
        let sheet = sheet_with_column("CLIENT", &values);

        let region = UsefulRegion::resolve(&sheet, "CLIENT").unwrap();
        let again = region.clone().narrow(&sheet, "CLIENT").unwrap();
        assert_eq!(region, again);
    }

    #[test]
    fn test_metadata_content_does_not_matter() {
        // exclusion is positional: filled metadata rows never extend the region
        let sheet = sheet_with_column("CLIENT", &["FRCA", "FRCA", "FRCA", "FRCA", "FRCA", ""]);
        assert!(UsefulRegion::resolve(&sheet, "CLIENT").is_err());
    }
}
