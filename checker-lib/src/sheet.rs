/// A decoded cell, normalized at the workbook boundary so checkers never look
/// at the reader's own cell type.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Blank,
    Text(String),
    Number(f64),
}

impl CellValue {
    /// Absent, empty, or only whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Blank => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// String form used by the value checks. Whole numbers render without a
    /// fractional part so `12.0` reads as `"12"`.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Blank => None,
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Number(n) => Some(format_number(*n)),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

pub(crate) fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// One worksheet: the header row plus the data rows below it.
///
/// Header names are kept exactly as decoded, duplicates included. Rows may be
/// shorter than the header; missing trailing cells read as [`CellValue::Blank`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    pub fn new(name: &str, headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Sheet {
            name: name.to_string(),
            headers,
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Number of data rows (header excluded).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of the first header cell named `column`.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == column)
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    /// Cell at (`row`, `column_index`), blank when the row is short or missing.
    pub fn cell(&self, row: usize, column_index: usize) -> &CellValue {
        static BLANK: CellValue = CellValue::Blank;
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column_index))
            .unwrap_or(&BLANK)
    }
}
