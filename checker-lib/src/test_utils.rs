// Test utilities available to both unit and integration tests
// Only compiled when testing

use std::collections::HashMap;

use crate::schema::SheetKind;
use crate::sheet::{CellValue, Sheet};
use crate::source::{DecodeError, TabularSource};

/// Content of the five instruction rows sitting under the header.
#[allow(dead_code)]
pub fn metadata_rows() -> Vec<&'static str> {
    vec![
        "Instructions",
        "Mandatory",
        "Format",
        "Example",
        "Comment",
    ]
}

/// Single-column sheet, one row per value ("" gives an empty text cell).
#[allow(dead_code)]
pub fn sheet_with_column(column: &str, values: &[&str]) -> Sheet {
    SheetBuilder::new("Sheet1")
        .headers(&[column])
        .rows(values.iter().map(|value| vec![CellValue::from(*value)]))
        .build()
}

/// Builder for in-memory sheets.
#[derive(Debug, Default)]
pub struct SheetBuilder {
    name: String,
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

#[allow(dead_code)]
impl SheetBuilder {
    pub fn new(name: &str) -> Self {
        SheetBuilder {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn headers(mut self, headers: &[&str]) -> Self {
        self.headers = headers.iter().map(|header| header.to_string()).collect();
        self
    }

    pub fn row(mut self, cells: Vec<CellValue>) -> Self {
        self.rows.push(cells);
        self
    }

    pub fn rows(mut self, rows: impl IntoIterator<Item = Vec<CellValue>>) -> Self {
        self.rows.extend(rows);
        self
    }

    pub fn build(self) -> Sheet {
        Sheet::new(&self.name, self.headers, self.rows)
    }
}

/// A sheet of `kind` that passes every check: full header, the metadata
/// block, then `data_rows` rows of valid codes and numeric values.
#[allow(dead_code)]
pub fn conforming_sheet(kind: SheetKind, data_rows: usize) -> Sheet {
    let headers = kind.required_columns();
    let mut builder = SheetBuilder::new(kind.sheet_name()).headers(headers);

    for label in metadata_rows() {
        builder = builder.row(headers.iter().map(|_| CellValue::from(label)).collect());
    }

    for index in 0..data_rows {
        let row = headers
            .iter()
            .map(|header| {
                if *header == kind.anchor_column() {
                    CellValue::from(if index % 2 == 0 { "FRCA" } else { "FRCH" })
                } else if kind.numeric_columns().contains(header) {
                    CellValue::Number(12.0)
                } else {
                    CellValue::from("x")
                }
            })
            .collect();
        builder = builder.row(row);
    }

    builder.build()
}

/// Source serving prepared sheets whatever the bytes are.
#[derive(Debug, Default, Clone)]
pub struct InMemorySource {
    sheets: HashMap<String, Sheet>,
}

#[allow(dead_code)]
impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, sheet: Sheet) -> Self {
        self.sheets.insert(sheet.name().to_string(), sheet);
        self
    }

    /// Both sheets of a conforming workbook.
    pub fn conforming() -> Self {
        Self::new()
            .with_sheet(conforming_sheet(SheetKind::Referentiel, 4))
            .with_sheet(conforming_sheet(SheetKind::Promo, 4))
    }
}

impl TabularSource for InMemorySource {
    fn decode(&self, _bytes: &[u8], sheet_name: &str) -> Result<Sheet, DecodeError> {
        self.sheets
            .get(sheet_name)
            .cloned()
            .ok_or_else(|| DecodeError::SheetNotFound(sheet_name.to_string()))
    }
}
