//! Raw workbook representation handed to the dataset builder
//!
//! The builder only needs a file name, named sheets in source order, and
//! each sheet's cell grid. Cells are `serde_json::Value` so the builder
//! stays independent of the concrete spreadsheet reader.

use serde_json::Value;

/// One spreadsheet file
#[derive(Debug, Clone)]
pub struct Workbook {
    /// File name (not the full path); carries the trip-type marker
    pub file_name: String,
    /// Sheets in workbook order; sheet name = origin name
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            sheets: Vec::new(),
        }
    }

    pub fn with_sheet(mut self, sheet: Sheet) -> Self {
        self.sheets.push(sheet);
        self
    }
}

/// One sheet: a raw cell grid including the banner and header rows
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<Value>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<Value>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }
}
