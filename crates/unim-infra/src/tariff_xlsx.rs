//! Excel workbook loading via calamine

use std::path::{Path, PathBuf};

use calamine::{open_workbook, Data, Reader, Xlsx};
use serde_json::Value;
use unim_types::{Error, Result};
use walkdir::WalkDir;

use crate::workbook::{Sheet, Workbook};

/// Load a tariff workbook (.xlsx) into the raw representation the builder
/// consumes. Worksheet order is preserved.
pub fn load_workbook(path: &Path) -> Result<Workbook> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();

    let mut xlsx: Xlsx<_> = open_workbook(path)
        .map_err(|e| Error::Workbook(format!("{}: {}", path.display(), e)))?;

    let mut workbook = Workbook::new(file_name);
    for (name, range) in xlsx.worksheets() {
        let rows: Vec<Vec<Value>> = range
            .rows()
            .map(|cells| cells.iter().map(cell_value).collect())
            .collect();
        workbook.sheets.push(Sheet::new(name, rows));
    }
    Ok(workbook)
}

fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) => Value::String(s.clone()),
        Data::Float(f) => Value::from(*f),
        Data::Int(i) => Value::from(*i),
        Data::Bool(b) => Value::from(*b),
        Data::DateTime(dt) => Value::from(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Value::String(s.clone()),
        Data::Error(_) => Value::Null,
    }
}

/// Find tariff workbooks under a data directory.
///
/// Only `.xlsx` files count; Excel lock files (`~$…`) and hidden files are
/// skipped. Results are sorted for a deterministic build order.
pub fn scan_data_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::FileNotFound(dir.display().to_string()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if name.starts_with("~$") || name.starts_with('.') {
            continue;
        }
        let is_xlsx = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("xlsx"))
            .unwrap_or(false);
        if is_xlsx {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}
