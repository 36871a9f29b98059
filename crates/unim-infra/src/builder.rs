//! Dataset builder: raw workbooks → normalized tariff dataset
//!
//! Mirrors the original conversion pipeline: trip type from the file name,
//! two-row header convention (row 0 is a merged 40FT/20FT banner), SheetJS
//! style column keying with `__EMPTY` placeholders and `_1` suffixes for
//! duplicate headers, and per-row coalescing of the unlabeled distance
//! column. The output document is byte-compatible with existing db.json
//! consumers.

use std::collections::HashMap;

use serde_json::{Map, Value};
use unim_domain::model::{Dataset, TariffRow};
use unim_types::TripType;

use crate::workbook::{Sheet, Workbook};

/// Canonical distance column header
pub const DISTANCE_KEY: &str = "구간거리(km)";

/// Key assigned to an unlabeled header cell (SheetJS convention)
pub const PLACEHOLDER_KEY: &str = "__EMPTY";

/// The six fare columns, integer won after conversion
const FARE_KEYS: [&str; 6] = [
    "안전위탁운임(원)",
    "운수사업자 간 운임(원)",
    "안전운송운임(원)",
    "안전위탁운임(원)_1",
    "운수사업자 간 운임(원)_1",
    "안전운송운임(원)_1",
];

/// Row index of the real column header; data starts on the next row
const HEADER_ROW: usize = 1;

/// Build the dataset from a set of already-loaded workbooks.
///
/// Workbooks whose file name carries neither trip-type marker are skipped
/// with a warning and excluded entirely. Re-running on identical input
/// yields a structurally identical dataset.
pub fn build_dataset(workbooks: &[Workbook]) -> Dataset {
    let mut dataset = Dataset::new();
    for workbook in workbooks {
        if append_workbook(&mut dataset, workbook).is_none() {
            eprintln!(
                "경고: 스킵 \"{}\" (파일명에 '편도' 또는 '왕복'이 없습니다)",
                workbook.file_name
            );
        }
    }
    dataset
}

/// Convert one workbook into the dataset.
///
/// Returns the trip type and the number of sheets stored, or `None` when
/// the file name matches neither marker. Sheets producing zero rows are
/// omitted, not stored as empty.
pub fn append_workbook(dataset: &mut Dataset, workbook: &Workbook) -> Option<(TripType, usize)> {
    let trip_type = TripType::from_file_name(&workbook.file_name)?;
    let mut stored = 0;
    for sheet in &workbook.sheets {
        let rows = convert_sheet(sheet);
        if rows.is_empty() {
            continue;
        }
        dataset.trip_mut(trip_type).insert(sheet.name.clone(), rows);
        stored += 1;
    }
    Some((trip_type, stored))
}

fn convert_sheet(sheet: &Sheet) -> Vec<TariffRow> {
    let Some(header) = sheet.rows.get(HEADER_ROW) else {
        return Vec::new();
    };
    let keys = header_keys(header);
    sheet
        .rows
        .iter()
        .skip(HEADER_ROW + 1)
        .filter_map(|cells| keyed_row(&keys, cells))
        .map(coalesce_distance)
        .filter_map(typed_row)
        .collect()
}

/// Column keys from the header row.
///
/// Empty header cells become `__EMPTY`, `__EMPTY_1`, … in left-to-right
/// order. Duplicate header names get a `_1`, `_2`, … suffix, which is how
/// the 20FT fare columns (same header text as the 40FT group) end up under
/// their `…_1` keys.
fn header_keys(header: &[Value]) -> Vec<String> {
    let mut keys = Vec::with_capacity(header.len());
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut anonymous = 0usize;

    for cell in header {
        let name = cell.as_str().map(str::trim).unwrap_or("");
        if name.is_empty() {
            keys.push(if anonymous == 0 {
                PLACEHOLDER_KEY.to_string()
            } else {
                format!("{}_{}", PLACEHOLDER_KEY, anonymous)
            });
            anonymous += 1;
            continue;
        }
        let count = seen.entry(name.to_string()).or_insert(0);
        keys.push(if *count == 0 {
            name.to_string()
        } else {
            format!("{}_{}", name, count)
        });
        *count += 1;
    }
    keys
}

/// Pair header keys with one data row's cells, skipping empty cells.
/// Returns `None` for rows with no populated cells (trailing blank lines).
fn keyed_row(keys: &[String], cells: &[Value]) -> Option<Map<String, Value>> {
    let mut row = Map::new();
    for (key, cell) in keys.iter().zip(cells) {
        let value = normalize_cell(cell);
        if value.is_null() {
            continue;
        }
        row.insert(key.clone(), value);
    }
    if row.is_empty() {
        None
    } else {
        Some(row)
    }
}

/// Cell cleanup: whole-valued floats become integers (fare columns are
/// integer won but arrive as floats from the spreadsheet reader) and
/// empty strings count as absent.
fn normalize_cell(cell: &Value) -> Value {
    match cell {
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Value::from(f as i64),
            _ => cell.clone(),
        },
        Value::String(s) if s.trim().is_empty() => Value::Null,
        _ => cell.clone(),
    }
}

/// Per-row placeholder fix: the distance column header cell is sometimes
/// left empty in the source, so the value arrives under the placeholder
/// key. Placeholder presence varies row by row, hence per-row and not
/// per-sheet. Consumes the keyed row and returns a new value.
fn coalesce_distance(mut row: Map<String, Value>) -> Map<String, Value> {
    let has_distance = row.get(DISTANCE_KEY).map(|v| !v.is_null()).unwrap_or(false);
    if !has_distance {
        if let Some(value) = row.remove(PLACEHOLDER_KEY) {
            if !value.is_null() {
                row.insert(DISTANCE_KEY.to_string(), value);
            }
        }
    }
    row
}

/// Coerce the numeric columns so every populated row converts cleanly.
///
/// Fare cells must end up as integer won: fractional floats are rounded,
/// and non-numeric text (e.g. "협의" for a negotiated fare) becomes an
/// absent amount. A non-numeric distance likewise becomes unknown. The
/// row itself is always kept.
fn coerce_numeric_columns(row: &mut Map<String, Value>) {
    for key in FARE_KEYS {
        if let Some(value) = row.get_mut(key) {
            *value = match value.as_f64() {
                Some(f) => Value::from(f.round() as i64),
                None => Value::Null,
            };
        }
    }
    if let Some(value) = row.get(DISTANCE_KEY) {
        if value.as_f64().is_none() {
            row.remove(DISTANCE_KEY);
        }
    }
}

/// Typed conversion; unknown keys are ignored. Rows carrying no
/// recognized value are dropped.
fn typed_row(mut row: Map<String, Value>) -> Option<TariffRow> {
    coerce_numeric_columns(&mut row);
    let row: TariffRow = match serde_json::from_value(Value::Object(row)) {
        Ok(row) => row,
        Err(e) => {
            eprintln!("경고: 행 변환 실패, 건너뜀: {}", e);
            return None;
        }
    };
    (!row.is_blank()).then_some(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Header grid matching the real tariff sheets: banner row with merged
    /// 40FT/20FT cells, then the true header with an unlabeled distance
    /// column and duplicated fare headers for the 20FT group.
    fn tariff_sheet(name: &str, data_rows: Vec<Vec<Value>>) -> Sheet {
        let banner = vec![
            Value::Null,
            Value::Null,
            Value::Null,
            Value::Null,
            json!("40FT"),
            Value::Null,
            Value::Null,
            json!("20FT"),
            Value::Null,
            Value::Null,
        ];
        let header = vec![
            json!("시·도"),
            json!("시·군·구"),
            json!("읍·면·동"),
            Value::Null, // distance header cell left empty in the source
            json!("안전위탁운임(원)"),
            json!("운수사업자 간 운임(원)"),
            json!("안전운송운임(원)"),
            json!("안전위탁운임(원)"),
            json!("운수사업자 간 운임(원)"),
            json!("안전운송운임(원)"),
        ];
        let mut rows = vec![banner, header];
        rows.extend(data_rows);
        Sheet::new(name, rows)
    }

    fn data_row(region: &str, sub_region: &str, sub_area: &str, distance: f64) -> Vec<Value> {
        vec![
            json!(region),
            json!(sub_region),
            json!(sub_area),
            json!(distance),
            json!(100000.0),
            json!(95000.0),
            json!(110000.0),
            json!(80000.0),
            json!(76000.0),
            json!(88000.0),
        ]
    }

    #[test]
    fn test_build_routes_by_file_name_marker() {
        let one_way = Workbook::new("운임_편도.xlsx")
            .with_sheet(tariff_sheet("부산", vec![data_row("서울", "종로구", "사직동", 12.0)]));
        let round_trip = Workbook::new("운임_왕복.xlsx")
            .with_sheet(tariff_sheet("부산", vec![data_row("서울", "중구", "명동", 8.0)]));

        let dataset = build_dataset(&[one_way, round_trip]);
        assert_eq!(dataset.one_way.row_count(), 1);
        assert_eq!(dataset.round_trip.row_count(), 1);
    }

    #[test]
    fn test_unmarked_workbook_is_skipped_entirely() {
        let workbook = Workbook::new("기타자료.xlsx")
            .with_sheet(tariff_sheet("부산", vec![data_row("서울", "중구", "명동", 8.0)]));
        let dataset = build_dataset(&[workbook]);
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_banner_row_is_skipped_and_data_starts_at_row_two() {
        let workbook = Workbook::new("편도.xlsx").with_sheet(tariff_sheet(
            "부산",
            vec![
                data_row("서울", "종로구", "사직동", 12.0),
                data_row("서울", "중구", "명동", 8.0),
            ],
        ));
        let dataset = build_dataset(&[workbook]);
        let rows = dataset.one_way.get("부산").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].admin_region.as_deref(), Some("서울"));
    }

    #[test]
    fn test_duplicate_headers_map_to_20ft_fields() {
        let workbook = Workbook::new("편도.xlsx")
            .with_sheet(tariff_sheet("부산", vec![data_row("서울", "종로구", "사직동", 12.0)]));
        let dataset = build_dataset(&[workbook]);
        let row = &dataset.one_way.get("부산").unwrap()[0];
        assert_eq!(row.entrusted_fare_40, Some(100000));
        assert_eq!(row.entrusted_fare_20, Some(80000));
        assert_eq!(row.carrier_fare_20, Some(76000));
        assert_eq!(row.safe_transport_fare_20, Some(88000));
    }

    #[test]
    fn test_unlabeled_distance_column_is_coalesced() {
        let workbook = Workbook::new("편도.xlsx")
            .with_sheet(tariff_sheet("부산", vec![data_row("서울", "종로구", "사직동", 15.0)]));
        let dataset = build_dataset(&[workbook]);
        let row = &dataset.one_way.get("부산").unwrap()[0];
        assert_eq!(row.distance_km, Some(15.0));
    }

    #[test]
    fn test_placeholder_coalescing_is_per_row() {
        // First row carries a distance under the placeholder, second row
        // has the cell empty; only the first gets a distance.
        let mut missing = data_row("서울", "중구", "명동", 0.0);
        missing[3] = Value::Null;
        let workbook = Workbook::new("편도.xlsx").with_sheet(tariff_sheet(
            "부산",
            vec![data_row("서울", "종로구", "사직동", 15.0), missing],
        ));
        let dataset = build_dataset(&[workbook]);
        let rows = dataset.one_way.get("부산").unwrap();
        assert_eq!(rows[0].distance_km, Some(15.0));
        assert_eq!(rows[1].distance_km, None);
    }

    #[test]
    fn test_populated_canonical_distance_wins_over_placeholder() {
        let header = vec![json!("구간거리(km)"), Value::Null, json!("읍·면·동")];
        let sheet = Sheet::new(
            "부산",
            vec![
                vec![Value::Null, Value::Null, Value::Null],
                header,
                vec![json!(10.0), json!(99.0), json!("명동")],
            ],
        );
        let workbook = Workbook::new("편도.xlsx").with_sheet(sheet);
        let dataset = build_dataset(&[workbook]);
        let row = &dataset.one_way.get("부산").unwrap()[0];
        assert_eq!(row.distance_km, Some(10.0));
    }

    #[test]
    fn test_empty_sheet_is_omitted_not_stored_empty() {
        let workbook = Workbook::new("편도.xlsx")
            .with_sheet(tariff_sheet("빈시트", vec![]))
            .with_sheet(tariff_sheet("부산", vec![data_row("서울", "중구", "명동", 8.0)]));
        let dataset = build_dataset(&[workbook]);
        assert!(!dataset.one_way.contains("빈시트"));
        assert!(dataset.one_way.contains("부산"));
    }

    #[test]
    fn test_origin_order_follows_sheet_order() {
        let workbook = Workbook::new("왕복.xlsx")
            .with_sheet(tariff_sheet("인천", vec![data_row("서울", "중구", "명동", 8.0)]))
            .with_sheet(tariff_sheet("부산", vec![data_row("서울", "중구", "명동", 8.0)]))
            .with_sheet(tariff_sheet("광양", vec![data_row("서울", "중구", "명동", 8.0)]));
        let dataset = build_dataset(&[workbook]);
        let names: Vec<&str> = dataset.round_trip.names().collect();
        assert_eq!(names, vec!["인천", "부산", "광양"]);
    }

    #[test]
    fn test_build_is_idempotent() {
        let workbooks = vec![
            Workbook::new("편도.xlsx")
                .with_sheet(tariff_sheet("부산", vec![data_row("서울", "종로구", "사직동", 12.0)])),
            Workbook::new("왕복.xlsx")
                .with_sheet(tariff_sheet("인천", vec![data_row("서울", "중구", "명동", 8.0)])),
        ];
        assert_eq!(build_dataset(&workbooks), build_dataset(&workbooks));
    }

    #[test]
    fn test_empty_input_yields_empty_dataset() {
        let dataset = build_dataset(&[]);
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_header_keys_placeholder_and_suffix_convention() {
        let header = vec![
            json!("시·도"),
            Value::Null,
            json!("안전위탁운임(원)"),
            json!(""),
            json!("안전위탁운임(원)"),
        ];
        let keys = header_keys(&header);
        assert_eq!(
            keys,
            vec![
                "시·도",
                "__EMPTY",
                "안전위탁운임(원)",
                "__EMPTY_1",
                "안전위탁운임(원)_1",
            ]
        );
    }

    #[test]
    fn test_text_fare_cell_degrades_to_missing_not_dropped() {
        // Negotiated fares show up as text in the source; the row stays,
        // only that amount is absent.
        let mut negotiated = data_row("서울", "중구", "명동", 8.0);
        negotiated[4] = json!("협의");
        let workbook =
            Workbook::new("편도.xlsx").with_sheet(tariff_sheet("부산", vec![negotiated]));
        let dataset = build_dataset(&[workbook]);
        let rows = dataset.one_way.get("부산").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].entrusted_fare_40, None);
        assert_eq!(rows[0].carrier_fare_40, Some(95000));
    }

    #[test]
    fn test_fractional_fare_rounds_to_integer_won() {
        let mut fractional = data_row("서울", "중구", "명동", 8.0);
        fractional[4] = json!(100000.5);
        let workbook =
            Workbook::new("편도.xlsx").with_sheet(tariff_sheet("부산", vec![fractional]));
        let dataset = build_dataset(&[workbook]);
        let rows = dataset.one_way.get("부산").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].entrusted_fare_40, Some(100001));
    }

    #[test]
    fn test_non_numeric_distance_becomes_unknown_not_dropped() {
        let mut negotiated = data_row("서울", "중구", "명동", 8.0);
        negotiated[3] = json!("별도협의");
        let workbook =
            Workbook::new("편도.xlsx").with_sheet(tariff_sheet("부산", vec![negotiated]));
        let dataset = build_dataset(&[workbook]);
        let rows = dataset.one_way.get("부산").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].distance_km, None);
        assert_eq!(rows[0].distance_text(), "-");
    }

    #[test]
    fn test_whole_valued_float_fares_become_integer_won() {
        let workbook = Workbook::new("편도.xlsx")
            .with_sheet(tariff_sheet("부산", vec![data_row("서울", "종로구", "사직동", 12.5)]));
        let dataset = build_dataset(&[workbook]);
        let row = &dataset.one_way.get("부산").unwrap()[0];
        assert_eq!(row.safe_transport_fare_40, Some(110000));
        // Fractional distances stay fractional
        assert_eq!(row.distance_km, Some(12.5));
    }
}
