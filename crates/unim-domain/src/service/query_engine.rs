//! Query engine over the tariff dataset
//!
//! Pure and total: every well-typed input yields a valid (possibly empty)
//! result. Each invocation derives its own sequences, so the shared
//! dataset is never mutated and no locking is needed.

use serde::Serialize;
use unim_types::{ContainerSize, TripType};

use crate::model::{Dataset, TariffRow};

/// Rows revealed per pagination step
pub const PAGE_SIZE: usize = 100;

/// One render/interaction worth of query parameters.
///
/// `visible_count` is owned by the setter methods: any change to the trip
/// type, filters, size, or origin selection resets it to the page size,
/// and a load-more event advances it by one page, capped at the match
/// count. Reconstructed per session, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState {
    pub trip_type: TripType,
    /// Selected origin names. Empty means nothing is shown (deliberate:
    /// no selection is not "select all").
    pub origins: Vec<String>,
    /// 시·도 / 시·군·구 substring filter; empty passes everything
    pub region: String,
    /// 읍·면·동 substring filter; empty passes everything
    pub sub_area: String,
    pub size: ContainerSize,
    pub page_size: usize,
    pub visible_count: usize,
}

impl QueryState {
    pub fn new(trip_type: TripType) -> Self {
        Self {
            trip_type,
            origins: Vec::new(),
            region: String::new(),
            sub_area: String::new(),
            size: ContainerSize::All,
            page_size: PAGE_SIZE,
            visible_count: PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self.visible_count = page_size;
        self
    }

    pub fn set_trip_type(&mut self, trip_type: TripType) {
        self.trip_type = trip_type;
        self.reset_page();
    }

    pub fn set_origins(&mut self, origins: Vec<String>) {
        self.origins = origins;
        self.reset_page();
    }

    /// Add or remove a single origin from the selection
    pub fn toggle_origin(&mut self, origin: &str) {
        if let Some(pos) = self.origins.iter().position(|o| o == origin) {
            self.origins.remove(pos);
        } else {
            self.origins.push(origin.to_string());
        }
        self.reset_page();
    }

    pub fn set_region(&mut self, region: String) {
        self.region = region;
        self.reset_page();
    }

    pub fn set_sub_area(&mut self, sub_area: String) {
        self.sub_area = sub_area;
        self.reset_page();
    }

    pub fn set_size(&mut self, size: ContainerSize) {
        self.size = size;
        self.reset_page();
    }

    /// Reveal one more page, capped at the current match count
    pub fn load_more(&mut self, total_matched: usize) {
        self.visible_count = (self.visible_count + self.page_size).min(total_matched);
    }

    fn reset_page(&mut self) {
        self.visible_count = self.page_size;
    }
}

impl Default for QueryState {
    fn default() -> Self {
        Self::new(TripType::default())
    }
}

/// A tariff row tagged with the origin sheet it came from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryRow {
    #[serde(rename = "_origin")]
    pub origin: String,
    #[serde(flatten)]
    pub row: TariffRow,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    /// First `visible_count` rows of the filtered, sorted sequence
    pub visible: Vec<QueryRow>,
    pub has_more: bool,
    pub total_matched: usize,
}

/// Run the filter/sort/pagination pipeline.
///
/// Pipeline order: origin union → region filter → sub-area filter →
/// stable composite sort → pagination. The container size in the state is
/// a column projection applied by the display layer and never removes
/// rows here. Origins absent from the active trip type contribute nothing.
pub fn query(dataset: &Dataset, state: &QueryState) -> QueryResult {
    let table = dataset.trip(state.trip_type);

    let mut rows: Vec<QueryRow> = Vec::new();
    for origin in &state.origins {
        if let Some(origin_rows) = table.get(origin) {
            rows.extend(origin_rows.iter().map(|row| QueryRow {
                origin: origin.clone(),
                row: row.clone(),
            }));
        }
    }

    rows.retain(|qr| matches_filters(&qr.row, &state.region, &state.sub_area));

    // Stable: rows with an equal full key keep their union order, which is
    // what decides presentation between origins.
    rows.sort_by(|a, b| sort_key(&a.row).cmp(&sort_key(&b.row)));

    let total_matched = rows.len();
    let has_more = state.visible_count < total_matched;
    rows.truncate(state.visible_count);

    QueryResult {
        visible: rows,
        has_more,
        total_matched,
    }
}

fn matches_filters(row: &TariffRow, region: &str, sub_area: &str) -> bool {
    if !region.is_empty() {
        let si_do = row.admin_region.as_deref().unwrap_or("");
        let gun_gu = row.admin_sub_region.as_deref().unwrap_or("");
        if !si_do.contains(region) && !gun_gu.contains(region) {
            return false;
        }
    }
    if !sub_area.is_empty() {
        let dong = row.sub_area.as_deref().unwrap_or("");
        if !dong.contains(sub_area) {
            return false;
        }
    }
    true
}

fn sort_key(row: &TariffRow) -> (&str, &str, &str) {
    (
        row.admin_region.as_deref().unwrap_or(""),
        row.admin_sub_region.as_deref().unwrap_or(""),
        row.sub_area.as_deref().unwrap_or(""),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(region: &str, sub_region: &str, sub_area: &str) -> TariffRow {
        TariffRow {
            admin_region: Some(region.to_string()),
            admin_sub_region: Some(sub_region.to_string()),
            sub_area: Some(sub_area.to_string()),
            ..Default::default()
        }
    }

    fn busan_dataset() -> Dataset {
        let mut dataset = Dataset::new();
        let mut jongno = row("서울", "종로구", "사직동");
        jongno.distance_km = Some(12.0);
        jongno.entrusted_fare_40 = Some(100000);
        let mut jung = row("서울", "중구", "명동");
        jung.distance_km = Some(8.0);
        jung.entrusted_fare_40 = Some(90000);
        dataset
            .trip_mut(TripType::RoundTrip)
            .insert("부산".to_string(), vec![jongno, jung]);
        dataset
    }

    fn state_with_origins(origins: &[&str]) -> QueryState {
        let mut state = QueryState::new(TripType::RoundTrip);
        state.set_origins(origins.iter().map(|s| s.to_string()).collect());
        state
    }

    #[test]
    fn test_no_selected_origins_matches_nothing() {
        let dataset = busan_dataset();
        let state = QueryState::new(TripType::RoundTrip);
        let result = query(&dataset, &state);
        assert_eq!(result.total_matched, 0);
        assert!(result.visible.is_empty());
        assert!(!result.has_more);
    }

    #[test]
    fn test_region_filter_and_sort_scenario() {
        // Concrete scenario from the original data: 종로구 sorts before
        // 중구 lexicographically even though 중구's row was second.
        let dataset = busan_dataset();
        let mut state = state_with_origins(&["부산"]);
        state.set_region("서울".to_string());

        let result = query(&dataset, &state);
        assert_eq!(result.total_matched, 2);
        assert!(!result.has_more);
        assert_eq!(result.visible[0].row.sub_area.as_deref(), Some("사직동"));
        assert_eq!(result.visible[1].row.sub_area.as_deref(), Some("명동"));
        assert_eq!(result.visible[0].origin, "부산");
    }

    #[test]
    fn test_empty_filters_pass_everything() {
        let dataset = busan_dataset();
        let state = state_with_origins(&["부산"]);
        let result = query(&dataset, &state);
        assert_eq!(result.total_matched, 2);
    }

    #[test]
    fn test_region_filter_matches_sub_region_too() {
        let dataset = busan_dataset();
        let mut state = state_with_origins(&["부산"]);
        state.set_region("종로".to_string());
        let result = query(&dataset, &state);
        assert_eq!(result.total_matched, 1);
        assert_eq!(result.visible[0].row.admin_sub_region.as_deref(), Some("종로구"));
    }

    #[test]
    fn test_sub_area_filter() {
        let dataset = busan_dataset();
        let mut state = state_with_origins(&["부산"]);
        state.set_sub_area("명동".to_string());
        let result = query(&dataset, &state);
        assert_eq!(result.total_matched, 1);
        assert_eq!(result.visible[0].row.sub_area.as_deref(), Some("명동"));
    }

    #[test]
    fn test_filters_are_case_sensitive_substrings() {
        let mut dataset = Dataset::new();
        dataset
            .trip_mut(TripType::RoundTrip)
            .insert("부산".to_string(), vec![row("Seoul", "Jongno", "Sajik")]);
        let mut state = state_with_origins(&["부산"]);
        state.set_region("seoul".to_string());
        assert_eq!(query(&dataset, &state).total_matched, 0);
        state.set_region("eou".to_string());
        assert_eq!(query(&dataset, &state).total_matched, 1);
    }

    #[test]
    fn test_unknown_origin_is_not_an_error() {
        let dataset = busan_dataset();
        let state = state_with_origins(&["부산", "없는곳"]);
        let result = query(&dataset, &state);
        assert_eq!(result.total_matched, 2);
    }

    #[test]
    fn test_missing_fields_compare_as_empty_and_pass_empty_filters() {
        let mut dataset = Dataset::new();
        dataset.trip_mut(TripType::OneWay).insert(
            "인천".to_string(),
            vec![TariffRow::default(), row("서울", "중구", "명동")],
        );
        let mut state = QueryState::new(TripType::OneWay);
        state.set_origins(vec!["인천".to_string()]);
        let result = query(&dataset, &state);
        assert_eq!(result.total_matched, 2);
        // Empty key sorts first
        assert!(result.visible[0].row.admin_region.is_none());
    }

    #[test]
    fn test_sort_is_stable_across_origins() {
        // Two origins carrying a row with the identical composite key:
        // result order must equal selection (union) order.
        let mut dataset = Dataset::new();
        let trips = dataset.trip_mut(TripType::RoundTrip);
        trips.insert("부산".to_string(), vec![row("서울", "중구", "명동")]);
        trips.insert("인천".to_string(), vec![row("서울", "중구", "명동")]);

        let state = state_with_origins(&["인천", "부산"]);
        let result = query(&dataset, &state);
        assert_eq!(result.total_matched, 2);
        assert_eq!(result.visible[0].origin, "인천");
        assert_eq!(result.visible[1].origin, "부산");
    }

    #[test]
    fn test_duplicate_rows_are_all_returned() {
        let mut dataset = Dataset::new();
        let dup = row("서울", "중구", "명동");
        dataset
            .trip_mut(TripType::RoundTrip)
            .insert("부산".to_string(), vec![dup.clone(), dup]);
        let state = state_with_origins(&["부산"]);
        assert_eq!(query(&dataset, &state).total_matched, 2);
    }

    #[test]
    fn test_size_never_removes_rows() {
        let dataset = busan_dataset();
        let mut state = state_with_origins(&["부산"]);
        let all = query(&dataset, &state).total_matched;
        state.set_size(ContainerSize::Twenty);
        assert_eq!(query(&dataset, &state).total_matched, all);
        state.set_size(ContainerSize::Forty);
        assert_eq!(query(&dataset, &state).total_matched, all);
    }

    #[test]
    fn test_pagination_window_and_has_more() {
        let mut dataset = Dataset::new();
        let rows: Vec<TariffRow> = (0..250)
            .map(|i| row("서울", "중구", &format!("동{:03}", i)))
            .collect();
        dataset
            .trip_mut(TripType::RoundTrip)
            .insert("부산".to_string(), rows);

        let mut state = state_with_origins(&["부산"]);
        let first = query(&dataset, &state);
        assert_eq!(first.visible.len(), PAGE_SIZE);
        assert!(first.has_more);
        assert_eq!(first.total_matched, 250);

        state.load_more(first.total_matched);
        let second = query(&dataset, &state);
        assert_eq!(second.visible.len(), 200);
        assert!(second.has_more);

        state.load_more(second.total_matched);
        let third = query(&dataset, &state);
        assert_eq!(third.visible.len(), 250);
        assert!(!third.has_more);

        // Capped: one more load-more past the end changes nothing
        state.load_more(third.total_matched);
        assert_eq!(state.visible_count, 250);
    }

    #[test]
    fn test_pagination_is_prefix_monotone() {
        let mut dataset = Dataset::new();
        let rows: Vec<TariffRow> = (0..130)
            .map(|i| row("경기", "수원시", &format!("동{:03}", i)))
            .collect();
        dataset
            .trip_mut(TripType::RoundTrip)
            .insert("부산".to_string(), rows);

        let mut state = state_with_origins(&["부산"]);
        let small = query(&dataset, &state);
        state.load_more(small.total_matched);
        let large = query(&dataset, &state);
        assert_eq!(&large.visible[..small.visible.len()], &small.visible[..]);
    }

    #[test]
    fn test_filter_change_resets_visible_count() {
        let mut state = QueryState::new(TripType::RoundTrip);
        state.load_more(500);
        assert_eq!(state.visible_count, PAGE_SIZE + PAGE_SIZE);
        state.set_region("서울".to_string());
        assert_eq!(state.visible_count, PAGE_SIZE);

        state.load_more(500);
        state.set_sub_area("명동".to_string());
        assert_eq!(state.visible_count, PAGE_SIZE);

        state.load_more(500);
        state.set_trip_type(TripType::OneWay);
        assert_eq!(state.visible_count, PAGE_SIZE);

        state.load_more(500);
        state.set_size(ContainerSize::Forty);
        assert_eq!(state.visible_count, PAGE_SIZE);

        state.load_more(500);
        state.toggle_origin("부산");
        assert_eq!(state.visible_count, PAGE_SIZE);
    }

    #[test]
    fn test_toggle_origin_adds_then_removes() {
        let mut state = QueryState::new(TripType::RoundTrip);
        state.toggle_origin("부산");
        assert_eq!(state.origins, vec!["부산".to_string()]);
        state.toggle_origin("부산");
        assert!(state.origins.is_empty());
    }

    #[test]
    fn test_query_on_empty_dataset_is_empty_not_an_error() {
        let dataset = Dataset::new();
        let state = state_with_origins(&["부산"]);
        let result = query(&dataset, &state);
        assert_eq!(result.total_matched, 0);
        assert!(!result.has_more);
    }

    #[test]
    fn test_query_row_serializes_origin_tag_and_flattened_row() {
        let dataset = busan_dataset();
        let state = state_with_origins(&["부산"]);
        let result = query(&dataset, &state);
        let json = serde_json::to_value(&result.visible[0]).unwrap();
        assert_eq!(json["_origin"], "부산");
        assert_eq!(json["시·도"], "서울");
    }
}
