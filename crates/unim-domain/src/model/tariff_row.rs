use serde::{Deserialize, Serialize, Serializer};
use unim_types::FareKind;

/// One destination's tariff record for a given origin and trip type.
///
/// Field names follow the raw spreadsheet headers so the dataset document
/// stays byte-compatible with the original db.json. The `_1` suffixed keys
/// are the 20FT duplicates of the 40FT fare columns (the source sheet
/// carries both groups side by side under a merged banner row).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TariffRow {
    /// 시·도 (province / metropolitan city)
    #[serde(rename = "시·도", default, skip_serializing_if = "Option::is_none")]
    pub admin_region: Option<String>,

    /// 시·군·구 (county / district)
    #[serde(rename = "시·군·구", default, skip_serializing_if = "Option::is_none")]
    pub admin_sub_region: Option<String>,

    /// 읍·면·동 (town / neighborhood); `읍면동` is a legacy header spelling
    #[serde(
        rename = "읍·면·동",
        alias = "읍면동",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sub_area: Option<String>,

    /// 구간거리(km); `구간거리` is a legacy header spelling
    #[serde(
        rename = "구간거리(km)",
        alias = "구간거리",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_distance"
    )]
    pub distance_km: Option<f64>,

    /// 40FT 안전위탁운임(원)
    #[serde(rename = "안전위탁운임(원)", default, skip_serializing_if = "Option::is_none")]
    pub entrusted_fare_40: Option<i64>,

    /// 40FT 운수사업자 간 운임(원)
    #[serde(
        rename = "운수사업자 간 운임(원)",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub carrier_fare_40: Option<i64>,

    /// 40FT 안전운송운임(원)
    #[serde(rename = "안전운송운임(원)", default, skip_serializing_if = "Option::is_none")]
    pub safe_transport_fare_40: Option<i64>,

    /// 20FT 안전위탁운임(원)
    #[serde(
        rename = "안전위탁운임(원)_1",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub entrusted_fare_20: Option<i64>,

    /// 20FT 운수사업자 간 운임(원)
    #[serde(
        rename = "운수사업자 간 운임(원)_1",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub carrier_fare_20: Option<i64>,

    /// 20FT 안전운송운임(원)
    #[serde(
        rename = "안전운송운임(원)_1",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub safe_transport_fare_20: Option<i64>,
}

/// Whole-valued distances are written as integers, keeping the document
/// byte-compatible with the original (JSON.stringify never emits `405.0`).
fn serialize_distance<S: Serializer>(
    value: &Option<f64>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(d) if d.fract() == 0.0 && d.abs() < i64::MAX as f64 => {
            serializer.serialize_i64(*d as i64)
        }
        Some(d) => serializer.serialize_f64(*d),
        None => serializer.serialize_none(),
    }
}

impl TariffRow {
    /// True if no cell of this row carries a value. Such rows come from
    /// trailing blank spreadsheet lines and are dropped by the builder.
    pub fn is_blank(&self) -> bool {
        self.admin_region.is_none()
            && self.admin_sub_region.is_none()
            && self.sub_area.is_none()
            && self.distance_km.is_none()
            && self.entrusted_fare_40.is_none()
            && self.carrier_fare_40.is_none()
            && self.safe_transport_fare_40.is_none()
            && self.entrusted_fare_20.is_none()
            && self.carrier_fare_20.is_none()
            && self.safe_transport_fare_20.is_none()
    }

    /// 40FT fare amount in won. Missing amounts count as ₩0.
    pub fn fare_40(&self, kind: FareKind) -> i64 {
        match kind {
            FareKind::Entrusted => self.entrusted_fare_40,
            FareKind::CarrierToCarrier => self.carrier_fare_40,
            FareKind::SafeTransport => self.safe_transport_fare_40,
        }
        .unwrap_or(0)
    }

    /// 20FT fare amount in won. Missing amounts count as ₩0.
    pub fn fare_20(&self, kind: FareKind) -> i64 {
        match kind {
            FareKind::Entrusted => self.entrusted_fare_20,
            FareKind::CarrierToCarrier => self.carrier_fare_20,
            FareKind::SafeTransport => self.safe_transport_fare_20,
        }
        .unwrap_or(0)
    }

    /// Distance for display. Unlike fares, a missing distance is unknown,
    /// not zero, and renders as `-`.
    pub fn distance_text(&self) -> String {
        match self.distance_km {
            Some(d) if d.fract() == 0.0 => format!("{}", d as i64),
            Some(d) => format!("{}", d),
            None => "-".to_string(),
        }
    }
}
