//! Closed variant sets for the tariff domain

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Trip category of a tariff table (운행 구분)
///
/// Serialized as the literal Korean labels so the dataset document keeps
/// the shape `{"편도": {...}, "왕복": {...}}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize)]
pub enum TripType {
    /// 편도 (one-way)
    #[serde(rename = "편도")]
    #[value(name = "편도", alias = "one-way")]
    OneWay,

    /// 왕복 (round-trip)
    #[default]
    #[serde(rename = "왕복")]
    #[value(name = "왕복", alias = "round-trip")]
    RoundTrip,
}

impl TripType {
    pub const ALL: [TripType; 2] = [TripType::OneWay, TripType::RoundTrip];

    /// Korean label, identical to the serialized form
    pub fn label(&self) -> &'static str {
        match self {
            TripType::OneWay => "편도",
            TripType::RoundTrip => "왕복",
        }
    }

    /// Infer the trip type from a workbook file name.
    ///
    /// First match wins: `편도` is checked before `왕복`, matching the
    /// original conversion script. A name containing neither marker yields
    /// `None` and the caller is expected to skip that workbook.
    pub fn from_file_name(name: &str) -> Option<TripType> {
        if name.contains("편도") {
            Some(TripType::OneWay)
        } else if name.contains("왕복") {
            Some(TripType::RoundTrip)
        } else {
            None
        }
    }
}

impl std::fmt::Display for TripType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Container size filter (컨테이너 규격)
///
/// Selects which fare column groups are shown. This is a display
/// projection only: it never removes rows from a query result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerSize {
    /// 20FT and 40FT columns together
    #[default]
    All,
    /// 20FT columns only
    #[value(name = "20")]
    #[serde(rename = "20")]
    Twenty,
    /// 40FT columns only
    #[value(name = "40")]
    #[serde(rename = "40")]
    Forty,
}

impl ContainerSize {
    /// Whether the 40FT fare columns are visible
    pub fn shows_forty(&self) -> bool {
        matches!(self, ContainerSize::All | ContainerSize::Forty)
    }

    /// Whether the 20FT fare columns are visible
    pub fn shows_twenty(&self) -> bool {
        matches!(self, ContainerSize::All | ContainerSize::Twenty)
    }
}

impl std::fmt::Display for ContainerSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContainerSize::All => write!(f, "all"),
            ContainerSize::Twenty => write!(f, "20"),
            ContainerSize::Forty => write!(f, "40"),
        }
    }
}

/// One of the three fare amounts carried per container size
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FareKind {
    /// 안전위탁운임
    Entrusted,
    /// 운수사업자 간 운임
    CarrierToCarrier,
    /// 안전운송운임
    SafeTransport,
}

impl FareKind {
    pub const ALL: [FareKind; 3] = [
        FareKind::Entrusted,
        FareKind::CarrierToCarrier,
        FareKind::SafeTransport,
    ];

    /// Short Korean label used in table headers
    pub fn label(&self) -> &'static str {
        match self {
            FareKind::Entrusted => "안전위탁",
            FareKind::CarrierToCarrier => "운수사간",
            FareKind::SafeTransport => "안전운송",
        }
    }
}
