use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use unim_types::TripType;

use crate::model::TariffRow;

/// Insertion-ordered map from origin name (the source sheet name) to that
/// origin's tariff rows.
///
/// Serialized as a plain JSON object. Insertion order is sheet order as
/// encountered during the build, which the determinism contract requires,
/// so this wraps a Vec instead of a hash map. Origin counts are small
/// (one per departure terminal), so linear lookup is fine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OriginMap {
    entries: Vec<(String, Vec<TariffRow>)>,
}

impl OriginMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an origin's rows, keeping first-insertion order
    pub fn insert(&mut self, origin: String, rows: Vec<TariffRow>) {
        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| *name == origin) {
            entry.1 = rows;
        } else {
            self.entries.push((origin, rows));
        }
    }

    pub fn get(&self, origin: &str) -> Option<&[TariffRow]> {
        self.entries
            .iter()
            .find(|(name, _)| name == origin)
            .map(|(_, rows)| rows.as_slice())
    }

    pub fn contains(&self, origin: &str) -> bool {
        self.get(origin).is_some()
    }

    /// Origin names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[TariffRow])> {
        self.entries
            .iter()
            .map(|(name, rows)| (name.as_str(), rows.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total row count across all origins
    pub fn row_count(&self) -> usize {
        self.entries.iter().map(|(_, rows)| rows.len()).sum()
    }
}

impl Serialize for OriginMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, rows) in &self.entries {
            map.serialize_entry(name, rows)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for OriginMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OriginMapVisitor;

        impl<'de> Visitor<'de> for OriginMapVisitor {
            type Value = OriginMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of origin name to tariff rows")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = OriginMap::new();
                while let Some((name, rows)) = access.next_entry::<String, Vec<TariffRow>>()? {
                    map.insert(name, rows);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(OriginMapVisitor)
    }
}

/// The published tariff dataset: trip type → origin → ordered rows.
///
/// Built once by the dataset builder and read-only afterwards; the query
/// engine derives new sequences and never mutates it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(rename = "편도", default)]
    pub one_way: OriginMap,

    #[serde(rename = "왕복", default)]
    pub round_trip: OriginMap,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trip(&self, trip_type: TripType) -> &OriginMap {
        match trip_type {
            TripType::OneWay => &self.one_way,
            TripType::RoundTrip => &self.round_trip,
        }
    }

    pub fn trip_mut(&mut self, trip_type: TripType) -> &mut OriginMap {
        match trip_type {
            TripType::OneWay => &mut self.one_way,
            TripType::RoundTrip => &mut self.round_trip,
        }
    }

    /// Origin names available for a trip type, in build order
    pub fn origin_names(&self, trip_type: TripType) -> Vec<String> {
        self.trip(trip_type).names().map(str::to_string).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.one_way.is_empty() && self.round_trip.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.one_way.row_count() + self.round_trip.row_count()
    }
}
