//! Record types for the bundled climate dataset files: the coordinate-region
//! mapping, per-continent pattern tables with representative cities, and the
//! per-hemisphere pattern tables. Shapes and field names follow the dataset
//! JSON so the files deserialize directly.

use crate::types::region::DeclaredHemisphere;
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

const SLOT_COUNT: usize = 6;

/// A named geographic bounding box from the location mapping.
///
/// The `id` is the mapping key (e.g. `"asia"`, `"south_asia"`); ranges are
/// `[min, max]` in decimal degrees and inclusive on both ends.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateRegion {
    /// Mapping key, also used as the continent id for forecast lookups.
    pub id: String,
    /// Latitude bounds, `[min, max]`.
    pub lat_range: [f64; 2],
    /// Longitude bounds, `[min, max]`.
    pub lon_range: [f64; 2],
    /// Declared hemisphere; `Mixed` for boxes straddling the equator.
    pub hemisphere: DeclaredHemisphere,
    /// File stem of the continent dataset this region refers to.
    pub continent_file: String,
}

impl CoordinateRegion {
    /// Inclusive bounding-box test on both axes.
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        let [lat_min, lat_max] = self.lat_range;
        let [lon_min, lon_max] = self.lon_range;
        lat_min <= latitude && latitude <= lat_max && lon_min <= longitude && longitude <= lon_max
    }
}

/// The ordered coordinate-region mapping.
///
/// Region lookup is first-match-wins, so the order entries appear in the
/// mapping file is part of its meaning. Deserialization keeps document order;
/// a plain map type would lose it.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationMapping {
    /// Region boxes in document order.
    pub regions: Vec<CoordinateRegion>,
}

impl LocationMapping {
    pub fn new(regions: Vec<CoordinateRegion>) -> Self {
        LocationMapping { regions }
    }
}

impl<'de> Deserialize<'de> for LocationMapping {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Mapping {
            #[serde(deserialize_with = "regions_in_document_order")]
            coordinate_regions: Vec<CoordinateRegion>,
        }

        Mapping::deserialize(deserializer).map(|mapping| LocationMapping {
            regions: mapping.coordinate_regions,
        })
    }
}

/// Value shape of a `coordinate_regions` entry; the region id is the map key.
#[derive(Deserialize)]
struct RegionBounds {
    lat_range: [f64; 2],
    lon_range: [f64; 2],
    hemisphere: DeclaredHemisphere,
    continent_file: String,
}

fn regions_in_document_order<'de, D>(deserializer: D) -> Result<Vec<CoordinateRegion>, D::Error>
where
    D: Deserializer<'de>,
{
    struct RegionsVisitor;

    impl<'de> Visitor<'de> for RegionsVisitor {
        type Value = Vec<CoordinateRegion>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map of region id to region bounds")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut regions = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((id, bounds)) = access.next_entry::<String, RegionBounds>()? {
                regions.push(CoordinateRegion {
                    id,
                    lat_range: bounds.lat_range,
                    lon_range: bounds.lon_range,
                    hemisphere: bounds.hemisphere,
                    continent_file: bounds.continent_file,
                });
            }
            Ok(regions)
        }
    }

    deserializer.deserialize_map(RegionsVisitor)
}

/// A 1-based index into the six bundled monthly pattern slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PatternSlot(u8);

impl PatternSlot {
    /// Cycles a forecast offset onto the pattern slots: offsets `0..=5` map to
    /// slots `1..=6`, offset 6 wraps back to slot 1.
    pub fn for_offset(offset: usize) -> Self {
        PatternSlot((offset % SLOT_COUNT) as u8 + 1)
    }

    /// The slot number, always in `1..=6`.
    pub fn number(self) -> u8 {
        self.0
    }
}

/// A slot-keyed pattern table, deserialized from `month_1`..`month_6` keys.
///
/// Keys outside that set are ignored rather than rejected; the engine only
/// ever indexes the six slots.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternTable<P> {
    slots: BTreeMap<u8, P>,
}

impl<P> PatternTable<P> {
    /// Builds a table directly from `(slot, pattern)` pairs; slots outside
    /// `1..=6` are discarded.
    pub fn from_patterns(patterns: impl IntoIterator<Item = (u8, P)>) -> Self {
        PatternTable {
            slots: patterns
                .into_iter()
                .filter(|(slot, _)| (1..=SLOT_COUNT as u8).contains(slot))
                .collect(),
        }
    }

    /// Looks up the pattern for a slot, if the table has one.
    pub fn get(&self, slot: PatternSlot) -> Option<&P> {
        self.slots.get(&slot.number())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

fn parse_slot_key(key: &str) -> Option<u8> {
    let number = key.strip_prefix("month_")?.parse::<u8>().ok()?;
    (1..=SLOT_COUNT as u8).contains(&number).then_some(number)
}

impl<'de, P> Deserialize<'de> for PatternTable<P>
where
    P: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TableVisitor<P>(PhantomData<P>);

        impl<'de, P> Visitor<'de> for TableVisitor<P>
        where
            P: Deserialize<'de>,
        {
            type Value = PatternTable<P>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of month_1..month_6 keys to patterns")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut slots = BTreeMap::new();
                while let Some(key) = access.next_key::<String>()? {
                    match parse_slot_key(&key) {
                        Some(slot) => {
                            slots.insert(slot, access.next_value()?);
                        }
                        None => {
                            access.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(PatternTable { slots })
            }
        }

        deserializer.deserialize_map(TableVisitor(PhantomData))
    }
}

/// Average temperature with the expected low and high, in degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRange {
    pub avg: f64,
    pub min: f64,
    pub max: f64,
}

/// A single averaged value (humidity %, precipitation mm, wind km/h).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Average {
    pub avg: f64,
}

/// Hemisphere-wide temperature: an average plus a `[min, max]` range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlobalTemp {
    pub avg: f64,
    pub range: [f64; 2],
}

/// Likelihoods for the five extreme-weather categories.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtremeWeatherRisk {
    pub very_hot: f64,
    pub very_cold: f64,
    pub very_windy: f64,
    pub very_wet: f64,
    pub very_uncomfortable: f64,
}

impl ExtremeWeatherRisk {
    /// Applies `f` to every category, keeping the structure.
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        ExtremeWeatherRisk {
            very_hot: f(self.very_hot),
            very_cold: f(self.very_cold),
            very_windy: f(self.very_windy),
            very_wet: f(self.very_wet),
            very_uncomfortable: f(self.very_uncomfortable),
        }
    }
}

/// One slot of a continent pattern table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MonthlyPattern {
    pub temperature: TemperatureRange,
    pub humidity: Average,
    pub precipitation: Average,
    pub wind_speed: Average,
    pub extreme_weather_risk: ExtremeWeatherRisk,
}

/// One slot of a hemisphere pattern table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HemispherePattern {
    pub global_temp: GlobalTemp,
    pub global_humidity: Average,
    pub global_precipitation: Average,
    pub global_wind: Average,
    pub extreme_weather_trends: ExtremeWeatherRisk,
}

/// A reference city listed in a continent dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// A continent dataset file: display name, six pattern slots and the cities
/// used for nearest-city lookups.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContinentDataset {
    /// Human-readable continent name (e.g. `"Asia"`), stored in the dataset
    /// files under `continent`.
    #[serde(rename = "continent")]
    pub continent_name: String,
    pub six_month_patterns: PatternTable<MonthlyPattern>,
    /// Absent in some dataset files; treated as no cities.
    #[serde(default)]
    pub representative_cities: Vec<City>,
}

/// A hemisphere dataset file: six coarse pattern slots.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HemisphereDataset {
    pub six_month_patterns: PatternTable<HemispherePattern>,
}
