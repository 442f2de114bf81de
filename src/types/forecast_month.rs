//! Output records produced by the engine: synthesized forecast months and
//! nearest-city results.

use crate::types::dataset::{Average, City, ExtremeWeatherRisk, TemperatureRange};
use chrono::NaiveDate;
use serde::Serialize;

/// One synthesized month of a climate outlook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastMonth {
    /// Short English month name (`"Jan"`..`"Dec"`).
    pub month_name: String,
    /// Calendar month number, `1..=12`.
    pub month_number: u32,
    /// The query date advanced by this entry's offset in whole months.
    pub date: NaiveDate,
    /// Degrees Celsius, one decimal.
    pub temperature: TemperatureRange,
    /// Relative humidity %, whole number, within `10..=95` outside the
    /// default tier.
    pub humidity: Average,
    /// Precipitation mm, whole number, never negative.
    pub precipitation: Average,
    /// Wind speed km/h, one decimal, at least 1 outside the default tier.
    pub wind_speed: Average,
    /// Category likelihoods, each within `0.0..=0.1`.
    pub extreme_weather_risk: ExtremeWeatherRisk,
    /// Label of the tier that produced the entry, e.g. `"Asia Climate
    /// Pattern"`, `"Northern Hemisphere"` or `"Global Climate Model"`.
    pub data_source: String,
    /// Synthesis confidence in `(0, 1]`, two decimals.
    pub confidence: f64,
}

/// The closest representative city to a queried coordinate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearestCity {
    /// The matched city, serialized with its fields inlined.
    #[serde(flatten)]
    pub city: City,
    /// Continent id the city was listed under.
    pub continent: String,
    /// Great-circle distance from the queried coordinate, in kilometers.
    pub distance_km: f64,
}
