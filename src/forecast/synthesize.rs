//! Synthesizes forecast months from the pattern tables, falling through a
//! fixed tier order: continent pattern, hemisphere pattern, global default.

use crate::dataset::store::DatasetStore;
use crate::forecast::schedule::{month_name, ScheduledMonth};
use crate::types::dataset::{Average, ExtremeWeatherRisk, TemperatureRange};
use crate::types::forecast_month::ForecastMonth;
use crate::types::region::RegionDescriptor;
use crate::utils::{round1, round2};
use rand::Rng;
use std::ops::Range;

const CONTINENT_VARIATION_WEIGHT: f64 = 0.1;
const HEMISPHERE_VARIATION_WEIGHT: f64 = 0.15;

const CONTINENT_CONFIDENCE: Range<f64> = 0.75..0.95;
const HEMISPHERE_CONFIDENCE: Range<f64> = 0.65..0.90;
const DEFAULT_CONFIDENCE: f64 = 0.60;

const GLOBAL_MODEL_LABEL: &str = "Global Climate Model";

const DEFAULT_RISK: ExtremeWeatherRisk = ExtremeWeatherRisk {
    very_hot: 0.015,
    very_cold: 0.010,
    very_windy: 0.010,
    very_wet: 0.020,
    very_uncomfortable: 0.012,
};

/// Synthesizes one forecast month per schedule entry, using the first tier
/// whose data is available.
///
/// The continent tier applies when the region names a continent and its table
/// is loaded; otherwise the hemisphere tier applies when that hemisphere
/// table is loaded; the default tier always applies. Within the first two
/// tiers, schedule entries whose pattern slot is missing from the table are
/// skipped rather than invented.
pub(crate) fn synthesize<R: Rng>(
    store: &DatasetStore,
    region: &RegionDescriptor,
    latitude: f64,
    longitude: f64,
    schedule: &[ScheduledMonth],
    rng: &mut R,
) -> Vec<ForecastMonth> {
    continent_tier(store, region, latitude, longitude, schedule, rng)
        .or_else(|| hemisphere_tier(store, region, latitude, longitude, schedule, rng))
        .unwrap_or_else(|| default_tier(schedule))
}

/// A small deterministic offset derived from the coordinate, so nearby
/// queries stay consistent while distant ones inside the same region differ.
fn coordinate_variation(latitude: f64, longitude: f64, weight: f64) -> f64 {
    latitude.to_radians().sin() * weight + longitude.to_radians().cos() * weight
}

/// Continent tier: perturbs the continent's pattern table by the coordinate
/// variation. `None` when the region has no continent or its table is not
/// loaded.
pub(crate) fn continent_tier<R: Rng>(
    store: &DatasetStore,
    region: &RegionDescriptor,
    latitude: f64,
    longitude: f64,
    schedule: &[ScheduledMonth],
    rng: &mut R,
) -> Option<Vec<ForecastMonth>> {
    let continent = region.continent.as_deref()?;
    let dataset = store.continent(continent)?;
    let variation = coordinate_variation(latitude, longitude, CONTINENT_VARIATION_WEIGHT);
    let data_source = format!("{} Climate Pattern", dataset.continent_name);

    Some(
        schedule
            .iter()
            .filter_map(|entry| {
                let pattern = dataset.six_month_patterns.get(entry.pattern_slot)?;
                Some(ForecastMonth {
                    month_name: month_name(entry.month_number).to_string(),
                    month_number: entry.month_number,
                    date: entry.date,
                    temperature: TemperatureRange {
                        avg: round1(pattern.temperature.avg + variation * 5.0),
                        min: round1(pattern.temperature.min + variation * 3.0),
                        max: round1(pattern.temperature.max + variation * 7.0),
                    },
                    humidity: Average {
                        avg: (pattern.humidity.avg + variation * 10.0)
                            .clamp(10.0, 95.0)
                            .round(),
                    },
                    precipitation: Average {
                        avg: (pattern.precipitation.avg + variation * 20.0).max(0.0).round(),
                    },
                    wind_speed: Average {
                        avg: round1((pattern.wind_speed.avg + variation * 5.0).max(1.0)),
                    },
                    extreme_weather_risk: pattern
                        .extreme_weather_risk
                        .map(|risk| ((risk + variation * 0.1) / 10.0).clamp(0.0, 0.1)),
                    data_source: data_source.clone(),
                    confidence: round2(rng.gen_range(CONTINENT_CONFIDENCE)),
                })
            })
            .collect(),
    )
}

/// Hemisphere tier: a coarser rendition from the hemisphere-wide table, with
/// a stronger coordinate variation. `None` when that table is not loaded.
pub(crate) fn hemisphere_tier<R: Rng>(
    store: &DatasetStore,
    region: &RegionDescriptor,
    latitude: f64,
    longitude: f64,
    schedule: &[ScheduledMonth],
    rng: &mut R,
) -> Option<Vec<ForecastMonth>> {
    let dataset = store.hemisphere(region.hemisphere)?;
    let variation = coordinate_variation(latitude, longitude, HEMISPHERE_VARIATION_WEIGHT);
    let data_source = format!("{} Hemisphere", region.hemisphere);

    Some(
        schedule
            .iter()
            .filter_map(|entry| {
                let pattern = dataset.six_month_patterns.get(entry.pattern_slot)?;
                Some(ForecastMonth {
                    month_name: month_name(entry.month_number).to_string(),
                    month_number: entry.month_number,
                    date: entry.date,
                    temperature: TemperatureRange {
                        avg: round1(pattern.global_temp.avg + variation * 8.0),
                        min: round1(pattern.global_temp.range[0] + variation * 5.0),
                        max: round1(pattern.global_temp.range[1] + variation * 10.0),
                    },
                    humidity: Average {
                        avg: (pattern.global_humidity.avg + variation * 12.0)
                            .clamp(10.0, 95.0)
                            .round(),
                    },
                    precipitation: Average {
                        avg: (pattern.global_precipitation.avg + variation * 30.0)
                            .max(0.0)
                            .round(),
                    },
                    wind_speed: Average {
                        avg: round1((pattern.global_wind.avg + variation * 8.0).max(1.0)),
                    },
                    // Hemisphere trends are already coarse aggregates; they are
                    // scaled but not perturbed or clamped.
                    extreme_weather_risk: pattern.extreme_weather_trends.map(|trend| trend / 10.0),
                    data_source: data_source.clone(),
                    confidence: round2(rng.gen_range(HEMISPHERE_CONFIDENCE)),
                })
            })
            .collect(),
    )
}

/// Default tier: fixed temperate-climate values, one entry per schedule slot.
pub(crate) fn default_tier(schedule: &[ScheduledMonth]) -> Vec<ForecastMonth> {
    schedule
        .iter()
        .map(|entry| ForecastMonth {
            month_name: month_name(entry.month_number).to_string(),
            month_number: entry.month_number,
            date: entry.date,
            temperature: TemperatureRange {
                avg: 20.0,
                min: 10.0,
                max: 30.0,
            },
            humidity: Average { avg: 60.0 },
            precipitation: Average { avg: 100.0 },
            wind_speed: Average { avg: 15.0 },
            extreme_weather_risk: DEFAULT_RISK,
            data_source: GLOBAL_MODEL_LABEL.to_string(),
            confidence: DEFAULT_CONFIDENCE,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::schedule::schedule;
    use crate::types::dataset::{
        ContinentDataset, CoordinateRegion, GlobalTemp, HemisphereDataset, HemispherePattern,
        LocationMapping, MonthlyPattern, PatternTable,
    };
    use crate::types::region::{DeclaredHemisphere, Hemisphere};
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {} to be close to {}",
            actual,
            expected
        );
    }

    fn monthly_pattern() -> MonthlyPattern {
        MonthlyPattern {
            temperature: TemperatureRange {
                avg: 22.0,
                min: 15.0,
                max: 29.0,
            },
            humidity: Average { avg: 65.0 },
            precipitation: Average { avg: 80.0 },
            wind_speed: Average { avg: 12.0 },
            extreme_weather_risk: ExtremeWeatherRisk {
                very_hot: 0.3,
                very_cold: 0.05,
                very_windy: 0.1,
                very_wet: 0.25,
                very_uncomfortable: 0.2,
            },
        }
    }

    fn hemisphere_pattern() -> HemispherePattern {
        HemispherePattern {
            global_temp: GlobalTemp {
                avg: 15.0,
                range: [5.0, 25.0],
            },
            global_humidity: Average { avg: 60.0 },
            global_precipitation: Average { avg: 90.0 },
            global_wind: Average { avg: 14.0 },
            extreme_weather_trends: ExtremeWeatherRisk {
                very_hot: 0.2,
                very_cold: 0.1,
                very_windy: 0.15,
                very_wet: 0.3,
                very_uncomfortable: 0.18,
            },
        }
    }

    fn mapping() -> LocationMapping {
        LocationMapping::new(vec![CoordinateRegion {
            id: "asia".to_string(),
            lat_range: [0.0, 40.0],
            lon_range: [60.0, 100.0],
            hemisphere: DeclaredHemisphere::Northern,
            continent_file: "asia".to_string(),
        }])
    }

    fn hemisphere_dataset() -> HemisphereDataset {
        HemisphereDataset {
            six_month_patterns: PatternTable::from_patterns(
                (1..=6).map(|slot| (slot, hemisphere_pattern())),
            ),
        }
    }

    fn continent_dataset(slots: std::ops::RangeInclusive<u8>) -> ContinentDataset {
        ContinentDataset {
            continent_name: "Asia".to_string(),
            six_month_patterns: PatternTable::from_patterns(
                slots.map(|slot| (slot, monthly_pattern())),
            ),
            representative_cities: vec![],
        }
    }

    fn full_store() -> DatasetStore {
        DatasetStore::from_parts(
            Some(mapping()),
            Some(hemisphere_dataset()),
            Some(hemisphere_dataset()),
            vec![("asia".to_string(), continent_dataset(1..=6))],
        )
    }

    fn asia_region() -> RegionDescriptor {
        RegionDescriptor {
            continent: Some("asia".to_string()),
            hemisphere: Hemisphere::Northern,
        }
    }

    fn six_months() -> Vec<ScheduledMonth> {
        schedule(NaiveDate::from_ymd_opt(2026, 8, 25).unwrap(), 6)
    }

    #[test]
    fn continent_tier_applies_documented_formulas() {
        // At (0, 0) the variation is exactly sin(0) * 0.1 + cos(0) * 0.1 = 0.1.
        let store = full_store();
        let mut rng = StdRng::seed_from_u64(7);
        let months =
            continent_tier(&store, &asia_region(), 0.0, 0.0, &six_months(), &mut rng).unwrap();
        assert_eq!(months.len(), 6);

        let first = &months[0];
        assert_eq!(first.month_name, "Aug");
        assert_eq!(first.month_number, 8);
        approx(first.temperature.avg, 22.5);
        approx(first.temperature.min, 15.3);
        approx(first.temperature.max, 29.7);
        approx(first.humidity.avg, 66.0);
        approx(first.precipitation.avg, 82.0);
        approx(first.wind_speed.avg, 12.5);
        approx(first.extreme_weather_risk.very_hot, 0.031);
        approx(first.extreme_weather_risk.very_cold, 0.006);
        approx(first.extreme_weather_risk.very_windy, 0.011);
        approx(first.extreme_weather_risk.very_wet, 0.026);
        approx(first.extreme_weather_risk.very_uncomfortable, 0.021);
        assert_eq!(first.data_source, "Asia Climate Pattern");
        assert!(first.confidence >= 0.75 && first.confidence < 0.951);
    }

    #[test]
    fn hemisphere_tier_applies_documented_formulas() {
        // At (0, 0) the hemisphere variation is 0.15.
        let store = full_store();
        let region = RegionDescriptor {
            continent: None,
            hemisphere: Hemisphere::Northern,
        };
        let mut rng = StdRng::seed_from_u64(7);
        let months = hemisphere_tier(&store, &region, 0.0, 0.0, &six_months(), &mut rng).unwrap();
        assert_eq!(months.len(), 6);

        let first = &months[0];
        approx(first.temperature.avg, 16.2);
        approx(first.temperature.min, 5.8);
        approx(first.temperature.max, 26.5);
        approx(first.humidity.avg, 62.0);
        approx(first.precipitation.avg, 95.0);
        approx(first.wind_speed.avg, 15.2);
        approx(first.extreme_weather_risk.very_hot, 0.02);
        approx(first.extreme_weather_risk.very_cold, 0.01);
        approx(first.extreme_weather_risk.very_wet, 0.03);
        assert_eq!(first.data_source, "Northern Hemisphere");
        assert!(first.confidence >= 0.65 && first.confidence < 0.901);
    }

    #[test]
    fn default_tier_emits_fixed_values() {
        let months = default_tier(&six_months());
        assert_eq!(months.len(), 6);
        for month in &months {
            assert_eq!(month.temperature.avg, 20.0);
            assert_eq!(month.temperature.min, 10.0);
            assert_eq!(month.temperature.max, 30.0);
            assert_eq!(month.humidity.avg, 60.0);
            assert_eq!(month.precipitation.avg, 100.0);
            assert_eq!(month.wind_speed.avg, 15.0);
            assert_eq!(month.extreme_weather_risk.very_hot, 0.015);
            assert_eq!(month.extreme_weather_risk.very_cold, 0.010);
            assert_eq!(month.extreme_weather_risk.very_windy, 0.010);
            assert_eq!(month.extreme_weather_risk.very_wet, 0.020);
            assert_eq!(month.extreme_weather_risk.very_uncomfortable, 0.012);
            assert_eq!(month.data_source, "Global Climate Model");
            assert_eq!(month.confidence, 0.60);
        }
        assert_eq!(months[0].month_name, "Aug");
        assert_eq!(months[5].month_name, "Jan");
    }

    #[test]
    fn missing_continent_table_falls_through_to_hemisphere() {
        // Region resolved to a continent whose table failed to load.
        let store = DatasetStore::from_parts(
            Some(mapping()),
            Some(hemisphere_dataset()),
            Some(hemisphere_dataset()),
            vec![],
        );
        let mut rng = StdRng::seed_from_u64(7);
        let months = synthesize(&store, &asia_region(), 10.0, 70.0, &six_months(), &mut rng);
        assert_eq!(months.len(), 6);
        assert_eq!(months[0].data_source, "Northern Hemisphere");
    }

    #[test]
    fn southern_region_reads_southern_table() {
        let store = full_store();
        let region = RegionDescriptor {
            continent: None,
            hemisphere: Hemisphere::Southern,
        };
        let mut rng = StdRng::seed_from_u64(7);
        let months = synthesize(&store, &region, -33.9, 151.2, &six_months(), &mut rng);
        assert_eq!(months[0].data_source, "Southern Hemisphere");
    }

    #[test]
    fn unloaded_store_synthesizes_the_default_tier() {
        let store = DatasetStore::not_loaded();
        let mut rng = StdRng::seed_from_u64(7);
        let months = synthesize(
            &store,
            &RegionDescriptor::bootstrap(),
            23.26,
            77.41,
            &six_months(),
            &mut rng,
        );
        assert_eq!(months.len(), 6);
        assert_eq!(months[0].data_source, "Global Climate Model");
        assert_eq!(months[0].confidence, 0.60);
    }

    #[test]
    fn missing_pattern_slots_are_skipped() {
        let store = DatasetStore::from_parts(
            Some(mapping()),
            Some(hemisphere_dataset()),
            Some(hemisphere_dataset()),
            vec![("asia".to_string(), continent_dataset(1..=3))],
        );
        let mut rng = StdRng::seed_from_u64(7);
        let months = synthesize(&store, &asia_region(), 10.0, 70.0, &six_months(), &mut rng);
        // Slots 4..6 have no pattern, so only the first three offsets remain.
        assert_eq!(months.len(), 3);
        assert_eq!(months[0].month_number, 8);
        assert_eq!(months[2].month_number, 10);
        assert_eq!(months[0].data_source, "Asia Climate Pattern");
    }

    #[test]
    fn perturbed_values_respect_bounds() {
        let extreme = MonthlyPattern {
            temperature: TemperatureRange {
                avg: 22.0,
                min: 15.0,
                max: 29.0,
            },
            humidity: Average { avg: 99.0 },
            precipitation: Average { avg: -30.0 },
            wind_speed: Average { avg: 0.2 },
            extreme_weather_risk: ExtremeWeatherRisk {
                very_hot: 5.0,
                very_cold: -2.0,
                very_windy: 0.1,
                very_wet: 0.1,
                very_uncomfortable: 0.1,
            },
        };
        let dataset = ContinentDataset {
            continent_name: "Asia".to_string(),
            six_month_patterns: PatternTable::from_patterns((1..=6).map(|slot| (slot, extreme.clone()))),
            representative_cities: vec![],
        };
        let store = DatasetStore::from_parts(
            Some(mapping()),
            Some(hemisphere_dataset()),
            Some(hemisphere_dataset()),
            vec![("asia".to_string(), dataset)],
        );
        let mut rng = StdRng::seed_from_u64(7);
        let months =
            continent_tier(&store, &asia_region(), 0.0, 0.0, &six_months(), &mut rng).unwrap();
        let first = &months[0];
        approx(first.humidity.avg, 95.0);
        approx(first.precipitation.avg, 0.0);
        approx(first.wind_speed.avg, 1.0);
        approx(first.extreme_weather_risk.very_hot, 0.1);
        approx(first.extreme_weather_risk.very_cold, 0.0);
    }

    #[test]
    fn seeded_synthesis_is_reproducible() {
        let store = full_store();
        let mut first_rng = StdRng::seed_from_u64(42);
        let mut second_rng = StdRng::seed_from_u64(42);
        let first = synthesize(
            &store,
            &asia_region(),
            23.26,
            77.41,
            &six_months(),
            &mut first_rng,
        );
        let second = synthesize(
            &store,
            &asia_region(),
            23.26,
            77.41,
            &six_months(),
            &mut second_rng,
        );
        assert_eq!(first, second);
    }

    #[test]
    fn confidence_stays_in_tier_range_and_two_decimals() {
        let store = full_store();
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let months =
                continent_tier(&store, &asia_region(), 23.26, 77.41, &six_months(), &mut rng)
                    .unwrap();
            for month in months {
                assert!(
                    month.confidence >= 0.75 && month.confidence < 0.951,
                    "confidence {} out of continent range",
                    month.confidence
                );
                approx((month.confidence * 100.0).round() / 100.0, month.confidence);
            }
        }
    }
}
