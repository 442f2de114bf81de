use chrono::NaiveDate;
use climatlas::{
    Average, City, Climatlas, ContinentDataset, CoordinateRegion, DatasetStore,
    DeclaredHemisphere, ExtremeWeatherRisk, GlobalTemp, HemisphereDataset, HemispherePattern,
    LatLon, LocationMapping, MonthlyPattern, PatternTable, TemperatureRange,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn monthly_pattern(slot: u8) -> MonthlyPattern {
    MonthlyPattern {
        temperature: TemperatureRange {
            avg: 10.0 + slot as f64,
            min: slot as f64,
            max: 20.0 + slot as f64,
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

fn hemisphere_dataset() -> HemisphereDataset {
    let pattern = HemispherePattern {
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
    };
    HemisphereDataset {
        six_month_patterns: PatternTable::from_patterns(
            (1..=6).map(move |slot| (slot, pattern.clone())),
        ),
    }
}

fn continent(name: &str, cities: Vec<City>) -> ContinentDataset {
    ContinentDataset {
        continent_name: name.to_string(),
        six_month_patterns: PatternTable::from_patterns(
            (1..=6).map(|slot| (slot, monthly_pattern(slot))),
        ),
        representative_cities: cities,
    }
}

fn city(name: &str, lat: f64, lon: f64) -> City {
    City {
        name: name.to_string(),
        lat,
        lon,
    }
}

fn region(
    id: &str,
    lat_range: [f64; 2],
    lon_range: [f64; 2],
    hemisphere: DeclaredHemisphere,
) -> CoordinateRegion {
    CoordinateRegion {
        id: id.to_string(),
        lat_range,
        lon_range,
        hemisphere,
        continent_file: id.to_string(),
    }
}

fn fixture_client() -> Climatlas {
    let mapping = LocationMapping::new(vec![
        region("asia", [0.0, 60.0], [60.0, 150.0], DeclaredHemisphere::Northern),
        region("europe", [35.0, 72.0], [-10.0, 60.0], DeclaredHemisphere::Northern),
        region(
            "south_america",
            [-56.0, 13.0],
            [-82.0, -34.0],
            DeclaredHemisphere::Mixed,
        ),
        region(
            "australia",
            [-47.0, -10.0],
            [110.0, 180.0],
            DeclaredHemisphere::Southern,
        ),
    ]);
    let continents = vec![
        (
            "asia".to_string(),
            continent(
                "Asia",
                vec![
                    city("Delhi", 28.7, 77.1),
                    city("Mumbai", 19.08, 72.88),
                    city("Tokyo", 35.68, 139.65),
                    city("Jakarta", -6.2, 106.85),
                ],
            ),
        ),
        (
            "europe".to_string(),
            continent(
                "Europe",
                vec![city("Berlin", 52.52, 13.40), city("Madrid", 40.42, -3.70)],
            ),
        ),
        (
            "australia".to_string(),
            continent("Australia", vec![city("Sydney", -33.87, 151.21)]),
        ),
    ];
    Climatlas::new(DatasetStore::from_parts(
        Some(mapping),
        Some(hemisphere_dataset()),
        Some(hemisphere_dataset()),
        continents,
    ))
}

fn bench_climatlas(c: &mut Criterion) {
    let client = fixture_client();
    let today = NaiveDate::from_ymd_opt(2026, 8, 25).unwrap();

    c.bench_function("resolve_region", |b| {
        b.iter(|| client.resolve_region(black_box(LatLon(23.26, 77.41))))
    });
    c.bench_function("forecast_six_months", |b| {
        b.iter(|| {
            client
                .forecast()
                .location(black_box(LatLon(23.26, 77.41)))
                .today(today)
                .seed(7)
                .call()
        })
    });
    c.bench_function("forecast_hemisphere_tier", |b| {
        b.iter(|| {
            client
                .forecast()
                .location(black_box(LatLon(48.2, -155.0)))
                .today(today)
                .seed(7)
                .call()
        })
    });
    c.bench_function("nearest_city", |b| {
        b.iter(|| client.nearest_city(black_box(LatLon(28.6, 77.2))))
    });
}

criterion_group!(benches, bench_climatlas);
criterion_main!(benches);
