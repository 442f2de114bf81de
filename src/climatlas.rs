//! This module provides the main entry point for the climate outlook engine.
//! The [`Climatlas`] client wraps an immutable [`DatasetStore`] snapshot and
//! exposes the three dashboard operations: resolving a coordinate to a region,
//! synthesizing a multi-month outlook and looking up the nearest reference
//! city.

use crate::cities::locate_city::nearest_city;
use crate::dataset::load::DatasetProvider;
use crate::dataset::store::DatasetStore;
use crate::error::ClimatlasError;
use crate::forecast::schedule::{schedule, DEFAULT_HORIZON};
use crate::forecast::synthesize::synthesize;
use crate::region::resolve::resolve;
use crate::types::forecast_month::{ForecastMonth, NearestCity};
use crate::types::region::RegionDescriptor;
use bon::bon;
use chrono::{Local, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second
/// (index 1). Both values are represented as `f64` in decimal degrees.
///
/// # Examples
///
/// ```
/// use climatlas::LatLon;
///
/// let bhopal = LatLon(23.26, 77.41);
/// assert_eq!(bhopal.0, 23.26); // Latitude
/// assert_eq!(bhopal.1, 77.41); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

impl LatLon {
    /// Checks that the coordinate is usable: latitude within `[-90, 90]` and
    /// longitude within `[-180, 180]`. Non-finite components fail the range
    /// checks, so `NaN` and infinities are rejected as well.
    ///
    /// Every [`Climatlas`] operation validates its location through this
    /// method, so calling it directly is only needed when validating input
    /// ahead of time.
    ///
    /// # Errors
    ///
    /// Returns [`ClimatlasError::InvalidCoordinate`] with the offending
    /// components when either check fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use climatlas::LatLon;
    ///
    /// assert!(LatLon(90.0, -180.0).validate().is_ok());
    /// assert!(LatLon(90.5, 0.0).validate().is_err());
    /// assert!(LatLon(f64::NAN, 0.0).validate().is_err());
    /// ```
    pub fn validate(self) -> Result<Self, ClimatlasError> {
        let LatLon(latitude, longitude) = self;
        if (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude) {
            Ok(self)
        } else {
            Err(ClimatlasError::InvalidCoordinate {
                latitude,
                longitude,
            })
        }
    }
}

/// The main client for region resolution and climate outlooks.
///
/// A client owns one [`DatasetStore`] snapshot and serves every query from it.
/// When the snapshot is not loaded, each operation degrades to its documented
/// fallback instead of failing: region resolution hands out the bootstrap
/// region, forecasts come from the global default tier and nearest-city
/// lookups find nothing. The only error any operation returns is an invalid
/// input coordinate.
///
/// Create an instance with [`Climatlas::load()`] to ingest a dataset through a
/// [`DatasetProvider`], with [`Climatlas::new()`] around an existing store, or
/// with [`Climatlas::unloaded()`] to run on fallbacks alone.
///
/// # Examples
///
/// ```rust
/// use climatlas::{Climatlas, LatLon};
/// # use climatlas::ClimatlasError;
///
/// # fn main() -> Result<(), ClimatlasError> {
/// let client = Climatlas::unloaded();
/// let outlook = client
///     .forecast()
///     .location(LatLon(52.52, 13.40))
///     .seed(42)
///     .call()?;
/// assert_eq!(outlook.len(), 6);
/// assert_eq!(outlook[0].data_source, "Global Climate Model");
/// # Ok(())
/// # }
/// ```
pub struct Climatlas {
    store: DatasetStore,
}

#[bon]
impl Climatlas {
    /// Creates a client around an already assembled [`DatasetStore`].
    ///
    /// # Arguments
    ///
    /// * `store` - The snapshot to serve queries from.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use climatlas::{Climatlas, DatasetStore, LatLon};
    /// # use climatlas::{HemisphereDataset, LocationMapping};
    /// # fn main() -> Result<(), climatlas::ClimatlasError> {
    /// # let mapping: LocationMapping = serde_json::from_str(r#"{
    /// #     "coordinate_regions": {
    /// #         "asia": { "lat_range": [0, 40], "lon_range": [60, 100],
    /// #                   "hemisphere": "Northern", "continent_file": "asia" }
    /// #     }
    /// # }"#).unwrap();
    /// # let hemisphere: HemisphereDataset =
    /// #     serde_json::from_str(r#"{ "six_month_patterns": {} }"#).unwrap();
    /// # let store = DatasetStore::from_parts(
    /// #     Some(mapping), Some(hemisphere.clone()), Some(hemisphere), vec![]);
    /// let client = Climatlas::new(store);
    /// let region = client.resolve_region(LatLon(23.26, 77.41))?;
    /// assert_eq!(region.continent.as_deref(), Some("asia"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(store: DatasetStore) -> Self {
        Climatlas { store }
    }

    /// Creates a client without any dataset, serving only the fallback paths.
    ///
    /// # Examples
    ///
    /// ```
    /// use climatlas::Climatlas;
    ///
    /// let client = Climatlas::unloaded();
    /// assert!(!client.store().is_loaded());
    /// ```
    pub fn unloaded() -> Self {
        Climatlas::new(DatasetStore::not_loaded())
    }

    /// Loads the dataset through `provider` and creates a client from the
    /// result.
    ///
    /// This never fails: resources the provider cannot deliver are logged and
    /// dropped, degrading the store as described on [`DatasetStore::load`].
    /// A client over a degraded store still answers every query through the
    /// fallback tiers.
    ///
    /// # Arguments
    ///
    /// * `provider` - The [`DatasetProvider`] to fetch raw tables through.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use climatlas::{Climatlas, DatasetProvider, Hemisphere};
    /// # use climatlas::{ContinentDataset, HemisphereDataset, LocationMapping};
    /// # use async_trait::async_trait;
    /// # struct BundledData;
    /// # #[async_trait]
    /// # impl DatasetProvider for BundledData {
    /// #     type Error = String;
    /// #     async fn location_mapping(&self) -> Result<LocationMapping, Self::Error> {
    /// #         serde_json::from_str(r#"{ "coordinate_regions": {} }"#)
    /// #             .map_err(|e| e.to_string())
    /// #     }
    /// #     async fn hemisphere(&self, _: Hemisphere) -> Result<HemisphereDataset, Self::Error> {
    /// #         serde_json::from_str(r#"{ "six_month_patterns": {} }"#)
    /// #             .map_err(|e| e.to_string())
    /// #     }
    /// #     async fn continent(&self, _: &str) -> Result<ContinentDataset, Self::Error> {
    /// #         Err("not bundled".to_string())
    /// #     }
    /// # }
    /// # #[tokio::main]
    /// # async fn main() {
    /// let client = Climatlas::load(&BundledData).await;
    /// assert!(client.store().is_loaded());
    /// # }
    /// ```
    pub async fn load<P>(provider: &P) -> Self
    where
        P: DatasetProvider + Sync,
    {
        Climatlas::new(DatasetStore::load(provider).await)
    }

    /// The store this client serves queries from.
    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    /// Resolves a coordinate to its continent id and hemisphere.
    ///
    /// The location mapping is scanned in document order and the first region
    /// box containing the coordinate wins. A coordinate outside every box
    /// resolves to no continent with the hemisphere computed from its
    /// latitude. Before any dataset is loaded, every coordinate resolves to
    /// the bootstrap region instead.
    ///
    /// # Arguments
    ///
    /// * `location` - The coordinate to resolve.
    ///
    /// # Returns
    ///
    /// A [`RegionDescriptor`] naming the matched continent (if any) and the
    /// resolved hemisphere.
    ///
    /// # Errors
    ///
    /// Returns [`ClimatlasError::InvalidCoordinate`] when the location fails
    /// [`LatLon::validate`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use climatlas::{Climatlas, DatasetStore, Hemisphere, LatLon};
    /// # use climatlas::{HemisphereDataset, LocationMapping};
    /// # fn main() -> Result<(), climatlas::ClimatlasError> {
    /// # let mapping: LocationMapping = serde_json::from_str(r#"{
    /// #     "coordinate_regions": {
    /// #         "asia": { "lat_range": [0, 40], "lon_range": [60, 100],
    /// #                   "hemisphere": "Northern", "continent_file": "asia" }
    /// #     }
    /// # }"#).unwrap();
    /// # let hemisphere: HemisphereDataset =
    /// #     serde_json::from_str(r#"{ "six_month_patterns": {} }"#).unwrap();
    /// # let client = Climatlas::new(DatasetStore::from_parts(
    /// #     Some(mapping), Some(hemisphere.clone()), Some(hemisphere), vec![]));
    /// let bhopal = client.resolve_region(LatLon(23.26, 77.41))?;
    /// assert_eq!(bhopal.continent.as_deref(), Some("asia"));
    /// assert_eq!(bhopal.hemisphere, Hemisphere::Northern);
    ///
    /// let sydney = client.resolve_region(LatLon(-33.9, 151.2))?;
    /// assert_eq!(sydney.continent, None);
    /// assert_eq!(sydney.hemisphere, Hemisphere::Southern);
    /// # Ok(())
    /// # }
    /// ```
    pub fn resolve_region(&self, location: LatLon) -> Result<RegionDescriptor, ClimatlasError> {
        let LatLon(latitude, longitude) = location.validate()?;
        Ok(resolve(&self.store, latitude, longitude))
    }

    /// Synthesizes a monthly climate outlook for a coordinate.
    ///
    /// The coordinate is resolved to a region first, then each scheduled
    /// month is synthesized from the best available tier: the matched
    /// continent's pattern table, the resolved hemisphere's table, or the
    /// fixed global default. The producing tier is named in each entry's
    /// `data_source`. Months advance through the calendar from `today` while
    /// the underlying pattern slots cycle in groups of six.
    ///
    /// This method uses a builder pattern.
    ///
    /// # Arguments
    ///
    /// * `.location(LatLon)`: **Required.** The coordinate the outlook is for.
    /// * `.today(NaiveDate)`: Optional. The date the outlook starts from, used
    ///   for month names, numbers and entry dates. Defaults to the current
    ///   local date.
    /// * `.horizon(usize)`: Optional. How many months to schedule. Defaults
    ///   to `6`.
    /// * `.seed(u64)`: Optional. Seeds the confidence sampling so the outlook
    ///   is reproducible. Defaults to fresh entropy per call.
    ///
    /// # Returns
    ///
    /// A `Vec<ForecastMonth>` with one entry per scheduled month. Months whose
    /// pattern slot is missing from the producing table are skipped, so the
    /// vector can be shorter than the horizon.
    ///
    /// # Errors
    ///
    /// Returns [`ClimatlasError::InvalidCoordinate`] when the location fails
    /// [`LatLon::validate`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use climatlas::{Climatlas, LatLon};
    /// # use climatlas::ClimatlasError;
    ///
    /// # fn main() -> Result<(), ClimatlasError> {
    /// let client = Climatlas::unloaded();
    /// let outlook = client
    ///     .forecast()
    ///     .location(LatLon(23.26, 77.41))
    ///     .today(NaiveDate::from_ymd_opt(2026, 8, 25).unwrap())
    ///     .horizon(3)
    ///     .seed(7)
    ///     .call()?;
    ///
    /// assert_eq!(outlook.len(), 3);
    /// assert_eq!(outlook[0].month_name, "Aug");
    /// assert_eq!(outlook[2].month_name, "Oct");
    /// // Nothing is loaded, so the global default tier answers.
    /// assert_eq!(outlook[0].data_source, "Global Climate Model");
    /// assert_eq!(outlook[0].confidence, 0.60);
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub fn forecast(
        &self,
        location: LatLon,
        today: Option<NaiveDate>,
        horizon: Option<usize>,
        seed: Option<u64>,
    ) -> Result<Vec<ForecastMonth>, ClimatlasError> {
        let LatLon(latitude, longitude) = location.validate()?;
        let today = today.unwrap_or_else(|| Local::now().date_naive());
        let horizon = horizon.unwrap_or(DEFAULT_HORIZON);
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let region = resolve(&self.store, latitude, longitude);
        let months = schedule(today, horizon);
        Ok(synthesize(
            &self.store,
            &region,
            latitude,
            longitude,
            &months,
            &mut rng,
        ))
    }

    /// Finds the reference city closest to a coordinate.
    ///
    /// All representative cities of every loaded continent are compared by
    /// great-circle distance; ties keep the first city in ingestion order.
    ///
    /// # Arguments
    ///
    /// * `location` - The coordinate to measure from.
    ///
    /// # Returns
    ///
    /// The winning [`NearestCity`] with its continent id and distance in
    /// kilometers, or `None` when no loaded continent lists any city. An
    /// unloaded store always yields `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ClimatlasError::InvalidCoordinate`] when the location fails
    /// [`LatLon::validate`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use climatlas::{Climatlas, DatasetStore, LatLon};
    /// # use climatlas::{ContinentDataset, HemisphereDataset, LocationMapping};
    /// # fn main() -> Result<(), climatlas::ClimatlasError> {
    /// # let mapping: LocationMapping = serde_json::from_str(r#"{
    /// #     "coordinate_regions": {
    /// #         "asia": { "lat_range": [0, 40], "lon_range": [60, 100],
    /// #                   "hemisphere": "Northern", "continent_file": "asia" }
    /// #     }
    /// # }"#).unwrap();
    /// # let hemisphere: HemisphereDataset =
    /// #     serde_json::from_str(r#"{ "six_month_patterns": {} }"#).unwrap();
    /// # let asia: ContinentDataset = serde_json::from_str(r#"{
    /// #     "continent": "Asia",
    /// #     "six_month_patterns": {},
    /// #     "representative_cities": [{ "name": "Delhi", "lat": 28.7, "lon": 77.1 }]
    /// # }"#).unwrap();
    /// # let client = Climatlas::new(DatasetStore::from_parts(
    /// #     Some(mapping), Some(hemisphere.clone()), Some(hemisphere),
    /// #     vec![("asia".to_string(), asia)]));
    /// let nearest = client
    ///     .nearest_city(LatLon(28.6, 77.2))?
    ///     .expect("dataset lists cities");
    /// assert_eq!(nearest.city.name, "Delhi");
    /// assert_eq!(nearest.continent, "asia");
    /// assert!(nearest.distance_km < 20.0);
    /// # Ok(())
    /// # }
    /// ```
    pub fn nearest_city(&self, location: LatLon) -> Result<Option<NearestCity>, ClimatlasError> {
        let LatLon(latitude, longitude) = location.validate()?;
        Ok(nearest_city(&self.store, latitude, longitude))
    }
}
