//! Nearest-city lookup over the representative cities of the loaded
//! continents.

use crate::dataset::store::DatasetStore;
use crate::types::forecast_month::NearestCity;
use haversine::{distance, Location as HaversineLocation, Units};
use ordered_float::OrderedFloat;

/// Finds the representative city closest to `latitude`/`longitude`.
///
/// Cities are scanned continent by continent in ingestion order and compared
/// by great-circle distance; on an exact tie the first city encountered wins.
/// Returns `None` when no continent lists any city, which includes the
/// not-loaded store.
pub(crate) fn nearest_city(
    store: &DatasetStore,
    latitude: f64,
    longitude: f64,
) -> Option<NearestCity> {
    store
        .continents()
        .flat_map(|(id, dataset)| {
            dataset
                .representative_cities
                .iter()
                .map(move |city| (id, city))
        })
        .map(|(id, city)| {
            let distance_km = distance(
                HaversineLocation {
                    latitude,
                    longitude,
                },
                HaversineLocation {
                    latitude: city.lat,
                    longitude: city.lon,
                },
                Units::Kilometers,
            );
            (id, city, distance_km)
        })
        .min_by_key(|(_, _, distance_km)| OrderedFloat(*distance_km))
        .map(|(id, city, distance_km)| NearestCity {
            city: city.clone(),
            continent: id.to_string(),
            distance_km,
        })
}
