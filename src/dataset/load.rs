//! One-time bulk ingestion of the dataset through a caller-supplied provider.

use crate::dataset::store::DatasetStore;
use crate::types::dataset::{ContinentDataset, HemisphereDataset, LocationMapping};
use crate::types::region::Hemisphere;
use async_trait::async_trait;
use futures_util::future::{join3, join_all};
use log::{info, warn};
use std::fmt::Display;

/// The seven continent ids the loader requests, in request order.
pub const CONTINENTS: [&str; 7] = [
    "asia",
    "europe",
    "north_america",
    "south_america",
    "africa",
    "australia",
    "antarctica",
];

/// Source of the raw dataset tables.
///
/// Implementations own fetching and parsing (disk, HTTP, embedded assets);
/// the engine only orchestrates the bulk load and decides how far a partial
/// delivery degrades the store. Provider failures are logged and swallowed,
/// never propagated.
#[async_trait]
pub trait DatasetProvider {
    /// Error detail included in the load warnings.
    type Error: Display + Send;

    /// Fetches the ordered coordinate-region mapping.
    async fn location_mapping(&self) -> Result<LocationMapping, Self::Error>;

    /// Fetches one hemisphere table.
    async fn hemisphere(&self, hemisphere: Hemisphere) -> Result<HemisphereDataset, Self::Error>;

    /// Fetches one continent table by id (see [`CONTINENTS`]).
    async fn continent(&self, continent: &str) -> Result<ContinentDataset, Self::Error>;
}

impl DatasetStore {
    /// Loads every dataset resource through `provider` and assembles a store.
    ///
    /// The mapping, both hemisphere tables and all seven continent tables are
    /// requested concurrently. Failures degrade exactly like
    /// [`DatasetStore::from_parts`]: a lost continent table disappears from
    /// lookups, a lost mandatory table leaves the whole store not-loaded.
    /// Each failure is logged with `warn!`; the load itself never fails.
    pub async fn load<P>(provider: &P) -> DatasetStore
    where
        P: DatasetProvider + Sync,
    {
        let (mapping, northern, southern) = join3(
            provider.location_mapping(),
            provider.hemisphere(Hemisphere::Northern),
            provider.hemisphere(Hemisphere::Southern),
        )
        .await;
        let mapping = ok_or_warn("location mapping", mapping);
        let northern = ok_or_warn("northern hemisphere table", northern);
        let southern = ok_or_warn("southern hemisphere table", southern);

        let deliveries = join_all(
            CONTINENTS
                .into_iter()
                .map(|id| async move { (id, provider.continent(id).await) }),
        )
        .await;
        let continents = deliveries
            .into_iter()
            .filter_map(|(id, delivery)| match delivery {
                Ok(dataset) => Some((id.to_string(), dataset)),
                Err(e) => {
                    warn!("Failed to load continent table {}: {}", id, e);
                    None
                }
            })
            .collect();

        let store = DatasetStore::from_parts(mapping, northern, southern, continents);
        if store.is_loaded() {
            info!(
                "Climate dataset loaded with {} continent tables",
                store.continent_count()
            );
        } else {
            warn!("Climate dataset unavailable; serving global defaults");
        }
        store
    }
}

fn ok_or_warn<T, E: Display>(resource: &str, delivery: Result<T, E>) -> Option<T> {
    match delivery {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Failed to load {}: {}", resource, e);
            None
        }
    }
}
