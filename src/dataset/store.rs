//! The immutable in-memory snapshot of the climate dataset.

use crate::types::dataset::{ContinentDataset, HemisphereDataset, LocationMapping};
use crate::types::region::Hemisphere;

/// All tables of a fully ingested dataset.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ClimateTables {
    pub(crate) mapping: LocationMapping,
    pub(crate) northern: HemisphereDataset,
    pub(crate) southern: HemisphereDataset,
    /// Continent datasets keyed by continent id, in ingestion order.
    pub(crate) continents: Vec<(String, ContinentDataset)>,
}

#[derive(Debug, Clone, PartialEq, Default)]
enum LoadState {
    #[default]
    NotLoaded,
    Loaded(ClimateTables),
}

/// An immutable snapshot of the bundled climate dataset.
///
/// A store is either `Loaded` and fully usable, or `NotLoaded`, in which case
/// every operation takes its documented fallback path. There is no partial
/// state in between and no mutation after construction; refreshing data means
/// building a new store and swapping the value at the call site.
///
/// # Examples
///
/// ```
/// use climatlas::DatasetStore;
///
/// let store = DatasetStore::not_loaded();
/// assert!(!store.is_loaded());
/// assert_eq!(store.continent_count(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DatasetStore {
    state: LoadState,
}

impl DatasetStore {
    /// An empty store. Operations served from it fall back to the bootstrap
    /// region and the global default forecast.
    pub fn not_loaded() -> Self {
        DatasetStore::default()
    }

    /// Assembles a store from individually ingested tables.
    ///
    /// The location mapping and both hemisphere tables are all required for
    /// the store to count as loaded; if any of the three is missing the whole
    /// store degrades to [`DatasetStore::not_loaded`]. Continent tables are
    /// individually optional and absent ones simply stay absent.
    ///
    /// # Arguments
    ///
    /// * `mapping` - The ordered coordinate-region mapping, if it ingested.
    /// * `northern` / `southern` - The hemisphere tables, if they ingested.
    /// * `continents` - `(continent id, dataset)` pairs; the given order
    ///   becomes the iteration order for nearest-city lookups.
    pub fn from_parts(
        mapping: Option<LocationMapping>,
        northern: Option<HemisphereDataset>,
        southern: Option<HemisphereDataset>,
        continents: Vec<(String, ContinentDataset)>,
    ) -> Self {
        match (mapping, northern, southern) {
            (Some(mapping), Some(northern), Some(southern)) => DatasetStore {
                state: LoadState::Loaded(ClimateTables {
                    mapping,
                    northern,
                    southern,
                    continents,
                }),
            },
            _ => DatasetStore::not_loaded(),
        }
    }

    /// Whether the mandatory tables are present.
    pub fn is_loaded(&self) -> bool {
        matches!(self.state, LoadState::Loaded(_))
    }

    /// Number of continent tables held; 0 when not loaded.
    pub fn continent_count(&self) -> usize {
        self.tables().map_or(0, |tables| tables.continents.len())
    }

    pub(crate) fn tables(&self) -> Option<&ClimateTables> {
        match &self.state {
            LoadState::Loaded(tables) => Some(tables),
            LoadState::NotLoaded => None,
        }
    }

    pub(crate) fn continent(&self, id: &str) -> Option<&ContinentDataset> {
        self.tables()?
            .continents
            .iter()
            .find(|(continent_id, _)| continent_id == id)
            .map(|(_, dataset)| dataset)
    }

    pub(crate) fn hemisphere(&self, hemisphere: Hemisphere) -> Option<&HemisphereDataset> {
        let tables = self.tables()?;
        Some(match hemisphere {
            Hemisphere::Northern => &tables.northern,
            Hemisphere::Southern => &tables.southern,
        })
    }

    /// Continent datasets in ingestion order; empty when not loaded.
    pub(crate) fn continents(&self) -> impl Iterator<Item = (&str, &ContinentDataset)> {
        self.tables()
            .into_iter()
            .flat_map(|tables| tables.continents.iter())
            .map(|(id, dataset)| (id.as_str(), dataset))
    }
}
