//! Resolves a coordinate to a continent id and hemisphere using the ordered
//! region mapping.

use crate::dataset::store::DatasetStore;
use crate::types::region::{Hemisphere, RegionDescriptor};

/// Resolves `latitude`/`longitude` against the store's location mapping.
///
/// Before any dataset is loaded this returns the fixed bootstrap descriptor.
/// Otherwise the mapping is scanned in document order and the first region
/// box containing the coordinate wins; its declared hemisphere overrides the
/// computed one unless the declaration is `Mixed`. A coordinate outside every
/// box resolves to no continent with the computed hemisphere.
pub(crate) fn resolve(store: &DatasetStore, latitude: f64, longitude: f64) -> RegionDescriptor {
    let Some(tables) = store.tables() else {
        return RegionDescriptor::bootstrap();
    };

    let computed = Hemisphere::of_latitude(latitude);
    for region in &tables.mapping.regions {
        if region.contains(latitude, longitude) {
            return RegionDescriptor {
                continent: Some(region.id.clone()),
                hemisphere: region.hemisphere.resolve(computed),
            };
        }
    }

    RegionDescriptor {
        continent: None,
        hemisphere: computed,
    }
}
