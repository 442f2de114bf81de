mod cities;
mod climatlas;
mod dataset;
mod error;
mod forecast;
mod region;
mod types;
mod utils;

pub use climatlas::*;
pub use error::ClimatlasError;

pub use dataset::load::{DatasetProvider, CONTINENTS};
pub use dataset::store::DatasetStore;

pub use types::dataset::*;
pub use types::forecast_month::*;
pub use types::region::*;
