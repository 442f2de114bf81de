use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClimatlasError {
    #[error("Invalid coordinate ({latitude}, {longitude}): latitude must be a finite value in [-90, 90] and longitude a finite value in [-180, 180]")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
}
