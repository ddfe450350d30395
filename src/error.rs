use std::time::Duration;

use thiserror::Error;

/// Lookup failures in the component and thermal-model catalogs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CatalogError {
    #[error("module '{0}' not found in catalog")]
    UnknownModule(String),
    #[error("inverter '{0}' not found in catalog")]
    UnknownInverter(String),
    #[error("thermal model family '{0}' not found")]
    UnknownThermalFamily(String),
    #[error("mounting '{mounting}' not defined for thermal model '{family}'")]
    UnknownMounting { family: String, mounting: String },
    #[error("failed to load catalog file {path}: {reason}")]
    Load { path: String, reason: String },
}

/// Failures at the weather/elevation fetch boundary.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("weather request timed out after {0:?}")]
    Timeout(Duration),
    #[error("weather request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("weather service rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("could not decode weather response: {0}")]
    Decode(String),
    #[error("weather service returned no hourly records")]
    Empty,
}

/// Top-level error of a yield estimate. Collaborator errors pass through unchanged.
#[derive(Debug, Error)]
pub enum YieldError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Weather(#[from] WeatherError),
    #[error("solar position: {0}")]
    SolarPosition(#[from] solar_positioning::Error),
}
