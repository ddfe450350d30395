//! Typical-meteorological-year weather and site elevation.
//!
//! The fetch is the only I/O of an estimate, so it sits behind
//! [`WeatherProvider`]; [`PvgisClient`] talks to the EU JRC PVGIS service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, info};

use crate::error::WeatherError;
use crate::models::weather::{PvgisErrorBody, PvgisTmyResponse, TmyWeather};

pub const DEFAULT_PVGIS_URL: &str = "https://re.jrc.ec.europa.eu/api/v5_2/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Hourly TMY series plus site metadata for the coordinates.
    async fn fetch_tmy(&self, latitude: f64, longitude: f64) -> Result<TmyWeather, WeatherError>;
}

/// PVGIS `tmy` endpoint client
pub struct PvgisClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl PvgisClient {
    /// Fails if the HTTP client cannot be built; there is no fallback
    /// client without the timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, WeatherError> {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(WeatherError::Transport)?;
        Ok(Self { client, base_url, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn classify(&self, e: reqwest::Error) -> WeatherError {
        if e.is_timeout() {
            WeatherError::Timeout(self.timeout)
        } else {
            WeatherError::Transport(e)
        }
    }
}

#[async_trait]
impl WeatherProvider for PvgisClient {
    async fn fetch_tmy(&self, latitude: f64, longitude: f64) -> Result<TmyWeather, WeatherError> {
        let url = format!(
            "{}tmy?lat={}&lon={}&outputformat=json",
            self.base_url, latitude, longitude
        );
        debug!("Fetching TMY from PVGIS: {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| self.classify(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            // PVGIS explains rejected coordinates in a JSON `message`
            let message = serde_json::from_str::<PvgisErrorBody>(&body)
                .map(|b| b.message)
                .unwrap_or(body);
            error!("PVGIS returned {}: {}", status, message);
            return Err(WeatherError::Rejected { status: status.as_u16(), message });
        }

        let parsed: PvgisTmyResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::Decode(e.to_string()))?;
        let tmy = TmyWeather::try_from(parsed)?;

        info!(
            "Fetched TMY for ({}, {}): {} records, elevation {} m",
            latitude,
            longitude,
            tmy.len(),
            tmy.site.elevation
        );
        Ok(tmy)
    }
}
