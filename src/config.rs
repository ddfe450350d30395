use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::services::weather_service::{DEFAULT_PVGIS_URL, DEFAULT_TIMEOUT};

fn default_port() -> u16 { 8080 }
fn default_pvgis_url() -> String { DEFAULT_PVGIS_URL.to_string() }
fn default_timeout_secs() -> u64 { DEFAULT_TIMEOUT.as_secs() }

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub pvgis: PvgisConfig,
    /// JSON component catalog replacing the built-in entries
    #[serde(default)]
    pub catalog_path: Option<String>,
    /// Plotting is off unless an output path is given
    #[serde(default)]
    pub plot: PlotConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: default_port() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PvgisConfig {
    #[serde(default = "default_pvgis_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl PvgisConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for PvgisConfig {
    fn default() -> Self {
        Self { base_url: default_pvgis_url(), timeout_secs: default_timeout_secs() }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct PlotConfig {
    pub output_path: Option<String>,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}
