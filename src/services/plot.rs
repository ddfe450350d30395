//! Optional visualisation of the hourly AC series.
//!
//! Nothing is rendered unless a plotter is injected into the estimator.
//! Points are labelled `MM-DD HH:MM:SS` so the TMY months, which come from
//! different source years, line up on one axis.

use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::models::estimate::AcPoint;

pub const LABEL_FORMAT: &str = "%m-%d %H:%M:%S";

pub trait SeriesPlotter: Send + Sync {
    fn plot(&self, series: &[AcPoint]) -> std::io::Result<()>;
}

#[derive(Debug, Serialize)]
pub struct LabelledPoint {
    pub dat: String,
    /// AC power (W); `null` where the input data was missing
    pub val: f64,
}

pub fn label_series(series: &[AcPoint]) -> Vec<LabelledPoint> {
    series
        .iter()
        .map(|p| LabelledPoint {
            dat: p.time.format(LABEL_FORMAT).to_string(),
            val: p.ac_power_w,
        })
        .collect()
}

/// Writes the labelled series as a JSON array, ready for any charting front end.
#[derive(Debug, Clone)]
pub struct JsonSeriesWriter {
    path: PathBuf,
}

impl JsonSeriesWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SeriesPlotter for JsonSeriesWriter {
    fn plot(&self, series: &[AcPoint]) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(&label_series(series))?;
        std::fs::write(&self.path, json)?;
        info!("Wrote {} points to {}", series.len(), self.path.display());
        Ok(())
    }
}
