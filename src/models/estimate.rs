use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// ─── Core estimate types ─────────────────────────────────────────────────────

/// Fixed orientation of the module plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SurfaceOrientation {
    /// Tilt from horizontal (deg)
    pub tilt_deg: f64,
    /// Azimuth, clockwise from north (deg); 180 = facing south
    pub azimuth_deg: f64,
}

/// AC output for one timestamp. Negative at night (inverter tare).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AcPoint {
    pub time: DateTime<Utc>,
    pub ac_power_w: f64,
}

/// Intermediate values of one estimate, kept for inspection and plotting.
#[derive(Debug, Clone, PartialEq)]
pub struct YieldBreakdown {
    pub orientation: SurfaceOrientation,
    pub elevation_m: f64,
    pub hourly: Vec<AcPoint>,
    /// Σ AC over the series, before rounding (Wh)
    pub energy_wh: f64,
    /// Final figure (kWh)
    pub annual_energy_kwh: f64,
}

// ─── REST API types ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct YieldQuery {
    /// Site latitude (deg)
    pub latitude: f64,
    /// Site longitude (deg)
    pub longitude: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct YieldResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub surface_tilt: f64,
    pub surface_azimuth: f64,
    pub elevation_m: f64,
    pub annual_energy_kwh: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
