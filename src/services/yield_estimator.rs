//! Annual AC energy yield of a single fixed PV installation.
//!
//! One call resolves the fixed components, fetches the TMY series for the
//! site and runs every hour through sun position → POA irradiance → cell
//! temperature → SAPM DC → Sandia AC. The hourly AC powers are summed,
//! rounded to whole Wh and reported in kWh.

use std::sync::Arc;

use chrono::Datelike;
use tracing::{debug, info, warn};

use crate::error::{CatalogError, YieldError};
use crate::models::components::SystemComponents;
use crate::models::estimate::{AcPoint, SurfaceOrientation, YieldBreakdown};
use crate::models::weather::{TmyWeather, WeatherRecord};
use crate::services::catalog::{
    ComponentCatalog, INVERTER_NAME, MODULE_NAME, THERMAL_FAMILY, THERMAL_MOUNTING,
    ThermalModelCatalog,
};
use crate::services::irradiance;
use crate::services::plot::SeriesPlotter;
use crate::services::pv_model;
use crate::services::solar_position::{Observer, SunPosition};
use crate::services::weather_service::WeatherProvider;

/// Modules always face due south (azimuth clockwise from north).
pub const SURFACE_AZIMUTH: f64 = 180.0;

/// Fixed-tilt heuristic: tilt equals latitude, azimuth is always 180°.
/// Southern-hemisphere sites get a negative tilt, as the formula dictates.
pub fn surface_orientation(latitude: f64) -> SurfaceOrientation {
    SurfaceOrientation { tilt_deg: latitude, azimuth_deg: SURFACE_AZIMUTH }
}

/// Σ AC over the series in Wh (records are hourly, so W·1 h). NaN points
/// (missing input data) are skipped.
pub fn total_energy_wh(series: &[AcPoint]) -> f64 {
    series.iter().map(|p| p.ac_power_w).filter(|p| !p.is_nan()).sum()
}

/// Energy in kWh: the Wh total rounded to the nearest whole Wh
/// (ties to even) and then divided by 1000.
pub fn energy_yield_kwh(series: &[AcPoint]) -> f64 {
    let whole_wh = total_energy_wh(series).round_ties_even() as i64;
    whole_wh as f64 / 1000.0
}

/// AC power (W) of one module/inverter pair for one weather record.
pub fn hourly_ac_power(
    observer: &Observer,
    surface: SurfaceOrientation,
    record: &WeatherRecord,
    components: &SystemComponents,
) -> Result<f64, YieldError> {
    let sun = observer.position_for(record)?;
    Ok(ac_power_at(surface, sun, record, components))
}

/// AC power (W) for a record once the sun position is known.
pub fn ac_power_at(
    surface: SurfaceOrientation,
    sun: SunPosition,
    record: &WeatherRecord,
    components: &SystemComponents,
) -> f64 {
    let dni_extra = irradiance::extra_radiation(record.time.ordinal());
    let airmass = irradiance::relative_airmass(sun.apparent_zenith);
    let am_abs = irradiance::absolute_airmass(airmass, record.pressure);
    let aoi = irradiance::aoi(surface, sun);
    let poa = irradiance::total_irradiance(
        surface,
        sun,
        record.dni,
        record.ghi,
        record.dhi,
        dni_extra,
    );

    let t_cell = pv_model::sapm_cell_temperature(
        poa.global,
        record.temp_air,
        record.wind_speed,
        &components.thermal,
    );
    let effective = pv_model::sapm_effective_irradiance(
        poa.direct,
        poa.diffuse,
        am_abs,
        aoi,
        &components.module,
    );
    let dc = pv_model::sapm(effective, t_cell, &components.module);
    pv_model::sandia_inverter(dc.v_mp, dc.p_mp, &components.inverter)
}

/// The full computation for an already-fetched weather series. No I/O.
pub fn annual_yield_from_weather(
    latitude: f64,
    longitude: f64,
    weather: &TmyWeather,
    components: &SystemComponents,
) -> Result<YieldBreakdown, YieldError> {
    let orientation = surface_orientation(latitude);
    let observer = Observer {
        latitude,
        longitude,
        altitude: weather.site.elevation,
    };

    let hourly = weather
        .records
        .iter()
        .map(|record| {
            hourly_ac_power(&observer, orientation, record, components).map(|ac_power_w| {
                AcPoint {
                    time: record.time,
                    ac_power_w,
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let energy_wh = total_energy_wh(&hourly);
    let annual_energy_kwh = energy_yield_kwh(&hourly);
    debug!(
        "{} hours, {} producing, {:.1} Wh",
        hourly.len(),
        hourly.iter().filter(|p| p.ac_power_w > 0.0).count(),
        energy_wh
    );

    Ok(YieldBreakdown {
        orientation,
        elevation_m: weather.site.elevation,
        hourly,
        energy_wh,
        annual_energy_kwh,
    })
}

/// Estimator with its collaborators injected.
pub struct YieldEstimator {
    catalog: Arc<dyn ComponentCatalog>,
    thermal: Arc<dyn ThermalModelCatalog>,
    weather: Arc<dyn WeatherProvider>,
    plotter: Option<Arc<dyn SeriesPlotter>>,
}

impl YieldEstimator {
    pub fn new(
        catalog: Arc<dyn ComponentCatalog>,
        thermal: Arc<dyn ThermalModelCatalog>,
        weather: Arc<dyn WeatherProvider>,
    ) -> Self {
        Self { catalog, thermal, weather, plotter: None }
    }

    pub fn with_plotter(mut self, plotter: Arc<dyn SeriesPlotter>) -> Self {
        self.plotter = Some(plotter);
        self
    }

    /// Looks up the fixed module, inverter and thermal coefficients.
    pub fn components(&self) -> Result<SystemComponents, CatalogError> {
        Ok(SystemComponents {
            module: self.catalog.module(MODULE_NAME)?,
            inverter: self.catalog.inverter(INVERTER_NAME)?,
            thermal: self.thermal.parameters(THERMAL_FAMILY, THERMAL_MOUNTING)?,
        })
    }

    /// Estimated annual AC energy (kWh) at the coordinates.
    pub async fn estimate(&self, latitude: f64, longitude: f64) -> Result<f64, YieldError> {
        Ok(self.estimate_breakdown(latitude, longitude).await?.annual_energy_kwh)
    }

    pub async fn estimate_breakdown(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<YieldBreakdown, YieldError> {
        let components = self.components()?;
        let weather = self.weather.fetch_tmy(latitude, longitude).await?;
        let breakdown = annual_yield_from_weather(latitude, longitude, &weather, &components)?;

        if let Some(plotter) = &self.plotter {
            if let Err(e) = plotter.plot(&breakdown.hourly) {
                warn!("Plotting AC series failed: {}", e);
            }
        }

        info!(
            "Yield at ({}, {}): {} kWh (tilt {:.1}°, azimuth {:.0}°)",
            latitude,
            longitude,
            breakdown.annual_energy_kwh,
            breakdown.orientation.tilt_deg,
            breakdown.orientation.azimuth_deg
        );
        Ok(breakdown)
    }
}
