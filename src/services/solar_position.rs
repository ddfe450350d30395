//! Per-timestamp sun position for a site, using the NREL Solar Position
//! Algorithm with refraction driven by the recorded pressure and temperature.

use chrono::{DateTime, Datelike, Utc};
use solar_positioning::{RefractionCorrection, spa, time::DeltaT};

use crate::models::weather::WeatherRecord;

/// Pa → mbar
const PA_PER_MBAR: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunPosition {
    /// Refraction-corrected zenith (deg)
    pub apparent_zenith: f64,
    /// Clockwise from north (deg)
    pub azimuth: f64,
}

/// Observer context shared by every timestamp of one run.
#[derive(Debug, Clone, Copy)]
pub struct Observer {
    pub latitude: f64,
    pub longitude: f64,
    /// Altitude above sea level (m)
    pub altitude: f64,
}

impl Observer {
    pub fn position_at(
        &self,
        time: DateTime<Utc>,
        pressure_pa: f64,
        temperature_c: f64,
    ) -> Result<SunPosition, solar_positioning::Error> {
        let delta_t = DeltaT::estimate_from_date(time.year(), time.month())?;
        let refraction = RefractionCorrection::new(pressure_pa / PA_PER_MBAR, temperature_c)?;
        let pos = spa::solar_position(
            time,
            self.latitude,
            self.longitude,
            self.altitude,
            delta_t,
            Some(refraction),
        )?;
        Ok(SunPosition {
            apparent_zenith: pos.zenith_angle(),
            azimuth: pos.azimuth(),
        })
    }

    pub fn position_for(
        &self,
        record: &WeatherRecord,
    ) -> Result<SunPosition, solar_positioning::Error> {
        self.position_at(record.time, record.pressure, record.temp_air)
    }
}
