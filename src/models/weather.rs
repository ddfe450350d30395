use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

// ─── Internal weather series ─────────────────────────────────────────────────

/// One hourly record of a typical meteorological year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherRecord {
    pub time: DateTime<Utc>,
    /// Air temperature at 2 m (°C)
    pub temp_air: f64,
    /// Wind speed at 10 m (m/s)
    pub wind_speed: f64,
    /// Surface pressure (Pa)
    pub pressure: f64,
    /// Global horizontal irradiance (W/m²)
    pub ghi: f64,
    /// Direct normal irradiance (W/m²)
    pub dni: f64,
    /// Diffuse horizontal irradiance (W/m²)
    pub dhi: f64,
    pub relative_humidity: f64,
    pub ghi_infrared: f64,
    pub wind_direction: f64,
}

/// Location block returned alongside the series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiteMetadata {
    pub latitude: f64,
    pub longitude: f64,
    /// Site elevation above sea level (m)
    pub elevation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectedMonth {
    pub month: u32,
    pub year: i32,
}

/// A TMY weather series together with its site metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TmyWeather {
    pub records: Vec<WeatherRecord>,
    pub site: SiteMetadata,
    pub months_selected: Vec<SelectedMonth>,
}

impl TmyWeather {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ─── PVGIS wire types ────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PvgisTmyResponse {
    pub inputs: PvgisInputs,
    pub outputs: PvgisOutputs,
}

#[derive(Debug, Deserialize)]
pub struct PvgisInputs {
    pub location: SiteMetadata,
}

#[derive(Debug, Deserialize)]
pub struct PvgisOutputs {
    #[serde(default)]
    pub months_selected: Vec<SelectedMonth>,
    pub tmy_hourly: Vec<PvgisHourly>,
}

#[derive(Debug, Deserialize)]
pub struct PvgisHourly {
    #[serde(rename = "time(UTC)")]
    pub time: String,
    #[serde(rename = "T2m")]
    pub t2m: f64,
    #[serde(rename = "RH", default)]
    pub rh: f64,
    #[serde(rename = "G(h)")]
    pub g_h: f64,
    #[serde(rename = "Gb(n)")]
    pub gb_n: f64,
    #[serde(rename = "Gd(h)")]
    pub gd_h: f64,
    #[serde(rename = "IR(h)", default)]
    pub ir_h: f64,
    #[serde(rename = "WS10m")]
    pub ws10m: f64,
    #[serde(rename = "WD10m", default)]
    pub wd10m: f64,
    #[serde(rename = "SP")]
    pub sp: f64,
}

/// Error body PVGIS sends with 4xx responses.
#[derive(Debug, Deserialize)]
pub struct PvgisErrorBody {
    pub message: String,
}

/// PVGIS timestamps look like `20070101:0010`.
const PVGIS_TIME_FORMAT: &str = "%Y%m%d:%H%M";

impl PvgisHourly {
    pub fn into_record(self) -> Result<WeatherRecord, WeatherError> {
        let naive = NaiveDateTime::parse_from_str(&self.time, PVGIS_TIME_FORMAT)
            .map_err(|e| WeatherError::Decode(format!("bad timestamp '{}': {}", self.time, e)))?;
        Ok(WeatherRecord {
            time: naive.and_utc(),
            temp_air: self.t2m,
            wind_speed: self.ws10m,
            pressure: self.sp,
            ghi: self.g_h,
            dni: self.gb_n,
            dhi: self.gd_h,
            relative_humidity: self.rh,
            ghi_infrared: self.ir_h,
            wind_direction: self.wd10m,
        })
    }
}

impl TryFrom<PvgisTmyResponse> for TmyWeather {
    type Error = WeatherError;

    fn try_from(resp: PvgisTmyResponse) -> Result<Self, Self::Error> {
        if resp.outputs.tmy_hourly.is_empty() {
            return Err(WeatherError::Empty);
        }
        let records = resp
            .outputs
            .tmy_hourly
            .into_iter()
            .map(PvgisHourly::into_record)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TmyWeather {
            records,
            site: resp.inputs.location,
            months_selected: resp.outputs.months_selected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn sample_json() -> serde_json::Value {
        serde_json::json!({
            "inputs": {
                "location": { "latitude": 45.0, "longitude": 8.0, "elevation": 250.0 },
                "meteo_data": { "radiation_db": "PVGIS-SARAH2" }
            },
            "outputs": {
                "months_selected": [{ "month": 1, "year": 2014 }],
                "tmy_hourly": [
                    { "time(UTC)": "20140101:0000", "T2m": 1.5, "RH": 90.0, "G(h)": 0.0,
                      "Gb(n)": 0.0, "Gd(h)": 0.0, "IR(h)": 270.0, "WS10m": 1.2,
                      "WD10m": 200.0, "SP": 98500.0 },
                    { "time(UTC)": "20140101:1100", "T2m": 6.0, "RH": 70.0, "G(h)": 310.0,
                      "Gb(n)": 520.0, "Gd(h)": 95.0, "IR(h)": 280.0, "WS10m": 2.5,
                      "WD10m": 180.0, "SP": 98400.0 }
                ]
            },
            "meta": {}
        })
    }

    #[test]
    fn test_pvgis_response_maps_variables() {
        let resp: PvgisTmyResponse = serde_json::from_value(sample_json()).unwrap();
        let tmy = TmyWeather::try_from(resp).unwrap();

        assert_eq!(tmy.len(), 2);
        assert_eq!(tmy.site.elevation, 250.0);
        assert_eq!(tmy.months_selected, vec![SelectedMonth { month: 1, year: 2014 }]);

        let noon = &tmy.records[1];
        assert_eq!(noon.time.year(), 2014);
        assert_eq!(noon.time.hour(), 11);
        assert_eq!(noon.temp_air, 6.0);
        assert_eq!(noon.wind_speed, 2.5);
        assert_eq!(noon.pressure, 98400.0);
        assert_eq!(noon.ghi, 310.0);
        assert_eq!(noon.dni, 520.0);
        assert_eq!(noon.dhi, 95.0);
    }

    #[test]
    fn test_bad_timestamp_is_decode_error() {
        let mut json = sample_json();
        json["outputs"]["tmy_hourly"][0]["time(UTC)"] = serde_json::json!("2014-01-01 00:00");
        let resp: PvgisTmyResponse = serde_json::from_value(json).unwrap();
        assert!(matches!(TmyWeather::try_from(resp), Err(WeatherError::Decode(_))));
    }

    #[test]
    fn test_empty_series_is_rejected() {
        let mut json = sample_json();
        json["outputs"]["tmy_hourly"] = serde_json::json!([]);
        let resp: PvgisTmyResponse = serde_json::from_value(json).unwrap();
        assert!(matches!(TmyWeather::try_from(resp), Err(WeatherError::Empty)));
    }
}
