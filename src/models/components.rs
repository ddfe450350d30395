use serde::{Deserialize, Serialize};

// ─── Sandia Array Performance Model (SAPM) module record ─────────────────────

/// Module coefficients as published in the Sandia module database.
/// Field names on the wire follow the SAM table column headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SandiaModule {
    #[serde(rename = "Area")]
    pub area: f64,
    #[serde(rename = "Cells_in_Series")]
    pub cells_in_series: f64,
    #[serde(rename = "Parallel_Strings")]
    pub parallel_strings: f64,
    #[serde(rename = "Isco")]
    pub isco: f64,
    #[serde(rename = "Voco")]
    pub voco: f64,
    #[serde(rename = "Impo")]
    pub impo: f64,
    #[serde(rename = "Vmpo")]
    pub vmpo: f64,
    #[serde(rename = "aIsc")]
    pub a_isc: f64,
    #[serde(rename = "aImp")]
    pub a_imp: f64,
    #[serde(rename = "C0")]
    pub c0: f64,
    #[serde(rename = "C1")]
    pub c1: f64,
    #[serde(rename = "Bvoco")]
    pub bvoco: f64,
    #[serde(rename = "Mbvoc")]
    pub mbvoc: f64,
    #[serde(rename = "Bvmpo")]
    pub bvmpo: f64,
    #[serde(rename = "Mbvmp")]
    pub mbvmp: f64,
    /// Diode factor
    #[serde(rename = "N")]
    pub n: f64,
    #[serde(rename = "C2")]
    pub c2: f64,
    #[serde(rename = "C3")]
    pub c3: f64,
    /// Air-mass (spectral) polynomial, A0 + A1·AM + … + A4·AM⁴
    #[serde(rename = "A0")]
    pub a0: f64,
    #[serde(rename = "A1")]
    pub a1: f64,
    #[serde(rename = "A2")]
    pub a2: f64,
    #[serde(rename = "A3")]
    pub a3: f64,
    #[serde(rename = "A4")]
    pub a4: f64,
    /// Incidence-angle polynomial, B0 + B1·θ + … + B5·θ⁵
    #[serde(rename = "B0")]
    pub b0: f64,
    #[serde(rename = "B1")]
    pub b1: f64,
    #[serde(rename = "B2")]
    pub b2: f64,
    #[serde(rename = "B3")]
    pub b3: f64,
    #[serde(rename = "B4")]
    pub b4: f64,
    #[serde(rename = "B5")]
    pub b5: f64,
    #[serde(rename = "DTC")]
    pub dtc: f64,
    /// Fraction of diffuse irradiance used by the module
    #[serde(rename = "FD")]
    pub fd: f64,
    #[serde(rename = "C4")]
    pub c4: f64,
    #[serde(rename = "C5")]
    pub c5: f64,
    #[serde(rename = "IXO")]
    pub ixo: f64,
    #[serde(rename = "IXXO")]
    pub ixxo: f64,
    #[serde(rename = "C6")]
    pub c6: f64,
    #[serde(rename = "C7")]
    pub c7: f64,
}

impl SandiaModule {
    /// Spectral polynomial coefficients, lowest order first.
    pub fn airmass_coefficients(&self) -> [f64; 5] {
        [self.a0, self.a1, self.a2, self.a3, self.a4]
    }

    /// Incidence-angle modifier coefficients, lowest order first.
    pub fn aoi_coefficients(&self) -> [f64; 6] {
        [self.b0, self.b1, self.b2, self.b3, self.b4, self.b5]
    }
}

// ─── Sandia grid-tied inverter record ────────────────────────────────────────

/// Inverter coefficients as published in the CEC inverter database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SandiaInverter {
    /// Nominal AC voltage (V)
    #[serde(rename = "Vac")]
    pub vac: f64,
    /// Maximum AC output (W)
    #[serde(rename = "Paco")]
    pub paco: f64,
    /// DC power at which the AC rating is reached (W)
    #[serde(rename = "Pdco")]
    pub pdco: f64,
    /// DC voltage at which the AC rating is reached (V)
    #[serde(rename = "Vdco")]
    pub vdco: f64,
    /// Self-consumption / start-up DC power (W)
    #[serde(rename = "Pso")]
    pub pso: f64,
    #[serde(rename = "C0")]
    pub c0: f64,
    #[serde(rename = "C1")]
    pub c1: f64,
    #[serde(rename = "C2")]
    pub c2: f64,
    #[serde(rename = "C3")]
    pub c3: f64,
    /// Night tare (W)
    #[serde(rename = "Pnt")]
    pub pnt: f64,
    #[serde(rename = "Vdcmax")]
    pub vdcmax: f64,
    #[serde(rename = "Idcmax")]
    pub idcmax: f64,
    #[serde(rename = "Mppt_low")]
    pub mppt_low: f64,
    #[serde(rename = "Mppt_high")]
    pub mppt_high: f64,
}

// ─── Thermal model ───────────────────────────────────────────────────────────

/// SAPM cell temperature coefficients for one mounting configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThermalParameters {
    pub a: f64,
    pub b: f64,
    #[serde(rename = "deltaT")]
    pub delta_t: f64,
}

/// The resolved hardware of the installation.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemComponents {
    pub module: SandiaModule,
    pub inverter: SandiaInverter,
    pub thermal: ThermalParameters,
}
