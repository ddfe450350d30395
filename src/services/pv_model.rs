//! Module and inverter electrical models: SAPM cell temperature, SAPM
//! effective irradiance and DC operating point, Sandia inverter AC output.
//!
//! NaN inputs (missing weather data) are carried through, not clipped away.

use crate::models::components::{SandiaInverter, SandiaModule, ThermalParameters};

const T0: f64 = 25.0; // reference cell temperature (°C)
const IRRAD_REF: f64 = 1000.0; // W/m²
const Q: f64 = 1.60218e-19; // elementary charge (C)
const KB: f64 = 1.38066e-23; // Boltzmann constant (J/K)

/// `max(0, x)` that keeps NaN.
#[inline]
fn clip_low(x: f64) -> f64 {
    if x.is_nan() { x } else { x.max(0.0) }
}

/// Polynomial with coefficients lowest order first.
fn polyval(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

// ─── Thermal ─────────────────────────────────────────────────────────────────

/// Cell temperature (°C) from plane-of-array irradiance, ambient temperature and wind.
pub fn sapm_cell_temperature(
    poa_global: f64,
    temp_air: f64,
    wind_speed: f64,
    params: &ThermalParameters,
) -> f64 {
    let module_temp = poa_global * (params.a + params.b * wind_speed).exp() + temp_air;
    module_temp + poa_global / IRRAD_REF * params.delta_t
}

// ─── Effective irradiance ────────────────────────────────────────────────────

/// Spectral correction F1. Undefined air mass (sun down) yields 0.
pub fn sapm_spectral_loss(airmass_absolute: f64, module: &SandiaModule) -> f64 {
    let loss = polyval(&module.airmass_coefficients(), airmass_absolute);
    if loss.is_nan() { 0.0 } else { loss.max(0.0) }
}

/// Incidence angle modifier F2; 0 at or beyond 90°.
pub fn sapm_iam(aoi_deg: f64, module: &SandiaModule) -> f64 {
    if aoi_deg.abs() >= 90.0 {
        return 0.0;
    }
    clip_low(polyval(&module.aoi_coefficients(), aoi_deg))
}

/// Irradiance converted to electricity by the cells (W/m²).
pub fn sapm_effective_irradiance(
    poa_direct: f64,
    poa_diffuse: f64,
    airmass_absolute: f64,
    aoi_deg: f64,
    module: &SandiaModule,
) -> f64 {
    let f1 = sapm_spectral_loss(airmass_absolute, module);
    let f2 = sapm_iam(aoi_deg, module);
    f1 * (poa_direct * f2 + module.fd * poa_diffuse)
}

// ─── DC operating point ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DcOperatingPoint {
    pub i_sc: f64,
    pub i_mp: f64,
    pub v_oc: f64,
    pub v_mp: f64,
    pub p_mp: f64,
}

/// Sandia Array Performance Model for one module.
///
/// At zero effective irradiance the log term diverges to -inf and the
/// voltages clip to 0, so `p_mp` is 0.
pub fn sapm(effective_irradiance: f64, temp_cell: f64, module: &SandiaModule) -> DcOperatingPoint {
    let ee = effective_irradiance / IRRAD_REF;
    let bvmpo = module.bvmpo + module.mbvmp * (1.0 - ee);
    let bvoco = module.bvoco + module.mbvoc * (1.0 - ee);
    let delta = module.n * KB * (temp_cell + 273.15) / Q;

    let log_ee = if ee > 0.0 {
        ee.ln()
    } else if ee == 0.0 {
        f64::NEG_INFINITY
    } else {
        f64::NAN
    };
    let cells = module.cells_in_series;
    let dt = temp_cell - T0;

    let i_sc = module.isco * ee * (1.0 + module.a_isc * dt);
    let i_mp = module.impo * (module.c0 * ee + module.c1 * ee * ee) * (1.0 + module.a_imp * dt);
    let v_oc = clip_low(module.voco + cells * delta * log_ee + bvoco * dt);
    let v_mp = clip_low(
        module.vmpo
            + module.c2 * cells * delta * log_ee
            + module.c3 * cells * (delta * log_ee).powi(2)
            + bvmpo * dt,
    );

    DcOperatingPoint { i_sc, i_mp, v_oc, v_mp, p_mp: i_mp * v_mp }
}

// ─── Inverter ────────────────────────────────────────────────────────────────

/// Sandia grid-tied inverter model: AC output (W) for a DC voltage and power.
///
/// Clipped at `Paco`; below the start-up power the inverter draws its night tare.
pub fn sandia_inverter(v_dc: f64, p_dc: f64, inverter: &SandiaInverter) -> f64 {
    let dv = v_dc - inverter.vdco;
    let a = inverter.pdco * (1.0 + inverter.c1 * dv);
    let b = inverter.pso * (1.0 + inverter.c2 * dv);
    let c = inverter.c0 * (1.0 + inverter.c3 * dv);

    let raw = (inverter.paco / (a - b) - c * (a - b)) * (p_dc - b) + c * (p_dc - b).powi(2);
    let clipped = if raw.is_nan() { raw } else { raw.min(inverter.paco) };
    if p_dc < inverter.pso {
        -inverter.pnt.abs()
    } else {
        clipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::catalog::{abb_micro_0_25, canadian_solar_cs5p_220m};
    use approx::assert_relative_eq;

    #[test]
    fn test_polyval_lowest_order_first() {
        assert_eq!(polyval(&[1.0, 2.0, 3.0], 2.0), 1.0 + 4.0 + 12.0);
    }

    #[test]
    fn test_cell_temperature_open_rack() {
        let params = ThermalParameters { a: -3.47, b: -0.0594, delta_t: 3.0 };
        let t = sapm_cell_temperature(1000.0, 20.0, 1.0, &params);
        let expected = 1000.0 * (-3.47_f64 - 0.0594).exp() + 20.0 + 3.0;
        assert_relative_eq!(t, expected, epsilon = 1e-9);
        assert_eq!(sapm_cell_temperature(0.0, 12.0, 4.0, &params), 12.0);
    }

    #[test]
    fn test_spectral_loss_night_is_zero() {
        let module = canadian_solar_cs5p_220m();
        assert_eq!(sapm_spectral_loss(f64::NAN, &module), 0.0);
        let f1 = sapm_spectral_loss(1.5, &module);
        assert!(f1 > 0.95 && f1 < 1.05, "got {}", f1);
    }

    #[test]
    fn test_iam_normal_and_grazing() {
        let module = canadian_solar_cs5p_220m();
        assert_relative_eq!(sapm_iam(0.0, &module), 1.0);
        assert_eq!(sapm_iam(90.0, &module), 0.0);
        assert_eq!(sapm_iam(120.0, &module), 0.0);
    }

    #[test]
    fn test_sapm_at_reference_conditions() {
        let module = canadian_solar_cs5p_220m();
        let dc = sapm(1000.0, 25.0, &module);
        assert_relative_eq!(dc.v_mp, module.vmpo, epsilon = 1e-9);
        assert_relative_eq!(dc.i_mp, module.impo * (module.c0 + module.c1), epsilon = 1e-9);
        assert_relative_eq!(dc.p_mp, 219.656_773, max_relative = 1e-8);
    }

    #[test]
    fn test_sapm_half_irradiance_reference_point() {
        let dc = sapm(500.0, 25.0, &canadian_solar_cs5p_220m());
        assert_relative_eq!(dc.i_mp, 2.28773882, max_relative = 1e-8);
        assert_relative_eq!(dc.v_mp, 47.21121608, max_relative = 1e-8);
        assert_relative_eq!(dc.p_mp, 108.00693168, max_relative = 1e-8);
    }

    #[test]
    fn test_sapm_zero_irradiance_clips_to_zero() {
        let module = canadian_solar_cs5p_220m();
        let dc = sapm(0.0, 10.0, &module);
        assert_eq!(dc.i_mp, 0.0);
        assert_eq!(dc.v_oc, 0.0);
        assert_eq!(dc.v_mp, 0.0);
        assert_eq!(dc.p_mp, 0.0);
    }

    #[test]
    fn test_dark_module_draws_night_tare() {
        let dc = sapm(0.0, 10.0, &canadian_solar_cs5p_220m());
        assert_eq!(sandia_inverter(dc.v_mp, dc.p_mp, &abb_micro_0_25()), -0.075);
    }

    #[test]
    fn test_inverter_nominal_point_gives_rated_output() {
        let inv = abb_micro_0_25();
        assert_relative_eq!(sandia_inverter(inv.vdco, inv.pdco, &inv), inv.paco, epsilon = 1e-9);
    }

    #[test]
    fn test_inverter_clips_and_tares() {
        let inv = abb_micro_0_25();
        assert_eq!(sandia_inverter(inv.vdco, 400.0, &inv), inv.paco);
        assert_eq!(sandia_inverter(inv.vdco, 1.0, &inv), -0.075);
        assert!(sandia_inverter(f64::NAN, f64::NAN, &inv).is_nan());
    }
}
