/// ============================================================
///  Irradiance on a fixed tilted plane
///
///  Algorithm pipeline (per timestamp):
///   1. Extraterrestrial irradiance – Spencer (1971) eccentricity
///                        correction of the solar constant
///   2. Air mass        – Kasten & Young (1989) relative air mass,
///                        pressure-corrected absolute air mass
///   3. Angle of incidence between sun and panel normal
///   4. Sky diffuse     – Hay & Davies (1980) anisotropic model
///   5. Ground diffuse  – isotropic albedo reflection
///   6. POA components  – beam + sky diffuse + ground diffuse
/// ============================================================

use std::f64::consts::PI;

use crate::models::estimate::SurfaceOrientation;
use crate::services::solar_position::SunPosition;

// ─── Physical constants ──────────────────────────────────────
const SOLAR_CONSTANT: f64 = 1366.1; // W/m²
const DEG: f64 = PI / 180.0;
const STANDARD_PRESSURE: f64 = 101325.0; // Pa
/// Ground reflectance used for the ground-diffuse term
pub const DEFAULT_ALBEDO: f64 = 0.25;
/// cos(89°); floor on cos(zenith) in the Hay-Davies beam ratio
const MIN_COS_ZENITH: f64 = 0.01745;

#[inline]
fn cosd(x: f64) -> f64 {
    (x * DEG).cos()
}

#[inline]
fn sind(x: f64) -> f64 {
    (x * DEG).sin()
}

// ─── 1. Extraterrestrial irradiance ──────────────────────────
/// Normal-incidence irradiance at the top of the atmosphere (W/m²).
pub fn extra_radiation(day_of_year: u32) -> f64 {
    let b = 2.0 * PI * (day_of_year as f64 - 1.0) / 365.0;
    let r_fact = 1.00011
        + 0.034221 * b.cos()
        + 0.00128 * b.sin()
        + 0.000719 * (2.0 * b).cos()
        + 0.000077 * (2.0 * b).sin();
    SOLAR_CONSTANT * r_fact
}

// ─── 2. Air mass ─────────────────────────────────────────────
/// Relative (sea-level) air mass. NaN once the sun is below the horizon.
pub fn relative_airmass(zenith_deg: f64) -> f64 {
    if zenith_deg > 90.0 || zenith_deg.is_nan() {
        return f64::NAN;
    }
    1.0 / (cosd(zenith_deg) + 0.50572 * (6.07995 + (90.0 - zenith_deg)).powf(-1.6364))
}

/// Pressure-corrected air mass.
pub fn absolute_airmass(relative: f64, pressure_pa: f64) -> f64 {
    relative * pressure_pa / STANDARD_PRESSURE
}

// ─── 3. Angle of incidence ───────────────────────────────────
/// Cosine of the angle between the sun vector and the surface normal, in [-1, 1].
pub fn aoi_projection(surface: SurfaceOrientation, sun: SunPosition) -> f64 {
    let projection = cosd(surface.tilt_deg) * cosd(sun.apparent_zenith)
        + sind(surface.tilt_deg)
            * sind(sun.apparent_zenith)
            * cosd(sun.azimuth - surface.azimuth_deg);
    projection.clamp(-1.0, 1.0)
}

/// Angle of incidence (deg).
pub fn aoi(surface: SurfaceOrientation, sun: SunPosition) -> f64 {
    aoi_projection(surface, sun).acos() / DEG
}

// ─── 4. Sky diffuse (Hay & Davies) ───────────────────────────
pub fn haydavies(
    surface: SurfaceOrientation,
    sun: SunPosition,
    dhi: f64,
    dni: f64,
    dni_extra: f64,
) -> f64 {
    let cos_tt = aoi_projection(surface, sun).max(0.0);
    let cos_zenith = cosd(sun.apparent_zenith);
    let rb = cos_tt / cos_zenith.max(MIN_COS_ZENITH);

    // anisotropy index
    let ai = dni / dni_extra;
    let term1 = 1.0 - ai;
    let term2 = 0.5 * (1.0 + cosd(surface.tilt_deg));

    let poa_isotropic = (dhi * term1 * term2).max(0.0);
    let poa_circumsolar = (dhi * ai * rb).max(0.0);
    poa_isotropic + poa_circumsolar
}

// ─── 5. Ground diffuse ───────────────────────────────────────
pub fn ground_diffuse(tilt_deg: f64, ghi: f64, albedo: f64) -> f64 {
    ghi * albedo * (1.0 - cosd(tilt_deg)) * 0.5
}

// ─── 6. Plane-of-array components ────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoaIrradiance {
    pub global: f64,
    pub direct: f64,
    pub diffuse: f64,
    pub sky_diffuse: f64,
    pub ground_diffuse: f64,
}

/// Horizontal components (GHI, DNI, DHI) transposed onto the module plane.
pub fn total_irradiance(
    surface: SurfaceOrientation,
    sun: SunPosition,
    dni: f64,
    ghi: f64,
    dhi: f64,
    dni_extra: f64,
) -> PoaIrradiance {
    let sky_diffuse = haydavies(surface, sun, dhi, dni, dni_extra);
    let ground = ground_diffuse(surface.tilt_deg, ghi, DEFAULT_ALBEDO);
    let angle = aoi(surface, sun);

    let direct = (dni * cosd(angle)).max(0.0);
    let diffuse = sky_diffuse + ground;
    PoaIrradiance {
        global: direct + diffuse,
        direct,
        diffuse,
        sky_diffuse,
        ground_diffuse: ground,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SOUTH_45: SurfaceOrientation = SurfaceOrientation { tilt_deg: 45.0, azimuth_deg: 180.0 };
    const FLAT: SurfaceOrientation = SurfaceOrientation { tilt_deg: 0.0, azimuth_deg: 180.0 };

    #[test]
    fn test_extra_radiation_perihelion_and_aphelion() {
        // Jan 1: B = 0 → 1366.1 × 1.03505
        assert_relative_eq!(extra_radiation(1), 1366.1 * 1.03505, epsilon = 1e-9);
        // early July is the annual minimum, ~3.3 % below the constant
        let july = extra_radiation(185);
        assert!(july < SOLAR_CONSTANT && july > 1315.0, "got {:.1}", july);
    }

    #[test]
    fn test_relative_airmass() {
        assert_relative_eq!(relative_airmass(0.0), 1.0, epsilon = 1e-3);
        let am60 = relative_airmass(60.0);
        assert!(am60 > 1.98 && am60 < 2.0, "got {:.4}", am60);
        assert!(relative_airmass(90.5).is_nan());
    }

    #[test]
    fn test_absolute_airmass_scales_with_pressure() {
        assert_relative_eq!(absolute_airmass(2.0, 101325.0), 2.0);
        assert_relative_eq!(absolute_airmass(2.0, 50662.5), 1.0);
    }

    #[test]
    fn test_aoi_flat_surface_equals_zenith() {
        let sun = SunPosition { apparent_zenith: 37.0, azimuth: 120.0 };
        assert_relative_eq!(aoi(FLAT, sun), 37.0, epsilon = 1e-9);
    }

    #[test]
    fn test_aoi_sun_in_plane_of_south_facing_surface() {
        let sun = SunPosition { apparent_zenith: 30.0, azimuth: 180.0 };
        assert_relative_eq!(aoi(SOUTH_45, sun), 15.0, epsilon = 1e-9);
        let behind = SunPosition { apparent_zenith: 60.0, azimuth: 0.0 };
        assert_relative_eq!(aoi(SOUTH_45, behind), 105.0, epsilon = 1e-9);
    }

    #[test]
    fn test_haydavies_without_beam_is_isotropic() {
        let sun = SunPosition { apparent_zenith: 50.0, azimuth: 180.0 };
        let sky = haydavies(SOUTH_45, sun, 100.0, 0.0, 1400.0);
        assert_relative_eq!(sky, 100.0 * 0.5 * (1.0 + cosd(45.0)), epsilon = 1e-9);
    }

    #[test]
    fn test_haydavies_circumsolar_term() {
        let sun = SunPosition { apparent_zenith: 30.0, azimuth: 180.0 };
        let (dhi, dni, extra) = (100.0, 700.0, 1400.0);
        let ai = dni / extra;
        let rb = cosd(15.0) / cosd(30.0);
        let expected = dhi * (1.0 - ai) * 0.5 * (1.0 + cosd(45.0)) + dhi * ai * rb;
        assert_relative_eq!(haydavies(SOUTH_45, sun, dhi, dni, extra), expected, epsilon = 1e-9);
    }

    #[test]
    fn test_total_irradiance_components_add_up() {
        let sun = SunPosition { apparent_zenith: 30.0, azimuth: 180.0 };
        let poa = total_irradiance(SOUTH_45, sun, 700.0, 750.0, 100.0, 1400.0);
        assert_relative_eq!(poa.direct, 700.0 * cosd(15.0), epsilon = 1e-9);
        let ground = 750.0 * 0.25 * (1.0 - cosd(45.0)) * 0.5;
        assert_relative_eq!(poa.ground_diffuse, ground, epsilon = 1e-9);
        assert_relative_eq!(poa.diffuse, poa.sky_diffuse + poa.ground_diffuse);
        assert_relative_eq!(poa.global, poa.direct + poa.diffuse);
    }

    #[test]
    fn test_night_poa_is_zero() {
        let sun = SunPosition { apparent_zenith: 120.0, azimuth: 0.0 };
        let poa = total_irradiance(SOUTH_45, sun, 0.0, 0.0, 0.0, 1400.0);
        assert_eq!(poa.global, 0.0);
    }
}
