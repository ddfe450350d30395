/// Read-only lookup services for module, inverter and thermal-model records.
///
/// The built-in tables carry the entries the estimator uses; a JSON file with
/// the same SAM field names can replace them at startup.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::CatalogError;
use crate::models::components::{SandiaInverter, SandiaModule, ThermalParameters};

// ─── Fixed component identities ──────────────────────────────────────────────
pub const MODULE_NAME: &str = "Canadian_Solar_CS5P_220M___2009_";
pub const INVERTER_NAME: &str = "ABB__MICRO_0_25_I_OUTD_US_208__208V_";
pub const THERMAL_FAMILY: &str = "sapm";
pub const THERMAL_MOUNTING: &str = "open_rack_glass_glass";

pub trait ComponentCatalog: Send + Sync {
    fn module(&self, name: &str) -> Result<SandiaModule, CatalogError>;
    fn inverter(&self, name: &str) -> Result<SandiaInverter, CatalogError>;
}

pub trait ThermalModelCatalog: Send + Sync {
    fn parameters(&self, family: &str, mounting: &str) -> Result<ThermalParameters, CatalogError>;
}

// ─── Component tables ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StaticCatalog {
    #[serde(default)]
    modules: HashMap<String, SandiaModule>,
    #[serde(default)]
    inverters: HashMap<String, SandiaInverter>,
}

impl StaticCatalog {
    /// Catalog holding the fixed module and inverter.
    pub fn builtin() -> Self {
        Self::default()
            .with_module(MODULE_NAME, canadian_solar_cs5p_220m())
            .with_inverter(INVERTER_NAME, abb_micro_0_25())
    }

    /// Loads `{"modules": {...}, "inverters": {...}}` keyed by SAM entry name.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let load_err = |reason: String| CatalogError::Load {
            path: path.display().to_string(),
            reason,
        };
        let content = std::fs::read_to_string(path).map_err(|e| load_err(e.to_string()))?;
        let catalog: StaticCatalog =
            serde_json::from_str(&content).map_err(|e| load_err(e.to_string()))?;
        info!(
            "Loaded component catalog {}: {} modules, {} inverters",
            path.display(),
            catalog.modules.len(),
            catalog.inverters.len()
        );
        Ok(catalog)
    }

    pub fn with_module(mut self, name: &str, module: SandiaModule) -> Self {
        self.modules.insert(name.to_string(), module);
        self
    }

    pub fn with_inverter(mut self, name: &str, inverter: SandiaInverter) -> Self {
        self.inverters.insert(name.to_string(), inverter);
        self
    }
}

impl ComponentCatalog for StaticCatalog {
    fn module(&self, name: &str) -> Result<SandiaModule, CatalogError> {
        debug!("Module lookup: {}", name);
        self.modules
            .get(name)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownModule(name.to_string()))
    }

    fn inverter(&self, name: &str) -> Result<SandiaInverter, CatalogError> {
        debug!("Inverter lookup: {}", name);
        self.inverters
            .get(name)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownInverter(name.to_string()))
    }
}

// ─── Thermal model table ─────────────────────────────────────────────────────

/// SAPM cell-temperature coefficients (King et al., 2004) per mounting type.
#[derive(Debug, Clone, Copy, Default)]
pub struct SapmThermalCatalog;

impl ThermalModelCatalog for SapmThermalCatalog {
    fn parameters(&self, family: &str, mounting: &str) -> Result<ThermalParameters, CatalogError> {
        if family != THERMAL_FAMILY {
            return Err(CatalogError::UnknownThermalFamily(family.to_string()));
        }
        let (a, b, delta_t) = match mounting {
            "open_rack_glass_glass" => (-3.47, -0.0594, 3.0),
            "close_mount_glass_glass" => (-2.98, -0.0471, 1.0),
            "open_rack_glass_polymer" => (-3.56, -0.0750, 3.0),
            "insulated_back_glass_polymer" => (-2.81, -0.0455, 0.0),
            _ => {
                return Err(CatalogError::UnknownMounting {
                    family: family.to_string(),
                    mounting: mounting.to_string(),
                });
            }
        };
        Ok(ThermalParameters { a, b, delta_t })
    }
}

// ─── Built-in records ────────────────────────────────────────────────────────

/// Canadian Solar CS5P-220M (2009), Sandia module database.
pub fn canadian_solar_cs5p_220m() -> SandiaModule {
    SandiaModule {
        area: 1.701,
        cells_in_series: 96.0,
        parallel_strings: 1.0,
        isco: 5.09115,
        voco: 59.2608,
        impo: 4.54629,
        vmpo: 48.3156,
        a_isc: 0.000397,
        a_imp: 0.000181,
        c0: 1.01284,
        c1: -0.0128398,
        bvoco: -0.21696,
        mbvoc: 0.0,
        bvmpo: -0.235488,
        mbvmp: 0.0,
        n: 1.4032,
        c2: 0.279317,
        c3: -7.24463,
        a0: 0.928385,
        a1: 0.068093,
        a2: -0.0157738,
        a3: 0.0016606,
        a4: -6.93e-05,
        b0: 1.0,
        b1: -0.002438,
        b2: 0.0003103,
        b3: -1.246e-05,
        b4: 2.11e-07,
        b5: -1.36e-09,
        dtc: 3.0,
        fd: 1.0,
        c4: 0.996446,
        c5: 0.003554,
        ixo: 4.97599,
        ixxo: 3.18803,
        c6: 1.15535,
        c7: -0.155353,
    }
}

/// ABB MICRO-0.25-I-OUTD-US-208 (208 V), CEC inverter database.
pub fn abb_micro_0_25() -> SandiaInverter {
    SandiaInverter {
        vac: 208.0,
        paco: 250.0,
        pdco: 259.588593,
        vdco: 40.0,
        pso: 2.089607,
        c0: -4.1e-05,
        c1: -9.1e-05,
        c2: 0.000494,
        c3: -0.013171,
        pnt: 0.075,
        vdcmax: 50.0,
        idcmax: 6.489715,
        mppt_low: 30.0,
        mppt_high: 50.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Write;

    #[test]
    fn test_builtin_catalog_has_fixed_components() {
        let catalog = StaticCatalog::builtin();
        let module = catalog.module(MODULE_NAME).unwrap();
        let inverter = catalog.inverter(INVERTER_NAME).unwrap();
        assert_eq!(module.cells_in_series, 96.0);
        assert_eq!(inverter.paco, 250.0);
    }

    #[test]
    fn test_unknown_names_are_errors() {
        let catalog = StaticCatalog::builtin();
        assert_eq!(
            catalog.module("nope"),
            Err(CatalogError::UnknownModule("nope".to_string()))
        );
        assert_eq!(
            catalog.inverter("nope"),
            Err(CatalogError::UnknownInverter("nope".to_string()))
        );
    }

    #[rstest]
    #[case("open_rack_glass_glass", -3.47, -0.0594, 3.0)]
    #[case("close_mount_glass_glass", -2.98, -0.0471, 1.0)]
    #[case("open_rack_glass_polymer", -3.56, -0.0750, 3.0)]
    #[case("insulated_back_glass_polymer", -2.81, -0.0455, 0.0)]
    fn test_sapm_thermal_table(
        #[case] mounting: &str,
        #[case] a: f64,
        #[case] b: f64,
        #[case] dt: f64,
    ) {
        let p = SapmThermalCatalog.parameters("sapm", mounting).unwrap();
        assert_eq!(p, ThermalParameters { a, b, delta_t: dt });
    }

    #[test]
    fn test_unknown_thermal_keys() {
        assert!(matches!(
            SapmThermalCatalog.parameters("pvsyst", THERMAL_MOUNTING),
            Err(CatalogError::UnknownThermalFamily(_))
        ));
        assert!(matches!(
            SapmThermalCatalog.parameters("sapm", "roof"),
            Err(CatalogError::UnknownMounting { .. })
        ));
    }

    #[test]
    fn test_json_catalog_round_trips_sam_names() {
        let builtin = StaticCatalog::builtin();
        let json = serde_json::json!({
            "modules": { "Test_Module": builtin.module(MODULE_NAME).unwrap() },
            "inverters": { "Test_Inverter": builtin.inverter(INVERTER_NAME).unwrap() }
        });
        assert!(json["modules"]["Test_Module"].get("Cells_in_Series").is_some());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", json).unwrap();

        let loaded = StaticCatalog::from_json_file(file.path()).unwrap();
        assert_eq!(loaded.module("Test_Module").unwrap(), canadian_solar_cs5p_220m());
        assert_eq!(loaded.inverter("Test_Inverter").unwrap(), abb_micro_0_25());
        assert!(loaded.module(MODULE_NAME).is_err());
    }

    #[test]
    fn test_missing_catalog_file() {
        let err = StaticCatalog::from_json_file("/nonexistent/catalog.json").unwrap_err();
        assert!(matches!(err, CatalogError::Load { .. }));
    }
}
