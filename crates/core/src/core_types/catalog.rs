//! Fuel model catalog
//!
//! Built once before a simulation starts and shared read-only afterwards. Every
//! catalog contains the non-burnable sentinel so land cover such as water or rock
//! always has something to map to.

use crate::core_types::fuel::{FuelModel, NON_BURNABLE_CODE};
use crate::error::{Error, Result};
use crate::physics::rothermel::validate_fuel_model;
use rustc_hash::FxHashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Code -> fuel model lookup
#[derive(Debug, Clone)]
pub struct FuelCatalog {
    models: FxHashMap<String, Arc<FuelModel>>,
    non_burnable: Arc<FuelModel>,
}

impl FuelCatalog {
    /// Build a catalog from fuel models, validating each one
    ///
    /// The non-burnable sentinel is added if the input does not carry it.
    pub fn from_models(models: impl IntoIterator<Item = FuelModel>) -> Result<Self> {
        let mut map = FxHashMap::default();
        for model in models {
            validate_fuel_model(&model)?;
            if map.contains_key(&model.code) {
                return Err(Error::DuplicateFuelCode { code: model.code });
            }
            debug!(code = %model.code, name = %model.name, "registered fuel model");
            map.insert(model.code.clone(), Arc::new(model));
        }
        let non_burnable = Arc::clone(
            map.entry(NON_BURNABLE_CODE.to_string())
                .or_insert_with(|| Arc::new(FuelModel::non_burnable())),
        );
        Ok(FuelCatalog {
            models: map,
            non_burnable,
        })
    }

    /// The 13 standard fire behaviour fuel models plus the sentinel
    pub fn standard() -> Self {
        let mut models: FxHashMap<String, Arc<FuelModel>> = FuelModel::standard_13()
            .into_iter()
            .map(|model| (model.code.clone(), Arc::new(model)))
            .collect();
        let non_burnable = Arc::new(FuelModel::non_burnable());
        models.insert(NON_BURNABLE_CODE.to_string(), Arc::clone(&non_burnable));
        FuelCatalog {
            models,
            non_burnable,
        }
    }

    /// Parse a JSON array of fuel models
    pub fn from_json_str(json: &str) -> Result<Self> {
        let models: Vec<FuelModel> = serde_json::from_str(json)?;
        let catalog = Self::from_models(models)?;
        info!(models = catalog.len(), "loaded fuel catalog");
        Ok(catalog)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&json)
    }

    pub fn get(&self, code: &str) -> Option<&Arc<FuelModel>> {
        self.models.get(code)
    }

    /// Lookup that reports unknown codes as an error
    pub fn require(&self, code: &str) -> Result<Arc<FuelModel>> {
        self.get(code).cloned().ok_or_else(|| Error::UnknownFuelCode {
            code: code.to_string(),
        })
    }

    pub fn non_burnable(&self) -> Arc<FuelModel> {
        Arc::clone(&self.non_burnable)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Codes in ascending numeric-then-lexical order
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.models.keys().map(String::as_str).collect();
        codes.sort_by(|a, b| match (a.parse::<u32>(), b.parse::<u32>()) {
            (Ok(x), Ok(y)) => x.cmp(&y),
            (Ok(_), Err(_)) => std::cmp::Ordering::Less,
            (Err(_), Ok(_)) => std::cmp::Ordering::Greater,
            (Err(_), Err(_)) => a.cmp(b),
        });
        codes
    }
}

impl Default for FuelCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog() {
        let catalog = FuelCatalog::standard();
        assert_eq!(catalog.len(), 14);
        assert_eq!(catalog.require("1").unwrap().name, "Short grass");
        assert_eq!(
            catalog.require("2").unwrap().name,
            "Timber (grass and understory)"
        );
        assert!(catalog.non_burnable().is_non_burnable());
        assert_eq!(catalog.codes().first(), Some(&"1"));
        assert_eq!(catalog.codes().last(), Some(&"NB"));
    }

    #[test]
    fn test_unknown_code() {
        let catalog = FuelCatalog::standard();
        assert!(matches!(
            catalog.require("42"),
            Err(Error::UnknownFuelCode { .. })
        ));
    }

    #[test]
    fn test_duplicate_codes_rejected() {
        let result = FuelCatalog::from_models([FuelModel::short_grass(), FuelModel::short_grass()]);
        assert!(matches!(result, Err(Error::DuplicateFuelCode { code }) if code == "1"));
    }

    #[test]
    fn test_invalid_model_rejected() {
        let mut broken = FuelModel::short_grass();
        broken.fuel_bed_depth = -1.0;
        assert!(matches!(
            FuelCatalog::from_models([broken]),
            Err(Error::InvalidFuelModel { .. })
        ));
    }

    #[test]
    fn test_json_catalog_adds_sentinel() {
        let json = r#"[{
            "code": "GR1",
            "name": "Short, sparse dry climate grass",
            "fuel_load": { "one_hour": 0.0046, "ten_hour": 0.0, "hundred_hour": 0.0, "live_herb": 0.0138, "live_wood": 0.0 },
            "sav_ratio": { "one_hour": 2200.0, "ten_hour": 109.0, "hundred_hour": 30.0, "live_herb": 2000.0, "live_wood": 0.0 },
            "fuel_bed_depth": 0.4,
            "moisture_of_extinction": 0.15,
            "model_type": "dynamic"
        }]"#;
        let catalog = FuelCatalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 2);
        let grass = catalog.require("GR1").unwrap();
        assert_eq!(grass.particle_density, 32.0);
        assert_eq!(grass.heat_content, 8000.0);
        assert!(catalog.require("NB").unwrap().is_non_burnable());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            FuelCatalog::from_json_str("{ not json"),
            Err(Error::Json(_))
        ));
    }
}
