//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading pricing
//! reference data from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{DeliveryMethod, VaccineDefinition};

use super::types::{
    CatalogueFile, CatalogueMetadata, DiseaseTaxonomyFile, MachineCostConfig, PricingConfig,
};

/// Loads and provides access to pricing configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory
/// and provides methods to query the catalogue.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/uk_hatchery/
/// ├── catalogue.yaml          # Metadata, limits and vaccine definitions
/// ├── machine_costs.yaml      # Lease rate and per-chick application costs
/// └── disease_categories.yaml # Disease taxonomy for coverage reporting
/// ```
///
/// # Example
///
/// ```no_run
/// use hatchery_pricing::config::ConfigLoader;
/// use hatchery_pricing::models::DeliveryMethod;
///
/// let loader = ConfigLoader::load("./config/uk_hatchery").unwrap();
///
/// let vaccine = loader.get_vaccine("Transmune").unwrap();
/// println!("{}: {} per 1000 doses", vaccine.name, vaccine.price_per_thousand_doses);
///
/// for option in loader.vaccines_for(DeliveryMethod::Spray) {
///     println!("spray option: {}", option.name);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PricingConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/uk_hatchery")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The loaded data breaks a catalogue invariant
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let catalogue_file = Self::load_yaml::<CatalogueFile>(&path.join("catalogue.yaml"))?;
        let machine_costs = Self::load_yaml::<MachineCostConfig>(&path.join("machine_costs.yaml"))?;
        let taxonomy =
            Self::load_yaml::<DiseaseTaxonomyFile>(&path.join("disease_categories.yaml"))?;

        let config = PricingConfig::new(catalogue_file, machine_costs, taxonomy.categories)?;

        debug!(
            path = %path.display(),
            catalogue = %config.metadata().code,
            version = %config.metadata().version,
            vaccines = config.catalogue().len(),
            "Loaded pricing configuration"
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying pricing configuration.
    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> PricingConfig {
        self.config
    }

    /// Returns the catalogue metadata.
    pub fn metadata(&self) -> &CatalogueMetadata {
        self.config.metadata()
    }

    /// Gets a vaccine by its catalogue name.
    ///
    /// Returns [`EngineError::UnknownVaccine`] if the name is not in the catalogue.
    pub fn get_vaccine(&self, name: &str) -> EngineResult<&VaccineDefinition> {
        self.config.catalogue().lookup(name)
    }

    /// Lists the vaccines a form should offer for `method`, in catalogue order.
    pub fn vaccines_for(&self, method: DeliveryMethod) -> Vec<&VaccineDefinition> {
        self.config.catalogue().list_for(method)
    }
}
