//! Reference data loading and management for the pricing engine.
//!
//! This module provides functionality to load the vaccine catalogue, the
//! machine cost constants and the disease taxonomy from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use hatchery_pricing::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/uk_hatchery").unwrap();
//! println!("Loaded catalogue: {}", config.metadata().name);
//! ```

mod catalogue;
mod loader;
mod types;

pub use catalogue::Catalogue;
pub use loader::ConfigLoader;
pub use types::{
    CatalogueFile, CatalogueMetadata, DiseaseCategory, DiseaseTaxonomyFile,
    InOvoMachineConfig, InjectionMachineConfig, MachineCostConfig, PricingConfig,
    TreatmentCost, UnpricedTreatment,
};
