//! Configuration types for hatchery pricing.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, and the validated
//! [`PricingConfig`] they are assembled into.

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::{OrderLimits, VaccineDefinition};

use super::Catalogue;

/// Metadata about the catalogue.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogueMetadata {
    /// Short code identifying the price list (e.g., "UK-HATCHERY").
    pub code: String,
    /// Human-readable name of the price list.
    pub name: String,
    /// Version of the price list.
    pub version: String,
    /// Currency all prices are expressed in.
    pub currency: String,
    /// Date the prices took effect.
    pub effective_date: NaiveDate,
}

fn default_max_slots() -> usize {
    4
}

/// Structure of `catalogue.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogueFile {
    /// Catalogue metadata.
    pub metadata: CatalogueMetadata,
    /// Maximum slots per delivery method.
    #[serde(default = "default_max_slots")]
    pub max_slots_per_category: usize,
    /// Upper bounds for accepted orders.
    #[serde(default)]
    pub order_limits: OrderLimits,
    /// Vaccine definitions in declaration order.
    pub vaccines: Vec<VaccineDefinition>,
}

/// In-ovo machine lease.
#[derive(Debug, Clone, Deserialize)]
pub struct InOvoMachineConfig {
    /// Line item label for the allocated lease.
    pub label: String,
    /// Monthly lease cost in catalogue currency.
    pub monthly_lease: Decimal,
}

/// Per-chick application steps of the day-old injection machine.
///
/// Step costs are in the machine's quoted currency and are converted with
/// [`MachineCostConfig::conversion_rate`].
#[derive(Debug, Clone, Deserialize)]
pub struct InjectionMachineConfig {
    /// Line item label for the machine cost.
    pub label: String,
    /// Cradle count cost per chick.
    pub cradle_count: Decimal,
    /// Roller injection cost per chick.
    pub roller_inject: Decimal,
    /// Needle sanitation cost per chick.
    pub needle_sanitation: Decimal,
}

/// A priced per-chick treatment, in the machine's quoted currency.
#[derive(Debug, Clone, Deserialize)]
pub struct TreatmentCost {
    /// Line item label.
    pub label: String,
    /// Cost per chick.
    pub cost_per_chick: Decimal,
}

/// A treatment with no configured price.
#[derive(Debug, Clone, Deserialize)]
pub struct UnpricedTreatment {
    /// Line item label.
    pub label: String,
}

fn default_conversion_rate() -> Decimal {
    Decimal::ONE
}

/// Structure of `machine_costs.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct MachineCostConfig {
    /// Rate converting per-chick machine and treatment costs into the
    /// catalogue currency. The in-ovo lease is already in catalogue currency.
    #[serde(default = "default_conversion_rate")]
    pub conversion_rate: Decimal,
    /// In-ovo lease.
    pub in_ovo: InOvoMachineConfig,
    /// Day-old injection steps.
    pub day_old_injection: InjectionMachineConfig,
    /// Beak treatment.
    pub beak_treatment: TreatmentCost,
    /// Toe treatment.
    pub toe_treatment: UnpricedTreatment,
}

impl MachineCostConfig {
    /// Cost of one injection pass per chick, in catalogue currency.
    ///
    /// Returns `None` if the figure overflows.
    pub fn injection_cost_per_chick(&self) -> Option<Decimal> {
        let steps = &self.day_old_injection;
        steps
            .cradle_count
            .checked_add(steps.roller_inject)?
            .checked_add(steps.needle_sanitation)?
            .checked_mul(self.conversion_rate)
    }

    /// Beak treatment cost per chick, in catalogue currency.
    ///
    /// Returns `None` if the figure overflows.
    pub fn beak_cost_per_chick(&self) -> Option<Decimal> {
        self.beak_treatment
            .cost_per_chick
            .checked_mul(self.conversion_rate)
    }

    fn validate(&self) -> EngineResult<()> {
        if self.conversion_rate <= Decimal::ZERO {
            return Err(invalid_config("conversion_rate must be greater than zero"));
        }

        let costs = [
            ("in_ovo.monthly_lease", self.in_ovo.monthly_lease),
            ("day_old_injection.cradle_count", self.day_old_injection.cradle_count),
            ("day_old_injection.roller_inject", self.day_old_injection.roller_inject),
            (
                "day_old_injection.needle_sanitation",
                self.day_old_injection.needle_sanitation,
            ),
            ("beak_treatment.cost_per_chick", self.beak_treatment.cost_per_chick),
        ];
        for (field, value) in costs {
            if value < Decimal::ZERO {
                return Err(invalid_config(format!("{} must not be negative", field)));
            }
        }

        if self.injection_cost_per_chick().is_none() || self.beak_cost_per_chick().is_none() {
            return Err(invalid_config(
                "per-chick machine costs are out of range after conversion",
            ));
        }
        Ok(())
    }
}

/// A disease category in the coverage taxonomy.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DiseaseCategory {
    /// Category name.
    pub name: String,
    /// Display icon.
    #[serde(default)]
    pub icon: Option<String>,
    /// Protection labels that belong to the category, in display order.
    pub diseases: Vec<String>,
}

/// Structure of `disease_categories.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct DiseaseTaxonomyFile {
    /// Categories in display order.
    pub categories: Vec<DiseaseCategory>,
}

/// The complete pricing configuration.
///
/// This struct aggregates all reference data loaded from a configuration
/// directory. It is immutable once built.
#[derive(Debug, Clone)]
pub struct PricingConfig {
    metadata: CatalogueMetadata,
    catalogue: Catalogue,
    machine_costs: MachineCostConfig,
    taxonomy: Vec<DiseaseCategory>,
    order_limits: OrderLimits,
    max_slots_per_category: usize,
}

impl PricingConfig {
    /// Assembles and validates a configuration from its parts.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if the catalogue, machine costs,
    /// taxonomy, limits or slot bound break an invariant.
    pub fn new(
        catalogue_file: CatalogueFile,
        machine_costs: MachineCostConfig,
        taxonomy: Vec<DiseaseCategory>,
    ) -> EngineResult<Self> {
        let CatalogueFile {
            metadata,
            max_slots_per_category,
            order_limits,
            vaccines,
        } = catalogue_file;

        if max_slots_per_category == 0 {
            return Err(invalid_config("max_slots_per_category must be at least 1"));
        }
        if order_limits.max_saleable_chicks < 0
            || order_limits.max_egg_multiplier <= Decimal::ZERO
            || order_limits.max_monthly_egg_volume <= 0
        {
            return Err(invalid_config("order_limits must be positive"));
        }

        let catalogue = Catalogue::new(vaccines)?;
        machine_costs.validate()?;
        validate_taxonomy(&taxonomy)?;

        Ok(Self {
            metadata,
            catalogue,
            machine_costs,
            taxonomy,
            order_limits,
            max_slots_per_category,
        })
    }

    /// Returns the catalogue metadata.
    pub fn metadata(&self) -> &CatalogueMetadata {
        &self.metadata
    }

    /// Returns the vaccine catalogue.
    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    /// Returns the machine cost constants.
    pub fn machine_costs(&self) -> &MachineCostConfig {
        &self.machine_costs
    }

    /// Returns the disease taxonomy in display order.
    pub fn taxonomy(&self) -> &[DiseaseCategory] {
        &self.taxonomy
    }

    /// Returns the order limits.
    pub fn order_limits(&self) -> &OrderLimits {
        &self.order_limits
    }

    /// Returns the maximum number of slots per delivery method.
    pub fn max_slots_per_category(&self) -> usize {
        self.max_slots_per_category
    }
}

fn validate_taxonomy(taxonomy: &[DiseaseCategory]) -> EngineResult<()> {
    let mut seen = HashSet::new();
    for category in taxonomy {
        if category.name.trim().is_empty() {
            return Err(invalid_config("disease category with an empty name"));
        }
        if !seen.insert(category.name.as_str()) {
            return Err(invalid_config(format!(
                "disease category '{}' is declared more than once",
                category.name
            )));
        }
    }
    Ok(())
}

fn invalid_config(message: impl Into<String>) -> EngineError {
    EngineError::InvalidConfig {
        message: message.into(),
    }
}
