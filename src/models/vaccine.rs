//! Vaccine definition model.
//!
//! This module defines the catalogue entry for a single vaccine product.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DeliveryMethod;

/// Name marker identifying a CA126 strain Marek's vaccine.
pub(crate) const CA126_MARKER: &str = "CA126";

/// Name marker identifying the Innovax vector family.
pub(crate) const INNOVAX_MARKER: &str = "Innovax";

/// A vaccine product available for selection.
///
/// # Example
///
/// ```
/// use hatchery_pricing::models::{DeliveryMethod, VaccineDefinition};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let vaccine = VaccineDefinition {
///     name: "Innovax ND-ILT".to_string(),
///     price_per_thousand_doses: Decimal::from_str("33.83").unwrap(),
///     categories: vec![DeliveryMethod::InOvo, DeliveryMethod::DayOldInjection],
///     protection: vec!["Marek's Disease".to_string()],
///     is_vector: true,
///     notes: None,
/// };
///
/// assert!(vaccine.involves_innovax_family());
/// assert!(!vaccine.is_offered_for(DeliveryMethod::Spray));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaccineDefinition {
    /// Unique catalogue name.
    pub name: String,
    /// Price per 1000 doses in the catalogue currency.
    pub price_per_thousand_doses: Decimal,
    /// Delivery methods this vaccine may be selected under.
    pub categories: Vec<DeliveryMethod>,
    /// Disease protection labels, in display order.
    #[serde(default)]
    pub protection: Vec<String>,
    /// Whether this is a live vector vaccine.
    #[serde(default)]
    pub is_vector: bool,
    /// Free-text pack or pricing note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl VaccineDefinition {
    /// Returns true if the vaccine may be selected for `method`.
    pub fn is_offered_for(&self, method: DeliveryMethod) -> bool {
        self.categories.contains(&method)
    }

    /// Returns true if this is a CA126 strain product.
    ///
    /// Matching is a case-sensitive substring check on the name.
    pub fn involves_ca126(&self) -> bool {
        self.name.contains(CA126_MARKER)
    }

    /// Returns true if this product belongs to the Innovax family.
    ///
    /// Matching is a case-sensitive substring check on the name.
    pub fn involves_innovax_family(&self) -> bool {
        self.name.contains(INNOVAX_MARKER)
    }
}
