//! The vaccine catalogue.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{DeliveryMethod, VaccineDefinition};

/// Read-only, validated set of vaccine definitions.
///
/// Declaration order is preserved and drives the order of
/// [`Catalogue::list_for`]. The "none selected" option of a form is not part
/// of the catalogue.
///
/// # Example
///
/// ```
/// use hatchery_pricing::config::Catalogue;
/// use hatchery_pricing::models::{DeliveryMethod, VaccineDefinition};
/// use rust_decimal::Decimal;
///
/// let catalogue = Catalogue::new(vec![VaccineDefinition {
///     name: "Reo".to_string(),
///     price_per_thousand_doses: Decimal::new(2237, 2),
///     categories: vec![DeliveryMethod::DayOldInjection],
///     protection: vec!["Reovirus (Viral Arthritis)".to_string()],
///     is_vector: false,
///     notes: None,
/// }])
/// .unwrap();
///
/// assert_eq!(catalogue.lookup("Reo").unwrap().price_per_thousand_doses, Decimal::new(2237, 2));
/// assert!(catalogue.list_for(DeliveryMethod::Spray).is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Catalogue {
    vaccines: Vec<VaccineDefinition>,
    index: HashMap<String, usize>,
}

impl Catalogue {
    /// Builds a catalogue, checking that names are unique and non-empty and
    /// that no price is negative.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] describing the first violation.
    pub fn new(vaccines: Vec<VaccineDefinition>) -> EngineResult<Self> {
        let mut index = HashMap::with_capacity(vaccines.len());

        for (position, vaccine) in vaccines.iter().enumerate() {
            if vaccine.name.trim().is_empty() {
                return Err(EngineError::InvalidConfig {
                    message: format!("vaccine #{} has an empty name", position + 1),
                });
            }
            if vaccine.price_per_thousand_doses < Decimal::ZERO {
                return Err(EngineError::InvalidConfig {
                    message: format!(
                        "vaccine '{}' has a negative price per 1000 doses",
                        vaccine.name
                    ),
                });
            }
            if index.insert(vaccine.name.clone(), position).is_some() {
                return Err(EngineError::InvalidConfig {
                    message: format!("vaccine '{}' is declared more than once", vaccine.name),
                });
            }
        }

        Ok(Self { vaccines, index })
    }

    /// Looks up a vaccine by its catalogue name.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownVaccine`] if no vaccine has that name.
    pub fn lookup(&self, name: &str) -> EngineResult<&VaccineDefinition> {
        self.index
            .get(name)
            .map(|&position| &self.vaccines[position])
            .ok_or_else(|| EngineError::UnknownVaccine {
                name: name.to_string(),
            })
    }

    /// Returns the vaccines offered for `method`, in declaration order.
    pub fn list_for(&self, method: DeliveryMethod) -> Vec<&VaccineDefinition> {
        self.vaccines
            .iter()
            .filter(|v| v.is_offered_for(method))
            .collect()
    }

    /// Returns every vaccine in declaration order.
    pub fn vaccines(&self) -> &[VaccineDefinition] {
        &self.vaccines
    }

    /// Number of vaccines in the catalogue.
    pub fn len(&self) -> usize {
        self.vaccines.len()
    }

    /// Returns true if the catalogue holds no vaccines.
    pub fn is_empty(&self) -> bool {
        self.vaccines.is_empty()
    }
}
