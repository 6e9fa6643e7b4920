//! Vaccine slot selections.
//!
//! A caller submits an ordered list of [`SelectionSlot`]s per delivery
//! method. Before pricing, the slots are resolved against the catalogue into
//! [`ActiveSelection`]s; empty slots drop out at this point.

use serde::{Deserialize, Serialize};

use crate::config::Catalogue;
use crate::error::{EngineError, EngineResult};

use super::{DeliveryMethod, OrderParameters, VaccineDefinition};

/// One slot of a delivery-method column.
///
/// A slot with no vaccine is the "none selected" placeholder and contributes
/// nothing to the calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSlot {
    /// Catalogue name of the chosen vaccine, if any.
    #[serde(default)]
    pub vaccine: Option<String>,
    /// Whether the vaccine is given twice.
    #[serde(default)]
    pub double_dose: bool,
}

impl SelectionSlot {
    /// Creates a single-dose slot for the named vaccine.
    pub fn single(name: impl Into<String>) -> Self {
        Self {
            vaccine: Some(name.into()),
            double_dose: false,
        }
    }

    /// Creates a double-dose slot for the named vaccine.
    pub fn double(name: impl Into<String>) -> Self {
        Self {
            vaccine: Some(name.into()),
            double_dose: true,
        }
    }

    /// Creates an empty slot.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// The slot lists for all three delivery methods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSelections {
    /// In-ovo slots.
    #[serde(default)]
    pub in_ovo: Vec<SelectionSlot>,
    /// Day-old injection slots.
    #[serde(default)]
    pub day_old_injection: Vec<SelectionSlot>,
    /// Day-old spray slots.
    #[serde(default)]
    pub spray: Vec<SelectionSlot>,
}

impl SlotSelections {
    /// Returns the slots submitted for `method`.
    pub fn slots_for(&self, method: DeliveryMethod) -> &[SelectionSlot] {
        match method {
            DeliveryMethod::InOvo => &self.in_ovo,
            DeliveryMethod::DayOldInjection => &self.day_old_injection,
            DeliveryMethod::Spray => &self.spray,
        }
    }

    /// Resolves every non-empty slot against the catalogue.
    ///
    /// The result is ordered in-ovo first, then day-old injection, then
    /// spray, each in slot order.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidSelection`] if a method has more than
    ///   `max_slots` slots, a vaccine is placed under a method it is not
    ///   offered for, or a spray slot is double-dosed
    /// - [`EngineError::UnknownVaccine`] if a name is not in the catalogue
    pub fn resolve<'a>(
        &self,
        catalogue: &'a Catalogue,
        max_slots: usize,
    ) -> EngineResult<Vec<ActiveSelection<'a>>> {
        let mut active = Vec::new();

        for method in DeliveryMethod::ALL {
            let slots = self.slots_for(method);
            if slots.len() > max_slots {
                return Err(EngineError::InvalidSelection {
                    method,
                    message: format!(
                        "{} slots submitted, at most {} allowed",
                        slots.len(),
                        max_slots
                    ),
                });
            }

            for slot in slots {
                let Some(name) = slot.vaccine.as_deref() else {
                    continue;
                };

                let vaccine = catalogue.lookup(name)?;
                if !vaccine.is_offered_for(method) {
                    return Err(EngineError::InvalidSelection {
                        method,
                        message: format!("'{}' is not offered for this method", name),
                    });
                }
                if slot.double_dose && !method.allows_double_dose() {
                    return Err(EngineError::InvalidSelection {
                        method,
                        message: format!("double dose is not available for '{}'", name),
                    });
                }

                active.push(ActiveSelection {
                    vaccine,
                    method,
                    double_dose: slot.double_dose,
                });
            }
        }

        Ok(active)
    }
}

/// A non-empty slot resolved against the catalogue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveSelection<'a> {
    /// The selected vaccine.
    pub vaccine: &'a VaccineDefinition,
    /// The method it is delivered by.
    pub method: DeliveryMethod,
    /// Whether it is given twice.
    pub double_dose: bool,
}

impl ActiveSelection<'_> {
    /// The "vaccine (method)" form used in warnings and coverage.
    pub fn provider_label(&self) -> String {
        format!("{} ({})", self.vaccine.name, self.method.label())
    }
}

/// A complete pricing request as received from a presentation layer.
///
/// # Example
///
/// ```
/// use hatchery_pricing::models::PricingRequest;
///
/// let request: PricingRequest = serde_json::from_str(r#"{
///     "order": {
///         "saleable_chicks": 100000,
///         "egg_multiplier": "2.5",
///         "monthly_egg_volume": 500000
///     },
///     "selections": {
///         "in_ovo": [{ "vaccine": "Nobilis Rismavac +CA126" }]
///     }
/// }"#).unwrap();
///
/// assert_eq!(request.selections.in_ovo.len(), 1);
/// assert!(request.selections.spray.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRequest {
    /// Order size and treatments.
    pub order: OrderParameters,
    /// Slot choices per delivery method.
    #[serde(default)]
    pub selections: SlotSelections,
}
