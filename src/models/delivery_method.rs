//! Delivery method model.
//!
//! A delivery method is the route by which a vaccine reaches the bird. The
//! method decides whether a dose is priced per egg or per chick, which
//! machine applies it, and whether a double dose is possible.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The route by which a vaccine is administered.
///
/// # Example
///
/// ```
/// use hatchery_pricing::models::DeliveryMethod;
///
/// assert!(DeliveryMethod::InOvo.doses_per_egg());
/// assert!(!DeliveryMethod::Spray.allows_double_dose());
/// assert_eq!(DeliveryMethod::DayOldInjection.label(), "Day Old Inj");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    /// Injection into the egg before hatching.
    InOvo,
    /// Injection into the chick after hatching.
    DayOldInjection,
    /// Spray over day-old chicks.
    Spray,
}

impl DeliveryMethod {
    /// All delivery methods in the order they are priced and listed.
    pub const ALL: [DeliveryMethod; 3] = [
        DeliveryMethod::InOvo,
        DeliveryMethod::DayOldInjection,
        DeliveryMethod::Spray,
    ];

    /// The short label used in line items and provider lists.
    pub fn label(self) -> &'static str {
        match self {
            DeliveryMethod::InOvo => "Inovo",
            DeliveryMethod::DayOldInjection => "Day Old Inj",
            DeliveryMethod::Spray => "Spray",
        }
    }

    /// Returns true if doses for this method are counted per injected egg
    /// rather than per saleable chick.
    pub fn doses_per_egg(self) -> bool {
        self == DeliveryMethod::InOvo
    }

    /// Returns true if a slot for this method may carry a double dose.
    pub fn allows_double_dose(self) -> bool {
        !matches!(self, DeliveryMethod::Spray)
    }
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            DeliveryMethod::InOvo => "in-ovo",
            DeliveryMethod::DayOldInjection => "day-old injection",
            DeliveryMethod::Spray => "spray",
        };
        f.write_str(tag)
    }
}
