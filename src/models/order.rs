//! Order parameters and their validation.
//!
//! This module defines [`OrderParameters`], the size and treatment flags of a
//! single hatchery order, along with the [`OrderLimits`] it is checked against.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Upper bounds accepted for an order.
///
/// The defaults match the bounds of the hatchery order form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLimits {
    /// Largest accepted number of saleable chicks.
    #[serde(default = "default_max_saleable_chicks")]
    pub max_saleable_chicks: i64,
    /// Largest accepted egg multiplier.
    #[serde(default = "default_max_egg_multiplier")]
    pub max_egg_multiplier: Decimal,
    /// Largest accepted monthly egg volume.
    #[serde(default = "default_max_monthly_egg_volume")]
    pub max_monthly_egg_volume: i64,
}

fn default_max_saleable_chicks() -> i64 {
    10_000_000
}

fn default_max_egg_multiplier() -> Decimal {
    Decimal::new(50, 1)
}

fn default_max_monthly_egg_volume() -> i64 {
    10_000_000
}

impl Default for OrderLimits {
    fn default() -> Self {
        Self {
            max_saleable_chicks: default_max_saleable_chicks(),
            max_egg_multiplier: default_max_egg_multiplier(),
            max_monthly_egg_volume: default_max_monthly_egg_volume(),
        }
    }
}

/// The size and treatment options of one order.
///
/// # Example
///
/// ```
/// use hatchery_pricing::models::{OrderLimits, OrderParameters};
/// use rust_decimal::Decimal;
///
/// let order = OrderParameters {
///     saleable_chicks: 100_000,
///     egg_multiplier: Decimal::new(25, 1),
///     monthly_egg_volume: 500_000,
///     beak_treatment: false,
///     toe_treatment: false,
/// };
///
/// assert!(order.validate(&OrderLimits::default()).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderParameters {
    /// Number of saleable chicks in the order.
    pub saleable_chicks: i64,
    /// Eggs injected per saleable chick.
    pub egg_multiplier: Decimal,
    /// Eggs expected through the in-ovo machine per month.
    pub monthly_egg_volume: i64,
    /// Whether beak treatment is applied.
    #[serde(default)]
    pub beak_treatment: bool,
    /// Whether toe treatment is applied.
    #[serde(default)]
    pub toe_treatment: bool,
}

impl OrderParameters {
    /// Checks every field against the engine's rules and `limits`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidOrder`] naming the first offending field.
    pub fn validate(&self, limits: &OrderLimits) -> EngineResult<()> {
        if self.saleable_chicks < 0 {
            return Err(invalid("saleable_chicks", "must not be negative"));
        }
        if self.saleable_chicks > limits.max_saleable_chicks {
            return Err(invalid(
                "saleable_chicks",
                format!("must not exceed {}", limits.max_saleable_chicks),
            ));
        }
        if self.egg_multiplier <= Decimal::ZERO {
            return Err(invalid("egg_multiplier", "must be greater than zero"));
        }
        if self.egg_multiplier > limits.max_egg_multiplier {
            return Err(invalid(
                "egg_multiplier",
                format!("must not exceed {}", limits.max_egg_multiplier.normalize()),
            ));
        }
        if self.monthly_egg_volume <= 0 {
            return Err(invalid("monthly_egg_volume", "must be greater than zero"));
        }
        if self.monthly_egg_volume > limits.max_monthly_egg_volume {
            return Err(invalid(
                "monthly_egg_volume",
                format!("must not exceed {}", limits.max_monthly_egg_volume),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: impl Into<String>) -> EngineError {
    EngineError::InvalidOrder {
        field: field.to_string(),
        message: message.into(),
    }
}
