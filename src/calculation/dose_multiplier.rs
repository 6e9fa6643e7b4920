//! Dose multiplier calculation.
//!
//! Vaccine prices are quoted per 1000 doses. In-ovo doses are counted per
//! injected egg while day-old injection and spray doses are counted per
//! saleable chick, so an order yields two separate multipliers.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, DeliveryMethod, OrderParameters};

/// Number of doses a catalogue price covers.
pub const DOSES_PER_PRICE_UNIT: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// Egg count and dose multipliers for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoseMultipliers {
    /// Eggs injected in-ovo: `floor(saleable_chicks * egg_multiplier)`.
    pub eggs_for_in_ovo: u64,
    /// `eggs_for_in_ovo / 1000`.
    pub in_ovo: Decimal,
    /// `saleable_chicks / 1000`.
    pub chick: Decimal,
}

impl DoseMultipliers {
    /// Returns the multiplier that applies to `method`.
    pub fn for_method(&self, method: DeliveryMethod) -> Decimal {
        if method.doses_per_egg() {
            self.in_ovo
        } else {
            self.chick
        }
    }
}

/// The result of computing dose multipliers, including the audit step.
#[derive(Debug, Clone)]
pub struct DoseMultiplierResult {
    /// The computed multipliers.
    pub multipliers: DoseMultipliers,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes the egg count and both dose multipliers for an order.
///
/// The order must already be validated.
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`] if the egg count cannot be
/// represented, which only happens for unvalidated input.
///
/// # Examples
///
/// ```
/// use hatchery_pricing::calculation::calculate_dose_multipliers;
/// use hatchery_pricing::models::OrderParameters;
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
/// let result = calculate_dose_multipliers(&order, 1).unwrap();
/// assert_eq!(result.multipliers.eggs_for_in_ovo, 250_000);
/// assert_eq!(result.multipliers.in_ovo, Decimal::from(250));
/// assert_eq!(result.multipliers.chick, Decimal::from(100));
/// ```
pub fn calculate_dose_multipliers(
    order: &OrderParameters,
    step_number: u32,
) -> EngineResult<DoseMultiplierResult> {
    let chicks = Decimal::from(order.saleable_chicks);

    let eggs = chicks
        .checked_mul(order.egg_multiplier)
        .map(|e| e.floor())
        .and_then(|e| e.to_u64())
        .ok_or_else(|| EngineError::CalculationError {
            message: format!(
                "egg count for {} chicks at multiplier {} is out of range",
                order.saleable_chicks, order.egg_multiplier
            ),
        })?;

    let multipliers = DoseMultipliers {
        eggs_for_in_ovo: eggs,
        in_ovo: Decimal::from(eggs) / DOSES_PER_PRICE_UNIT,
        chick: chicks / DOSES_PER_PRICE_UNIT,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "dose_multipliers".to_string(),
        rule_name: "Dose Multipliers".to_string(),
        input: serde_json::json!({
            "saleable_chicks": order.saleable_chicks,
            "egg_multiplier": order.egg_multiplier.normalize().to_string()
        }),
        output: serde_json::json!({
            "eggs_for_in_ovo": eggs,
            "in_ovo_dose_multiplier": multipliers.in_ovo.normalize().to_string(),
            "chick_dose_multiplier": multipliers.chick.normalize().to_string()
        }),
        reasoning: format!(
            "floor({} chicks × {}) = {} eggs; in-ovo doses scale by {}, chick doses by {}",
            order.saleable_chicks,
            order.egg_multiplier.normalize(),
            eggs,
            multipliers.in_ovo.normalize(),
            multipliers.chick.normalize()
        ),
    };

    Ok(DoseMultiplierResult {
        multipliers,
        audit_step,
    })
}
