//! Per-unit ratios with a zero-divisor guard, and overflow-checked products.
//!
//! Every per-egg and per-chick figure in the engine is derived through
//! [`ratio_or_zero`], so a zero divisor yields exactly zero everywhere.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{CostLineItem, DeliveryMethod, LineItemKind};

/// Divides `numerator` by `denominator`, returning zero when the divisor is zero.
///
/// # Examples
///
/// ```
/// use hatchery_pricing::calculation::ratio_or_zero;
/// use rust_decimal::Decimal;
///
/// assert_eq!(ratio_or_zero(Decimal::from(6125), Decimal::from(500_000)), Decimal::new(1225, 5));
/// assert_eq!(ratio_or_zero(Decimal::from(10), Decimal::ZERO), Decimal::ZERO);
/// ```
pub fn ratio_or_zero(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}

/// Cost per saleable chick, zero for an empty order.
pub fn cost_per_chick(total_cost: Decimal, saleable_chicks: i64) -> Decimal {
    ratio_or_zero(total_cost, Decimal::from(saleable_chicks))
}

/// Multiplies `factors` together, naming `what` in the error on overflow.
pub(crate) fn checked_product(factors: &[Decimal], what: &str) -> EngineResult<Decimal> {
    factors
        .iter()
        .try_fold(Decimal::ONE, |product, factor| product.checked_mul(*factor))
        .ok_or_else(|| out_of_range(what))
}

pub(crate) fn out_of_range(what: &str) -> EngineError {
    EngineError::CalculationError {
        message: format!("{} is out of range", what),
    }
}

pub(crate) fn priced_line(
    label: String,
    kind: LineItemKind,
    method: Option<DeliveryMethod>,
    total_cost: Decimal,
    saleable_chicks: i64,
) -> CostLineItem {
    CostLineItem {
        label,
        kind,
        method,
        total_cost,
        cost_per_chick: cost_per_chick(total_cost, saleable_chicks),
        provisional: false,
    }
}
