//! Vaccine cost calculation.
//!
//! This module prices a single active selection: the catalogue price per
//! 1000 doses scaled by the dose multiplier of its delivery method, doubled
//! for a double dose.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{ActiveSelection, AuditStep, CostLineItem, LineItemKind};

use super::DoseMultipliers;
use super::per_chick::{checked_product, priced_line};

const DOUBLE_DOSE_FACTOR: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// The result of pricing one vaccine selection.
#[derive(Debug, Clone)]
pub struct VaccineCostResult {
    /// The line item for the selection.
    pub line_item: CostLineItem,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Prices one active vaccine selection.
///
/// # Arguments
///
/// * `selection` - The resolved selection
/// * `multipliers` - Dose multipliers for the order
/// * `saleable_chicks` - Order size, used for the per-chick figure
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`](crate::error::EngineError::CalculationError)
/// if the cost overflows.
///
/// # Examples
///
/// ```
/// use hatchery_pricing::calculation::{calculate_vaccine_cost, DoseMultipliers};
/// use hatchery_pricing::models::{ActiveSelection, DeliveryMethod, VaccineDefinition};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let vaccine = VaccineDefinition {
///     name: "Nobilis Rismavac +CA126".to_string(),
///     price_per_thousand_doses: Decimal::from_str("16.92").unwrap(),
///     categories: vec![DeliveryMethod::InOvo],
///     protection: vec![],
///     is_vector: false,
///     notes: None,
/// };
/// let selection = ActiveSelection {
///     vaccine: &vaccine,
///     method: DeliveryMethod::InOvo,
///     double_dose: false,
/// };
/// let multipliers = DoseMultipliers {
///     eggs_for_in_ovo: 250_000,
///     in_ovo: Decimal::from(250),
///     chick: Decimal::from(100),
/// };
///
/// let result = calculate_vaccine_cost(&selection, &multipliers, 100_000, 1).unwrap();
/// assert_eq!(result.line_item.total_cost, Decimal::from_str("4230.00").unwrap());
/// assert_eq!(result.line_item.label, "Inovo: Nobilis Rismavac +CA126");
/// ```
pub fn calculate_vaccine_cost(
    selection: &ActiveSelection<'_>,
    multipliers: &DoseMultipliers,
    saleable_chicks: i64,
    step_number: u32,
) -> EngineResult<VaccineCostResult> {
    let vaccine = selection.vaccine;
    let multiplier = multipliers.for_method(selection.method);
    let doses = if selection.double_dose {
        DOUBLE_DOSE_FACTOR
    } else {
        Decimal::ONE
    };
    let total_cost = checked_product(
        &[vaccine.price_per_thousand_doses, multiplier, doses],
        &format!("cost of {}", vaccine.name),
    )?;

    let label = if selection.double_dose {
        format!("{}: {} (2x Dose)", selection.method.label(), vaccine.name)
    } else {
        format!("{}: {}", selection.method.label(), vaccine.name)
    };

    let reasoning = if selection.double_dose {
        format!(
            "{} × {} per 1000 doses × 2 doses = {}",
            multiplier.normalize(),
            vaccine.price_per_thousand_doses.normalize(),
            total_cost.normalize()
        )
    } else {
        format!(
            "{} × {} per 1000 doses = {}",
            multiplier.normalize(),
            vaccine.price_per_thousand_doses.normalize(),
            total_cost.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "vaccine_cost".to_string(),
        rule_name: "Vaccine Cost".to_string(),
        input: serde_json::json!({
            "vaccine": vaccine.name,
            "method": selection.method,
            "price_per_thousand_doses": vaccine.price_per_thousand_doses.normalize().to_string(),
            "dose_multiplier": multiplier.normalize().to_string(),
            "double_dose": selection.double_dose
        }),
        output: serde_json::json!({
            "total_cost": total_cost.normalize().to_string()
        }),
        reasoning,
    };

    Ok(VaccineCostResult {
        line_item: priced_line(
            label,
            LineItemKind::Vaccine,
            Some(selection.method),
            total_cost,
            saleable_chicks,
        ),
        audit_step,
    })
}
