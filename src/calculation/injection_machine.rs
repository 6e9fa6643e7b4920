//! Day-old injection machine cost.
//!
//! Every chick passes through the injector once per dose. A double-dosed
//! injection slot sends the whole flock through a second time, so the
//! machine cost doubles regardless of how many slots are doubled.

use rust_decimal::Decimal;

use crate::config::MachineCostConfig;
use crate::error::EngineResult;
use crate::models::{ActiveSelection, AuditStep, CostLineItem, DeliveryMethod, LineItemKind};

use super::per_chick::{checked_product, out_of_range, priced_line};

/// The result of costing the day-old injection machine.
#[derive(Debug, Clone)]
pub struct InjectionMachineResult {
    /// Number of passes, zero when no injection slot is active.
    pub passes: u32,
    /// Machine cost in catalogue currency.
    pub cost: Decimal,
    /// The line item, present only when an injection vaccine is active.
    pub line_item: Option<CostLineItem>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Counts the injector passes needed for the active selections.
pub fn injection_passes(active: &[ActiveSelection<'_>]) -> u32 {
    let mut injections = active
        .iter()
        .filter(|s| s.method == DeliveryMethod::DayOldInjection)
        .peekable();

    if injections.peek().is_none() {
        0
    } else if injections.any(|s| s.double_dose) {
        2
    } else {
        1
    }
}

/// Costs the day-old injection machine for an order.
///
/// # Arguments
///
/// * `costs` - Machine cost configuration
/// * `active` - All active selections for the order
/// * `saleable_chicks` - Order size
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`](crate::error::EngineError::CalculationError)
/// if the machine cost overflows.
pub fn calculate_injection_machine(
    costs: &MachineCostConfig,
    active: &[ActiveSelection<'_>],
    saleable_chicks: i64,
    step_number: u32,
) -> EngineResult<InjectionMachineResult> {
    let passes = injection_passes(active);
    let per_chick_per_pass = costs
        .injection_cost_per_chick()
        .ok_or_else(|| out_of_range("injection cost per chick"))?;

    let (cost, line_item, reasoning) = if passes == 0 {
        (
            Decimal::ZERO,
            None,
            "No day-old injection vaccine selected; machine not used".to_string(),
        )
    } else {
        let cost = checked_product(
            &[
                per_chick_per_pass,
                Decimal::from(saleable_chicks),
                Decimal::from(passes),
            ],
            "injection machine cost",
        )?;
        let label = format!(
            "{} (×{} {})",
            costs.day_old_injection.label,
            passes,
            if passes == 1 { "pass" } else { "passes" }
        );
        let line = priced_line(
            label,
            LineItemKind::MachineApplication,
            Some(DeliveryMethod::DayOldInjection),
            cost,
            saleable_chicks,
        );
        let reasoning = format!(
            "{} per chick per pass × {} chicks × {} = {}",
            per_chick_per_pass.normalize(),
            saleable_chicks,
            passes,
            cost.normalize()
        );
        (cost, Some(line), reasoning)
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "injection_machine".to_string(),
        rule_name: "Day-Old Injection Machine".to_string(),
        input: serde_json::json!({
            "cradle_count": costs.day_old_injection.cradle_count.normalize().to_string(),
            "roller_inject": costs.day_old_injection.roller_inject.normalize().to_string(),
            "needle_sanitation": costs.day_old_injection.needle_sanitation.normalize().to_string(),
            "conversion_rate": costs.conversion_rate.normalize().to_string(),
            "saleable_chicks": saleable_chicks
        }),
        output: serde_json::json!({
            "passes": passes,
            "cost_per_chick_per_pass": per_chick_per_pass.normalize().to_string(),
            "cost": cost.normalize().to_string()
        }),
        reasoning,
    };

    Ok(InjectionMachineResult {
        passes,
        cost,
        line_item,
        audit_step,
    })
}
