//! In-ovo machine lease allocation.
//!
//! The monthly lease is spread over the hatchery's expected monthly egg
//! throughput, and an order is charged for the eggs it injects. Orders with
//! no in-ovo vaccine carry no lease cost.

use rust_decimal::Decimal;

use crate::config::InOvoMachineConfig;
use crate::error::EngineResult;
use crate::models::{AuditStep, CostLineItem, DeliveryMethod, LineItemKind, OrderParameters};

use super::per_chick::{checked_product, priced_line, ratio_or_zero};

/// The result of allocating the in-ovo lease to an order.
#[derive(Debug, Clone)]
pub struct InOvoMachineResult {
    /// Allocated lease cost, zero when the machine is unused.
    pub cost: Decimal,
    /// Lease cost per egg.
    pub allocation_rate: Decimal,
    /// The line item, present only when an in-ovo vaccine is active.
    pub line_item: Option<CostLineItem>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Allocates the in-ovo machine lease to an order.
///
/// # Arguments
///
/// * `machine` - Lease configuration
/// * `order` - The validated order
/// * `eggs_for_in_ovo` - Eggs injected for the order
/// * `in_ovo_active` - Whether any in-ovo slot holds a vaccine
/// * `step_number` - The step number for audit trail sequencing
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`](crate::error::EngineError::CalculationError)
/// if the allocated cost overflows.
///
/// # Examples
///
/// ```
/// use hatchery_pricing::calculation::calculate_in_ovo_machine;
/// use hatchery_pricing::config::InOvoMachineConfig;
/// use hatchery_pricing::models::OrderParameters;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let machine = InOvoMachineConfig {
///     label: "Inovo Machine Lease (allocated)".to_string(),
///     monthly_lease: Decimal::from_str("6125.00").unwrap(),
/// };
/// let order = OrderParameters {
///     saleable_chicks: 100_000,
///     egg_multiplier: Decimal::new(25, 1),
///     monthly_egg_volume: 500_000,
///     beak_treatment: false,
///     toe_treatment: false,
/// };
///
/// let result = calculate_in_ovo_machine(&machine, &order, 250_000, true, 2).unwrap();
/// assert_eq!(result.cost, Decimal::from_str("3062.50").unwrap());
/// ```
pub fn calculate_in_ovo_machine(
    machine: &InOvoMachineConfig,
    order: &OrderParameters,
    eggs_for_in_ovo: u64,
    in_ovo_active: bool,
    step_number: u32,
) -> EngineResult<InOvoMachineResult> {
    let allocation_rate = ratio_or_zero(
        machine.monthly_lease,
        Decimal::from(order.monthly_egg_volume),
    );

    let (cost, line_item, reasoning) = if in_ovo_active {
        let cost = checked_product(
            &[allocation_rate, Decimal::from(eggs_for_in_ovo)],
            "in-ovo lease allocation",
        )?;
        let line = priced_line(
            machine.label.clone(),
            LineItemKind::MachineLease,
            Some(DeliveryMethod::InOvo),
            cost,
            order.saleable_chicks,
        );
        let reasoning = format!(
            "{} lease / {} eggs per month = {} per egg; × {} eggs = {}",
            machine.monthly_lease.normalize(),
            order.monthly_egg_volume,
            allocation_rate.normalize(),
            eggs_for_in_ovo,
            cost.normalize()
        );
        (cost, Some(line), reasoning)
    } else {
        (
            Decimal::ZERO,
            None,
            "No in-ovo vaccine selected; lease not allocated".to_string(),
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "in_ovo_machine".to_string(),
        rule_name: "In-Ovo Machine Lease".to_string(),
        input: serde_json::json!({
            "monthly_lease": machine.monthly_lease.normalize().to_string(),
            "monthly_egg_volume": order.monthly_egg_volume,
            "eggs_for_in_ovo": eggs_for_in_ovo,
            "in_ovo_active": in_ovo_active
        }),
        output: serde_json::json!({
            "allocation_rate": allocation_rate.normalize().to_string(),
            "cost": cost.normalize().to_string()
        }),
        reasoning,
    };

    Ok(InOvoMachineResult {
        cost,
        allocation_rate,
        line_item,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn machine() -> InOvoMachineConfig {
        InOvoMachineConfig {
            label: "Inovo Machine Lease (allocated)".to_string(),
            monthly_lease: dec("6125.00"),
        }
    }

    fn order(chicks: i64, monthly_volume: i64) -> OrderParameters {
        OrderParameters {
            saleable_chicks: chicks,
            egg_multiplier: dec("2.5"),
            monthly_egg_volume: monthly_volume,
            beak_treatment: false,
            toe_treatment: false,
        }
    }

    #[test]
    fn test_lease_allocated_per_egg() {
        let order = order(100_000, 500_000);
        let result = calculate_in_ovo_machine(&machine(), &order, 250_000, true, 1).unwrap();

        assert_eq!(result.allocation_rate, dec("0.01225"));
        assert_eq!(result.cost, dec("3062.50"));

        let line = result.line_item.unwrap();
        assert_eq!(line.label, "Inovo Machine Lease (allocated)");
        assert_eq!(line.kind, LineItemKind::MachineLease);
        assert_eq!(line.method, Some(DeliveryMethod::InOvo));
        assert_eq!(line.cost_per_chick, dec("0.030625"));
    }

    #[test]
    fn test_inactive_in_ovo_has_no_cost_or_line() {
        let order = order(100_000, 500_000);
        let result = calculate_in_ovo_machine(&machine(), &order, 250_000, false, 1).unwrap();
        assert_eq!(result.cost, Decimal::ZERO);
        assert!(result.line_item.is_none());
        assert!(result.audit_step.reasoning.contains("not allocated"));
    }

    #[test]
    fn test_zero_monthly_volume_gives_zero_rate() {
        let result =
            calculate_in_ovo_machine(&machine(), &order(100_000, 0), 250_000, true, 1).unwrap();
        assert_eq!(result.allocation_rate, Decimal::ZERO);
        assert_eq!(result.cost, Decimal::ZERO);
    }

    #[test]
    fn test_zero_eggs_gives_zero_cost() {
        let result = calculate_in_ovo_machine(&machine(), &order(0, 500_000), 0, true, 1).unwrap();
        assert_eq!(result.cost, Decimal::ZERO);
        assert_eq!(result.line_item.unwrap().cost_per_chick, Decimal::ZERO);
    }

    #[test]
    fn test_audit_step() {
        let order = order(100_000, 500_000);
        let result = calculate_in_ovo_machine(&machine(), &order, 250_000, true, 3).unwrap();
        assert_eq!(result.audit_step.step_number, 3);
        assert_eq!(result.audit_step.rule_id, "in_ovo_machine");
        assert_eq!(result.audit_step.output["cost"], "3062.5");
    }

    #[test]
    fn test_overflowing_lease_is_calculation_error() {
        let machine = InOvoMachineConfig {
            monthly_lease: Decimal::MAX,
            ..machine()
        };
        let result = calculate_in_ovo_machine(&machine, &order(100_000, 1), 250_000, true, 1);
        assert!(matches!(
            result,
            Err(crate::error::EngineError::CalculationError { .. })
        ));
    }
}
