//! Order totals and per-group subtotals.
//!
//! The grand total is the sum of the line items in line order, and the
//! machine total is the grand total less the vaccine total. Lease lines carry
//! full 28-digit precision, so summing in any other order could round
//! differently from the itemised view.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{
    AuditStep, CategorySubtotal, CostLineItem, DeliveryMethod, LineItemKind, PricingTotals,
    SubtotalGroup,
};

use super::per_chick::{cost_per_chick, out_of_range};

const SUBTOTAL_GROUPS: [SubtotalGroup; 4] = [
    SubtotalGroup::InOvo,
    SubtotalGroup::DayOldInjection,
    SubtotalGroup::Spray,
    SubtotalGroup::Treatments,
];

/// Totals, subtotals and the audit step that produced them.
#[derive(Debug, Clone)]
pub struct TotalsResult {
    /// Order totals.
    pub totals: PricingTotals,
    /// One subtotal per group, in a fixed order.
    pub subtotals: Vec<CategorySubtotal>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

fn group_of(method: Option<DeliveryMethod>) -> SubtotalGroup {
    method.map_or(SubtotalGroup::Treatments, SubtotalGroup::from)
}

fn checked_sum<'a>(
    mut lines: impl Iterator<Item = &'a CostLineItem>,
    what: &str,
) -> EngineResult<Decimal> {
    lines
        .try_fold(Decimal::ZERO, |sum, line| sum.checked_add(line.total_cost))
        .ok_or_else(|| out_of_range(what))
}

/// Sums line items into subtotals and order totals.
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`](crate::error::EngineError::CalculationError)
/// if a sum overflows.
///
/// # Examples
///
/// ```
/// use hatchery_pricing::calculation::calculate_totals;
/// use hatchery_pricing::models::{CostLineItem, DeliveryMethod, LineItemKind};
/// use rust_decimal::Decimal;
///
/// let lines = vec![CostLineItem {
///     label: "Spray: IB Ma5".to_string(),
///     kind: LineItemKind::Vaccine,
///     method: Some(DeliveryMethod::Spray),
///     total_cost: Decimal::new(2665, 1),
///     cost_per_chick: Decimal::new(2665, 6),
///     provisional: false,
/// }];
///
/// let result = calculate_totals(&lines, 100_000, 1).unwrap();
/// assert_eq!(result.totals.grand_total, Decimal::new(2665, 1));
/// assert_eq!(result.subtotals.len(), 4);
/// ```
pub fn calculate_totals(
    line_items: &[CostLineItem],
    saleable_chicks: i64,
    step_number: u32,
) -> EngineResult<TotalsResult> {
    let is_vaccine = |line: &&CostLineItem| line.kind == LineItemKind::Vaccine;

    let subtotals = SUBTOTAL_GROUPS
        .iter()
        .map(|&group| -> EngineResult<CategorySubtotal> {
            let in_group = || {
                line_items
                    .iter()
                    .filter(move |line| group_of(line.method) == group)
            };
            let total = checked_sum(in_group(), "subtotal")?;
            let vaccine_cost = checked_sum(in_group().filter(is_vaccine), "subtotal")?;
            Ok(CategorySubtotal {
                group,
                vaccine_cost,
                machine_cost: total - vaccine_cost,
                total,
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    let grand_total = checked_sum(line_items.iter(), "grand total")?;
    let total_vaccine_cost = checked_sum(line_items.iter().filter(is_vaccine), "vaccine total")?;
    let total_machine_cost = grand_total - total_vaccine_cost;

    let totals = PricingTotals {
        total_vaccine_cost,
        total_machine_cost,
        grand_total,
        cost_per_chick: cost_per_chick(grand_total, saleable_chicks),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "totals".to_string(),
        rule_name: "Order Totals".to_string(),
        input: serde_json::json!({
            "line_items": line_items.len(),
            "saleable_chicks": saleable_chicks
        }),
        output: serde_json::json!({
            "total_vaccine_cost": total_vaccine_cost.normalize().to_string(),
            "total_machine_cost": total_machine_cost.normalize().to_string(),
            "grand_total": grand_total.normalize().to_string(),
            "cost_per_chick": totals.cost_per_chick.normalize().to_string()
        }),
        reasoning: format!(
            "{} vaccine + {} machine = {}; / {} chicks = {} per chick",
            total_vaccine_cost.normalize(),
            total_machine_cost.normalize(),
            grand_total.normalize(),
            saleable_chicks,
            totals.cost_per_chick.normalize()
        ),
    };

    Ok(TotalsResult {
        totals,
        subtotals,
        audit_step,
    })
}
