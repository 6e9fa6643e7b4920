//! Beak and toe treatment costs.

use rust_decimal::Decimal;

use crate::config::MachineCostConfig;
use crate::error::EngineResult;
use crate::models::{AuditStep, CostLineItem, LineItemKind, OrderParameters};

use super::per_chick::{checked_product, out_of_range, priced_line};

/// Line items and cost for the requested treatments.
#[derive(Debug, Clone)]
pub struct TreatmentResult {
    /// Sum of treatment costs.
    pub cost: Decimal,
    /// Beak line first, then toe, each only when requested.
    pub line_items: Vec<CostLineItem>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Costs the beak and toe treatments requested on an order.
///
/// Toe treatment has no configured price; when requested it is reported as
/// a provisional zero-cost line.
///
/// # Errors
///
/// Returns [`EngineError::CalculationError`](crate::error::EngineError::CalculationError)
/// if the beak treatment cost overflows.
pub fn calculate_treatments(
    costs: &MachineCostConfig,
    order: &OrderParameters,
    step_number: u32,
) -> EngineResult<TreatmentResult> {
    let mut line_items = Vec::new();
    let mut cost = Decimal::ZERO;

    let beak_per_chick = costs
        .beak_cost_per_chick()
        .ok_or_else(|| out_of_range("beak treatment cost per chick"))?;
    if order.beak_treatment {
        let beak_cost = checked_product(
            &[beak_per_chick, Decimal::from(order.saleable_chicks)],
            "beak treatment cost",
        )?;
        cost += beak_cost;
        line_items.push(priced_line(
            costs.beak_treatment.label.clone(),
            LineItemKind::Treatment,
            None,
            beak_cost,
            order.saleable_chicks,
        ));
    }

    if order.toe_treatment {
        line_items.push(CostLineItem {
            label: format!("{} (cost not configured)", costs.toe_treatment.label),
            kind: LineItemKind::Treatment,
            method: None,
            total_cost: Decimal::ZERO,
            cost_per_chick: Decimal::ZERO,
            provisional: true,
        });
    }

    let reasoning = match (order.beak_treatment, order.toe_treatment) {
        (false, false) => "No treatments requested".to_string(),
        (beak, toe) => {
            let mut parts = Vec::new();
            if beak {
                parts.push(format!(
                    "beak {} × {} chicks",
                    beak_per_chick.normalize(),
                    order.saleable_chicks
                ));
            }
            if toe {
                parts.push("toe provisional at 0".to_string());
            }
            format!("{} = {}", parts.join("; "), cost.normalize())
        }
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "treatments".to_string(),
        rule_name: "Treatments".to_string(),
        input: serde_json::json!({
            "beak_treatment": order.beak_treatment,
            "toe_treatment": order.toe_treatment,
            "beak_cost_per_chick": beak_per_chick.normalize().to_string(),
            "saleable_chicks": order.saleable_chicks
        }),
        output: serde_json::json!({
            "cost": cost.normalize().to_string(),
            "line_items": line_items.len()
        }),
        reasoning,
    };

    Ok(TreatmentResult {
        cost,
        line_items,
        audit_step,
    })
}
