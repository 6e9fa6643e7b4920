//! The pricing engine.
//!
//! [`PricingEngine`] ties the calculation steps, the rule checker and the
//! coverage summarizer together into a single request → result call.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    DoseMultipliers, calculate_dose_multipliers, calculate_in_ovo_machine,
    calculate_injection_machine, calculate_totals, calculate_treatments, calculate_vaccine_cost,
};
use crate::config::PricingConfig;
use crate::coverage::summarize_coverage;
use crate::error::EngineResult;
use crate::models::{
    ActiveSelection, AuditStep, AuditTrace, CostLineItem, DeliveryMethod, OrderParameters,
    PricingRequest, PricingResult, SlotSelections,
};
use crate::rules::check_rules;

/// Prices vaccination programmes against one configuration snapshot.
///
/// Cloning is cheap: clones share the same immutable configuration. To pick
/// up a reloaded configuration build a new engine with
/// [`PricingEngine::with_config`]; calculations already running keep the
/// snapshot they started with.
///
/// # Example
///
/// ```no_run
/// use hatchery_pricing::config::ConfigLoader;
/// use hatchery_pricing::engine::PricingEngine;
/// use hatchery_pricing::models::{OrderParameters, SelectionSlot, SlotSelections};
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/uk_hatchery").unwrap();
/// let engine = PricingEngine::new(loader.into_config());
///
/// let order = OrderParameters {
///     saleable_chicks: 100_000,
///     egg_multiplier: Decimal::new(25, 1),
///     monthly_egg_volume: 500_000,
///     beak_treatment: false,
///     toe_treatment: false,
/// };
/// let selections = SlotSelections {
///     in_ovo: vec![SelectionSlot::single("Nobilis Rismavac +CA126")],
///     ..Default::default()
/// };
///
/// let result = engine.price(&order, &selections).unwrap();
/// println!("Grand total: {}", result.rounded_for_display().totals.grand_total);
/// ```
#[derive(Debug, Clone)]
pub struct PricingEngine {
    config: Arc<PricingConfig>,
}

impl PricingEngine {
    /// Creates an engine that owns `config`.
    pub fn new(config: PricingConfig) -> Self {
        Self::with_config(Arc::new(config))
    }

    /// Creates an engine over a shared configuration snapshot.
    pub fn with_config(config: Arc<PricingConfig>) -> Self {
        Self { config }
    }

    /// Returns the configuration this engine prices against.
    pub fn config(&self) -> &Arc<PricingConfig> {
        &self.config
    }

    /// Prices a deserialized request.
    pub fn price_request(&self, request: &PricingRequest) -> EngineResult<PricingResult> {
        self.price(&request.order, &request.selections)
    }

    /// Prices an order with the given slot selections.
    ///
    /// The result carries exact amounts; round with
    /// [`PricingResult::rounded_for_display`] for presentation.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidOrder`](crate::error::EngineError::InvalidOrder)
    ///   if an order field is out of range
    /// - [`EngineError::InvalidSelection`](crate::error::EngineError::InvalidSelection)
    ///   if the slots break a selection constraint
    /// - [`EngineError::UnknownVaccine`](crate::error::EngineError::UnknownVaccine)
    ///   if a slot names a vaccine the catalogue does not contain
    /// - [`EngineError::CalculationError`](crate::error::EngineError::CalculationError)
    ///   if a cost overflows
    pub fn price(
        &self,
        order: &OrderParameters,
        selections: &SlotSelections,
    ) -> EngineResult<PricingResult> {
        let calculation_id = Uuid::new_v4();
        let start_time = Instant::now();

        match self.perform_calculation(order, selections) {
            Ok(result) => {
                for warning in &result.warnings {
                    warn!(
                        calculation_id = %calculation_id,
                        kind = ?warning.kind,
                        severity = ?warning.severity,
                        "{}",
                        warning.message
                    );
                }
                info!(
                    calculation_id = %calculation_id,
                    saleable_chicks = order.saleable_chicks,
                    line_items = result.line_items.len(),
                    grand_total = %result.totals.grand_total,
                    duration_us = start_time.elapsed().as_micros(),
                    "Pricing completed successfully"
                );
                Ok(result)
            }
            Err(err) => {
                warn!(
                    calculation_id = %calculation_id,
                    error = %err,
                    "Pricing request rejected"
                );
                Err(err)
            }
        }
    }

    fn perform_calculation(
        &self,
        order: &OrderParameters,
        selections: &SlotSelections,
    ) -> EngineResult<PricingResult> {
        let config = self.config.as_ref();
        order.validate(config.order_limits())?;
        let active = selections.resolve(config.catalogue(), config.max_slots_per_category())?;

        let mut line_items: Vec<CostLineItem> = Vec::new();
        let mut audit_steps: Vec<AuditStep> = Vec::new();
        let mut step_number: u32 = 1;

        let dose_result = calculate_dose_multipliers(order, step_number)?;
        let multipliers = dose_result.multipliers;
        audit_steps.push(dose_result.audit_step);
        step_number += 1;

        let machine_costs = config.machine_costs();

        // In-ovo vaccines, then the lease they share
        step_number = price_vaccines(
            &active,
            DeliveryMethod::InOvo,
            &multipliers,
            order.saleable_chicks,
            step_number,
            &mut line_items,
            &mut audit_steps,
        )?;
        let in_ovo_active = active.iter().any(|s| s.method == DeliveryMethod::InOvo);
        let in_ovo_machine = calculate_in_ovo_machine(
            &machine_costs.in_ovo,
            order,
            multipliers.eggs_for_in_ovo,
            in_ovo_active,
            step_number,
        )?;
        line_items.extend(in_ovo_machine.line_item);
        audit_steps.push(in_ovo_machine.audit_step);
        step_number += 1;

        // Day-old injection vaccines, then the injector
        step_number = price_vaccines(
            &active,
            DeliveryMethod::DayOldInjection,
            &multipliers,
            order.saleable_chicks,
            step_number,
            &mut line_items,
            &mut audit_steps,
        )?;
        let injection_machine = calculate_injection_machine(
            machine_costs,
            &active,
            order.saleable_chicks,
            step_number,
        )?;
        let injection_passes = injection_machine.passes;
        line_items.extend(injection_machine.line_item);
        audit_steps.push(injection_machine.audit_step);
        step_number += 1;

        step_number = price_vaccines(
            &active,
            DeliveryMethod::Spray,
            &multipliers,
            order.saleable_chicks,
            step_number,
            &mut line_items,
            &mut audit_steps,
        )?;

        let treatments = calculate_treatments(machine_costs, order, step_number)?;
        line_items.extend(treatments.line_items);
        audit_steps.push(treatments.audit_step);
        step_number += 1;

        let totals = calculate_totals(&line_items, order.saleable_chicks, step_number)?;
        audit_steps.push(totals.audit_step);

        let warnings = check_rules(&active);
        let coverage = summarize_coverage(&active, config.taxonomy());

        Ok(PricingResult {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            catalogue_version: config.metadata().version.clone(),
            eggs_for_in_ovo: multipliers.eggs_for_in_ovo,
            injection_passes,
            line_items,
            subtotals: totals.subtotals,
            totals: totals.totals,
            warnings,
            coverage: coverage.entries,
            coverage_counts: coverage.category_counts,
            audit_trace: AuditTrace { steps: audit_steps },
        })
    }
}

/// Prices the active selections for one method, returning the next step number.
fn price_vaccines(
    active: &[ActiveSelection<'_>],
    method: DeliveryMethod,
    multipliers: &DoseMultipliers,
    saleable_chicks: i64,
    mut step_number: u32,
    line_items: &mut Vec<CostLineItem>,
    audit_steps: &mut Vec<AuditStep>,
) -> EngineResult<u32> {
    for selection in active.iter().filter(|s| s.method == method) {
        let result = calculate_vaccine_cost(selection, multipliers, saleable_chicks, step_number)?;
        line_items.push(result.line_item);
        audit_steps.push(result.audit_step);
        step_number += 1;
    }
    Ok(step_number)
}
