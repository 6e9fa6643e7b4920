//! Pricing result models.
//!
//! This module contains the [`PricingResult`] type and its associated
//! structures that capture all outputs from pricing an order: the itemised
//! cost lines, subtotals and totals, rule warnings, the disease coverage
//! summary and an audit trace of every calculation step.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::DeliveryMethod;

/// Decimal places shown for currency totals.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Decimal places shown for per-chick figures.
pub const PER_CHICK_DECIMAL_PLACES: u32 = 5;

fn round_to(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// What a cost line pays for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemKind {
    /// Vaccine doses.
    Vaccine,
    /// Allocated share of a leased machine.
    MachineLease,
    /// Per-chick machine application steps.
    MachineApplication,
    /// Additional bird treatment.
    Treatment,
}

/// A single itemised cost.
///
/// # Example
///
/// ```
/// use hatchery_pricing::models::{CostLineItem, DeliveryMethod, LineItemKind};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let item = CostLineItem {
///     label: "Inovo: Transmune".to_string(),
///     kind: LineItemKind::Vaccine,
///     method: Some(DeliveryMethod::InOvo),
///     total_cost: Decimal::from_str("3157.5").unwrap(),
///     cost_per_chick: Decimal::from_str("0.031575").unwrap(),
///     provisional: false,
/// };
///
/// let shown = item.rounded_for_display();
/// assert_eq!(shown.cost_per_chick, Decimal::from_str("0.03158").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostLineItem {
    /// Display label.
    pub label: String,
    /// What the line pays for.
    pub kind: LineItemKind,
    /// The delivery method the cost belongs to, if any.
    pub method: Option<DeliveryMethod>,
    /// Total cost of the line.
    pub total_cost: Decimal,
    /// Total cost divided by saleable chicks.
    pub cost_per_chick: Decimal,
    /// True when the cost is a placeholder because no price is configured.
    #[serde(default)]
    pub provisional: bool,
}

impl CostLineItem {
    /// Returns a copy rounded for presentation.
    pub fn rounded_for_display(&self) -> Self {
        Self {
            total_cost: round_to(self.total_cost, MONEY_DECIMAL_PLACES),
            cost_per_chick: round_to(self.cost_per_chick, PER_CHICK_DECIMAL_PLACES),
            ..self.clone()
        }
    }
}

/// The grouping a subtotal is reported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubtotalGroup {
    /// In-ovo vaccines and machine.
    InOvo,
    /// Day-old injection vaccines and machine.
    DayOldInjection,
    /// Day-old spray vaccines.
    Spray,
    /// Beak and toe treatments.
    Treatments,
}

impl From<DeliveryMethod> for SubtotalGroup {
    fn from(method: DeliveryMethod) -> Self {
        match method {
            DeliveryMethod::InOvo => SubtotalGroup::InOvo,
            DeliveryMethod::DayOldInjection => SubtotalGroup::DayOldInjection,
            DeliveryMethod::Spray => SubtotalGroup::Spray,
        }
    }
}

/// Vaccine and machine cost for one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySubtotal {
    /// The group being totalled.
    pub group: SubtotalGroup,
    /// Vaccine cost in the group.
    pub vaccine_cost: Decimal,
    /// Machine and treatment cost in the group.
    pub machine_cost: Decimal,
    /// Sum of the two.
    pub total: Decimal,
}

/// Order-level totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingTotals {
    /// Sum of all vaccine lines.
    pub total_vaccine_cost: Decimal,
    /// Sum of all machine and treatment lines.
    pub total_machine_cost: Decimal,
    /// Vaccine plus machine cost.
    pub grand_total: Decimal,
    /// Grand total per saleable chick, zero for an empty order.
    pub cost_per_chick: Decimal,
}

impl PricingTotals {
    /// Returns a copy rounded for presentation.
    pub fn rounded_for_display(&self) -> Self {
        Self {
            total_vaccine_cost: round_to(self.total_vaccine_cost, MONEY_DECIMAL_PLACES),
            total_machine_cost: round_to(self.total_machine_cost, MONEY_DECIMAL_PLACES),
            grand_total: round_to(self.grand_total, MONEY_DECIMAL_PLACES),
            cost_per_chick: round_to(self.cost_per_chick, PER_CHICK_DECIMAL_PLACES),
        }
    }
}

/// The rule that raised a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// More than one vector vaccine is selected.
    VectorConflict,
    /// A CA126 product is combined with an Innovax product.
    HvtInterference,
}

/// How strongly a warning should be treated by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningSeverity {
    /// Clinically unsafe combination.
    Critical,
    /// Likely to reduce efficacy.
    Advisory,
}

/// A finding from the rule checker.
///
/// Warnings annotate a result; they never stop it from being produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    /// The rule that raised the warning.
    pub kind: WarningKind,
    /// How the caller should treat it.
    pub severity: WarningSeverity,
    /// Human-readable description.
    pub message: String,
    /// The "vaccine (method)" selections involved.
    pub selections: Vec<String>,
    /// Suggested change, if the rule has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

/// One covered disease and the selections that provide it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageEntry {
    /// The taxonomy category the disease sits under.
    pub disease_category: String,
    /// The protection label.
    pub disease_label: String,
    /// "vaccine (method)" strings in selection order.
    pub providing_vaccines: Vec<String>,
}

/// The number of covered diseases in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCoverage {
    /// Category name.
    pub category: String,
    /// Display icon from the taxonomy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Number of coverage entries emitted for the category.
    pub count: usize,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
}

/// The complete result of pricing an order.
///
/// All monetary values are exact; call [`PricingResult::rounded_for_display`]
/// at the presentation boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    /// The version of the engine that produced the result.
    pub engine_version: String,
    /// The version of the catalogue the prices came from.
    pub catalogue_version: String,
    /// Eggs injected in-ovo for the order.
    pub eggs_for_in_ovo: u64,
    /// Passes the day-old injection machine makes, zero when unused.
    pub injection_passes: u32,
    /// Itemised costs.
    pub line_items: Vec<CostLineItem>,
    /// Per-group subtotals.
    pub subtotals: Vec<CategorySubtotal>,
    /// Order totals.
    pub totals: PricingTotals,
    /// Rule checker findings.
    pub warnings: Vec<Warning>,
    /// Covered diseases in taxonomy order.
    pub coverage: Vec<CoverageEntry>,
    /// Covered disease counts per category.
    pub coverage_counts: Vec<CategoryCoverage>,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

impl PricingResult {
    /// Returns a copy with totals rounded to 2 dp and per-chick figures to 5 dp.
    pub fn rounded_for_display(&self) -> Self {
        Self {
            line_items: self
                .line_items
                .iter()
                .map(CostLineItem::rounded_for_display)
                .collect(),
            subtotals: self
                .subtotals
                .iter()
                .map(|s| CategorySubtotal {
                    group: s.group,
                    vaccine_cost: round_to(s.vaccine_cost, MONEY_DECIMAL_PLACES),
                    machine_cost: round_to(s.machine_cost, MONEY_DECIMAL_PLACES),
                    total: round_to(s.total, MONEY_DECIMAL_PLACES),
                })
                .collect(),
            totals: self.totals.rounded_for_display(),
            ..self.clone()
        }
    }

    /// Returns true if any warning is critical.
    pub fn has_critical_warnings(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| w.severity == WarningSeverity::Critical)
    }

    /// Returns the subtotal for `group`, if present.
    pub fn subtotal(&self, group: SubtotalGroup) -> Option<&CategorySubtotal> {
        self.subtotals.iter().find(|s| s.group == group)
    }
}
