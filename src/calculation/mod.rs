//! Calculation logic for the Hatchery Pricing Engine.
//!
//! This module contains the individual pricing steps: dose multipliers,
//! per-selection vaccine cost, the in-ovo lease allocation, the day-old
//! injection machine, treatments and order totals. Each step returns its
//! figures together with an [`AuditStep`](crate::models::AuditStep).

mod dose_multiplier;
mod in_ovo_machine;
mod injection_machine;
mod per_chick;
mod totals;
mod treatments;
mod vaccine_cost;

pub use dose_multiplier::{
    DOSES_PER_PRICE_UNIT, DoseMultiplierResult, DoseMultipliers, calculate_dose_multipliers,
};
pub use in_ovo_machine::{InOvoMachineResult, calculate_in_ovo_machine};
pub use injection_machine::{InjectionMachineResult, calculate_injection_machine, injection_passes};
pub use per_chick::{cost_per_chick, ratio_or_zero};
pub use totals::{TotalsResult, calculate_totals};
pub use treatments::{TreatmentResult, calculate_treatments};
pub use vaccine_cost::{VaccineCostResult, calculate_vaccine_cost};
