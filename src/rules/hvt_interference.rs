//! HVT interference rule.
//!
//! A CA126 Marek's product may suppress the take of an Innovax vector
//! vaccine. The combination is allowed but flagged.

use crate::models::{ActiveSelection, Warning, WarningKind, WarningSeverity};

const RECOMMENDATION: &str = "Consider Rismavac HIGH PFU instead";

/// Raises an advisory warning when a CA126 product and an Innovax product
/// are both active.
pub fn check_hvt_interference(active: &[ActiveSelection<'_>]) -> Option<Warning> {
    let has_ca126 = active.iter().any(|s| s.vaccine.involves_ca126());
    let has_innovax = active.iter().any(|s| s.vaccine.involves_innovax_family());

    if !(has_ca126 && has_innovax) {
        return None;
    }

    let selections = active
        .iter()
        .filter(|s| s.vaccine.involves_ca126() || s.vaccine.involves_innovax_family())
        .map(ActiveSelection::provider_label)
        .collect();

    Some(Warning {
        kind: WarningKind::HvtInterference,
        severity: WarningSeverity::Advisory,
        message: "CA126 may interfere with Innovax".to_string(),
        selections,
        recommendation: Some(RECOMMENDATION.to_string()),
    })
}
