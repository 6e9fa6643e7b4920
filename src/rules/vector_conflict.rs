//! Vector vaccine conflict rule.
//!
//! Vector vaccines share the same HVT backbone, so at most one may be used
//! across the whole programme regardless of delivery method.

use crate::models::{ActiveSelection, Warning, WarningKind, WarningSeverity};

/// Raises a critical warning when more than one vector vaccine is active.
///
/// The warning lists every vector selection as "vaccine (method)" in
/// selection order.
pub fn check_vector_conflict(active: &[ActiveSelection<'_>]) -> Option<Warning> {
    let vectors: Vec<String> = active
        .iter()
        .filter(|s| s.vaccine.is_vector)
        .map(ActiveSelection::provider_label)
        .collect();

    if vectors.len() < 2 {
        return None;
    }

    Some(Warning {
        kind: WarningKind::VectorConflict,
        severity: WarningSeverity::Critical,
        message: format!(
            "Only one vector vaccine can be used. Currently selected: {}",
            vectors.join(", ")
        ),
        selections: vectors,
        recommendation: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DeliveryMethod, VaccineDefinition};
    use rust_decimal::Decimal;

    fn vaccine(name: &str, is_vector: bool) -> VaccineDefinition {
        VaccineDefinition {
            name: name.to_string(),
            price_per_thousand_doses: Decimal::ONE,
            categories: vec![DeliveryMethod::InOvo, DeliveryMethod::DayOldInjection],
            protection: vec![],
            is_vector,
            notes: None,
        }
    }

    fn select(v: &VaccineDefinition, method: DeliveryMethod) -> ActiveSelection<'_> {
        ActiveSelection {
            vaccine: v,
            method,
            double_dose: false,
        }
    }

    #[test]
    fn test_single_vector_is_fine() {
        let nd_ilt = vaccine("Innovax ND-ILT", true);
        let transmune = vaccine("Transmune", false);
        let active = [
            select(&nd_ilt, DeliveryMethod::InOvo),
            select(&transmune, DeliveryMethod::InOvo),
        ];
        assert!(check_vector_conflict(&active).is_none());
    }

    #[test]
    fn test_no_selection_is_fine() {
        assert!(check_vector_conflict(&[]).is_none());
    }

    #[test]
    fn test_two_vectors_across_methods_conflict() {
        let nd_ilt = vaccine("Innovax ND-ILT", true);
        let vectormune = vaccine("Vectormune ND", true);
        let active = [
            select(&nd_ilt, DeliveryMethod::InOvo),
            select(&vectormune, DeliveryMethod::DayOldInjection),
        ];

        let warning = check_vector_conflict(&active).unwrap();
        assert_eq!(warning.kind, WarningKind::VectorConflict);
        assert_eq!(warning.severity, WarningSeverity::Critical);
        assert_eq!(
            warning.selections,
            vec!["Innovax ND-ILT (Inovo)", "Vectormune ND (Day Old Inj)"]
        );
        assert!(warning.message.contains("Innovax ND-ILT (Inovo), Vectormune ND (Day Old Inj)"));
    }

    #[test]
    fn test_same_vector_twice_conflicts() {
        let nd_ibd = vaccine("Innovax ND-IBD", true);
        let active = [
            select(&nd_ibd, DeliveryMethod::InOvo),
            select(&nd_ibd, DeliveryMethod::InOvo),
        ];
        assert_eq!(check_vector_conflict(&active).unwrap().selections.len(), 2);
    }
}
