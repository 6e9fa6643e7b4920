//! Disease coverage summary.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::DiseaseCategory;
use crate::models::{ActiveSelection, CategoryCoverage, CoverageEntry};

/// Covered diseases and per-category counts for a set of selections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageSummary {
    /// Covered diseases in taxonomy order.
    pub entries: Vec<CoverageEntry>,
    /// Entry counts per category in taxonomy order, zero counts omitted.
    pub category_counts: Vec<CategoryCoverage>,
}

impl CoverageSummary {
    /// Returns true if no disease is covered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Maps the active selections onto the disease taxonomy.
///
/// Each protection label collects its providers as "vaccine (method)" in
/// selection order; a vaccine selected twice is listed twice. The taxonomy
/// drives the output order, so labels it does not name are not reported.
///
/// # Examples
///
/// ```
/// use hatchery_pricing::config::DiseaseCategory;
/// use hatchery_pricing::coverage::summarize_coverage;
///
/// let taxonomy = vec![DiseaseCategory {
///     name: "Reovirus".to_string(),
///     icon: None,
///     diseases: vec!["Reovirus (Viral Arthritis)".to_string()],
/// }];
///
/// let summary = summarize_coverage(&[], &taxonomy);
/// assert!(summary.is_empty());
/// assert!(summary.category_counts.is_empty());
/// ```
pub fn summarize_coverage(
    active: &[ActiveSelection<'_>],
    taxonomy: &[DiseaseCategory],
) -> CoverageSummary {
    let mut providers: HashMap<&str, Vec<String>> = HashMap::new();
    for selection in active {
        for disease in &selection.vaccine.protection {
            providers
                .entry(disease.as_str())
                .or_default()
                .push(selection.provider_label());
        }
    }

    let mut summary = CoverageSummary::default();
    for category in taxonomy {
        let before = summary.entries.len();

        for disease in &category.diseases {
            if let Some(provided_by) = providers.get(disease.as_str()) {
                summary.entries.push(CoverageEntry {
                    disease_category: category.name.clone(),
                    disease_label: disease.clone(),
                    providing_vaccines: provided_by.clone(),
                });
            }
        }

        let count = summary.entries.len() - before;
        if count > 0 {
            summary.category_counts.push(CategoryCoverage {
                category: category.name.clone(),
                icon: category.icon.clone(),
                count,
            });
        }
    }

    summary
}
