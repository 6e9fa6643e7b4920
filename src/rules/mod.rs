//! Clinical compatibility rules.
//!
//! Rules look at the active selections only and never affect prices. Each
//! rule is evaluated independently and contributes at most one warning.

mod hvt_interference;
mod vector_conflict;

pub use hvt_interference::check_hvt_interference;
pub use vector_conflict::check_vector_conflict;

use crate::models::{ActiveSelection, Warning};

type Rule = fn(&[ActiveSelection<'_>]) -> Option<Warning>;

const RULES: [Rule; 2] = [check_vector_conflict, check_hvt_interference];

/// Runs every rule against the active selections.
///
/// Warnings come back in rule declaration order: vector conflict first,
/// then HVT interference.
///
/// # Examples
///
/// ```
/// use hatchery_pricing::rules::check_rules;
///
/// assert!(check_rules(&[]).is_empty());
/// ```
pub fn check_rules(active: &[ActiveSelection<'_>]) -> Vec<Warning> {
    RULES.iter().filter_map(|rule| rule(active)).collect()
}
