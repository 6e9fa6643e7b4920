//! Disease coverage reporting.
//!
//! Turns the active selections into the list of diseases the programme
//! protects against, grouped by the configured disease taxonomy.

mod summarizer;

pub use summarizer::{CoverageSummary, summarize_coverage};
