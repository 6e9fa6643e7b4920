//! Error types for the hatchery pricing engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading reference data or
//! pricing an order.

use thiserror::Error;

use crate::models::DeliveryMethod;

/// The main error type for the pricing engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use hatchery_pricing::error::EngineError;
///
/// let error = EngineError::UnknownVaccine {
///     name: "Mystery Vax".to_string(),
/// };
/// assert_eq!(error.to_string(), "Unknown vaccine: Mystery Vax");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but broke one of the reference data invariants.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the violated invariant.
        message: String,
    },

    /// An order parameter was missing a valid value or out of range.
    #[error("Invalid order field '{field}': {message}")]
    InvalidOrder {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A slot list for a delivery method could not be accepted.
    #[error("Invalid {method} selection: {message}")]
    InvalidSelection {
        /// The delivery method whose slots were rejected.
        method: DeliveryMethod,
        /// A description of the problem.
        message: String,
    },

    /// A selection referenced a vaccine that is not in the catalogue.
    #[error("Unknown vaccine: {name}")]
    UnknownVaccine {
        /// The name that could not be resolved.
        name: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
