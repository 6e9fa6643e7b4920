//! Pricing and validation engine for hatchery vaccination programmes.
//!
//! This crate maps an order (saleable chicks, egg multiplier, lease baseline)
//! and a set of vaccine selections per delivery method to an itemised cost
//! breakdown, clinical conflict warnings and a disease coverage summary.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod coverage;
pub mod engine;
pub mod error;
pub mod models;
pub mod rules;
