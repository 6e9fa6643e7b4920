//! Core data models for the hatchery pricing engine.
//!
//! This module contains the domain models used throughout the engine: the
//! vaccine definitions that make up the catalogue, the order and slot
//! selections a caller submits, and the priced result handed back.

mod delivery_method;
mod order;
mod pricing_result;
mod selection;
mod vaccine;

pub use delivery_method::DeliveryMethod;
pub use order::{OrderLimits, OrderParameters};
pub use pricing_result::{
    AuditStep, AuditTrace, CategoryCoverage, CategorySubtotal, CostLineItem, CoverageEntry,
    LineItemKind, PricingResult, PricingTotals, SubtotalGroup, Warning, WarningKind,
    WarningSeverity,
};
pub use selection::{ActiveSelection, PricingRequest, SelectionSlot, SlotSelections};
pub use vaccine::VaccineDefinition;
