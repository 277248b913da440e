//! Property valuation: reference tables, input validation, condition
//! conformance scoring, and the pricing formula.
//!
//! Every entry point takes the as-of year explicitly so a single call sees
//! one consistent "current year".

pub mod calculator;
pub mod conformance;
pub mod domain;
mod engine;
pub mod tables;
pub mod validator;

#[cfg(test)]
mod tests;

pub use calculator::{calculate_valuation, depreciation_factor, Valuation, ValuationBreakdown};
pub use conformance::{
    score_conformance, AdjustmentFactor, ConformanceReport, IssueCategory, ValidationIssue,
};
pub use domain::{Location, MaintenanceLevel, Property, RenovationStatus};
pub use engine::{ValuationEngine, ValuationError};
pub use tables::{ConditionCriteria, ReferenceTables, DEFAULT_CONDITION, DEFAULT_PROPERTY_TYPE};
pub use validator::{validate_property, PropertyField, PropertyValidationError};
