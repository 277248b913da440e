use super::calculator::{calculate_valuation, Valuation};
use super::domain::Property;
use super::tables::ReferenceTables;
use super::validator::{validate_property, PropertyValidationError};
use chrono::{Datelike, NaiveDate};
use std::sync::Arc;

/// Error raised by the valuation engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValuationError {
    #[error(transparent)]
    Invalid(#[from] PropertyValidationError),
}

/// Stateless appraiser that gates the pricing formula behind validation.
#[derive(Debug, Clone)]
pub struct ValuationEngine {
    tables: Arc<ReferenceTables>,
}

impl ValuationEngine {
    pub fn new(tables: Arc<ReferenceTables>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    /// Structural checks only; see [`validate_property`].
    pub fn validate(&self, property: &Property, today: NaiveDate) -> Result<(), ValuationError> {
        validate_property(property, &self.tables, today.year())?;
        Ok(())
    }

    /// Validate and price a property as of `today`.
    pub fn appraise(
        &self,
        property: &Property,
        today: NaiveDate,
    ) -> Result<Valuation, ValuationError> {
        let current_year = today.year();
        validate_property(property, &self.tables, current_year)?;
        Ok(calculate_valuation(property, &self.tables, current_year))
    }
}

impl Default for ValuationEngine {
    fn default() -> Self {
        Self::new(ReferenceTables::shared())
    }
}
