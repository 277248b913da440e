use super::domain::{MaintenanceLevel, Property, RenovationStatus};
use super::tables::ReferenceTables;
use serde::Serialize;
use std::fmt;

pub const MIN_YEAR_BUILT: i32 = 1800;
pub const MAX_SQUARE_FOOTAGE: i32 = 100_000;
pub const MAX_ROOMS: i32 = 20;

/// Input fields the validator can reject, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyField {
    PropertyType,
    Condition,
    MaintenanceLevel,
    RenovationStatus,
    YearBuilt,
    SquareFootage,
    Bedrooms,
    Bathrooms,
}

impl PropertyField {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::PropertyType,
            Self::Condition,
            Self::MaintenanceLevel,
            Self::RenovationStatus,
            Self::YearBuilt,
            Self::SquareFootage,
            Self::Bedrooms,
            Self::Bathrooms,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PropertyType => "property_type",
            Self::Condition => "condition",
            Self::MaintenanceLevel => "maintenance_level",
            Self::RenovationStatus => "renovation_status",
            Self::YearBuilt => "year_built",
            Self::SquareFootage => "square_footage",
            Self::Bedrooms => "bedrooms",
            Self::Bathrooms => "bathrooms",
        }
    }

    pub const fn message(self) -> &'static str {
        match self {
            Self::PropertyType => "invalid property type",
            Self::Condition => "invalid condition",
            Self::MaintenanceLevel => "invalid maintenance level",
            Self::RenovationStatus => "invalid renovation status",
            Self::YearBuilt => "invalid year built",
            Self::SquareFootage => "invalid square footage",
            Self::Bedrooms => "invalid number of bedrooms",
            Self::Bathrooms => "invalid number of bathrooms",
        }
    }
}

impl fmt::Display for PropertyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First structural violation found in a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("validation error: {field} - {message}")]
pub struct PropertyValidationError {
    pub field: PropertyField,
    pub message: &'static str,
}

impl From<PropertyField> for PropertyValidationError {
    fn from(field: PropertyField) -> Self {
        Self {
            field,
            message: field.message(),
        }
    }
}

/// Checks a property field by field and stops at the first violation.
pub fn validate_property(
    property: &Property,
    tables: &ReferenceTables,
    current_year: i32,
) -> Result<(), PropertyValidationError> {
    for field in PropertyField::ordered() {
        if !field_is_valid(field, property, tables, current_year) {
            return Err(field.into());
        }
    }
    Ok(())
}

fn field_is_valid(
    field: PropertyField,
    property: &Property,
    tables: &ReferenceTables,
    current_year: i32,
) -> bool {
    match field {
        PropertyField::PropertyType => tables.has_property_type(&property.property_type),
        PropertyField::Condition => tables.has_condition(&property.condition),
        PropertyField::MaintenanceLevel => property
            .maintenance_level
            .parse::<MaintenanceLevel>()
            .is_ok(),
        PropertyField::RenovationStatus => property
            .renovation_status
            .parse::<RenovationStatus>()
            .is_ok(),
        PropertyField::YearBuilt => {
            (MIN_YEAR_BUILT..=current_year).contains(&property.year_built)
        }
        PropertyField::SquareFootage => in_positive_range(property.square_footage, MAX_SQUARE_FOOTAGE),
        PropertyField::Bedrooms => in_positive_range(property.bedrooms, MAX_ROOMS),
        PropertyField::Bathrooms => in_positive_range(property.bathrooms, MAX_ROOMS),
    }
}

fn in_positive_range(value: i32, max: i32) -> bool {
    value > 0 && value <= max
}
