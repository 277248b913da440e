use chrono::{Datelike, NaiveDate};

use crate::valuation::domain::{Location, Property};
use crate::valuation::tables::ReferenceTables;

pub(super) const EPSILON: f64 = 1e-6;

pub(super) fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 1).expect("valid date")
}

pub(super) fn current_year() -> i32 {
    as_of().year()
}

pub(super) fn tables() -> ReferenceTables {
    ReferenceTables::standard()
}

pub(super) fn features(names: &[&str]) -> std::collections::BTreeSet<String> {
    names.iter().map(|name| name.to_string()).collect()
}

/// Five-year-old house whose attributes match the "good" condition exactly.
pub(super) fn good_house() -> Property {
    Property {
        address: "123 Test St".to_string(),
        property_type: "house".to_string(),
        bedrooms: 3,
        bathrooms: 2,
        square_footage: 2000,
        year_built: current_year() - 5,
        condition: "good".to_string(),
        maintenance_level: "good".to_string(),
        renovation_status: "standard".to_string(),
        features: features(&["garage", "garden"]),
        location: Location {
            latitude: 41.5868,
            longitude: -93.625,
        },
    }
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}
