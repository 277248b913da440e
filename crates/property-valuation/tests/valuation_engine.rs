use chrono::{Datelike, NaiveDate};
use property_valuation::valuation::{
    AdjustmentFactor, IssueCategory, Location, Property, PropertyField, ReferenceTables,
    ValuationEngine, ValuationError,
};
use std::collections::BTreeSet;
use std::sync::Arc;

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 14).expect("valid as-of date")
}

fn property(
    property_type: &str,
    square_footage: i32,
    age: i32,
    condition: &str,
    maintenance_level: &str,
    renovation_status: &str,
    features: &[&str],
) -> Property {
    Property {
        address: "404 Birch Rd".to_string(),
        property_type: property_type.to_string(),
        bedrooms: 3,
        bathrooms: 1,
        square_footage,
        year_built: as_of().year() - age,
        condition: condition.to_string(),
        maintenance_level: maintenance_level.to_string(),
        renovation_status: renovation_status.to_string(),
        features: features.iter().map(|f| f.to_string()).collect::<BTreeSet<_>>(),
        location: Location::default(),
    }
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn conforming_excellent_house_earns_full_premium() {
    let engine = ValuationEngine::default();
    let mut house = property(
        "house",
        3000,
        1,
        "excellent",
        "excellent",
        "recent",
        &[
            "energy_efficient",
            "modern_appliances",
            "smart_home",
            "garage",
            "garden",
            "pool",
        ],
    );
    house.bedrooms = 4;
    house.bathrooms = 3;

    let valuation = engine.appraise(&house, as_of()).expect("appraised");

    assert!(valuation.conformance.is_valid());
    // modern_appliances carries no value of its own
    assert_close(valuation.breakdown.feature_additions, 115_000.0);
    assert_close(valuation.value, 1_513_125.0);
    assert_close(valuation.confidence, 0.95);
}

#[test]
fn needs_work_property_matches_its_criteria() {
    let engine = ValuationEngine::default();
    let house = property(
        "house",
        1500,
        25,
        "needs_work",
        "very_poor",
        "needs_renovation",
        &["major_repairs_needed"],
    );

    let valuation = engine.appraise(&house, as_of()).expect("appraised");

    assert!(valuation.conformance.is_valid());
    assert_close(valuation.breakdown.depreciation_factor, 0.875);
    assert_close(valuation.value, 326_250.0);
}

#[test]
fn poor_property_values_unknown_features_at_zero() {
    let engine = ValuationEngine::default();
    let house = property(
        "house",
        1600,
        18,
        "poor",
        "poor",
        "needs_repairs",
        &["outdated_systems"],
    );

    let valuation = engine.appraise(&house, as_of()).expect("appraised");

    assert!(valuation.conformance.is_valid());
    assert_close(valuation.breakdown.feature_additions, 0.0);
    assert_close(valuation.value, 417_600.0);
}

#[test]
fn fair_claim_with_poor_upkeep_reports_issues_and_still_succeeds() {
    let engine = ValuationEngine::default();
    let house = property(
        "house",
        1800,
        12,
        "fair",
        "poor",
        "needs_updates",
        &["garage", "needs_repair"],
    );

    let valuation = engine.appraise(&house, as_of()).expect("appraised");

    assert_eq!(valuation.conformance.issues.len(), 1);
    assert_eq!(
        valuation.conformance.issues[0].category,
        IssueCategory::Maintenance
    );
    assert_eq!(
        valuation
            .conformance
            .adjustments
            .get(&AdjustmentFactor::Maintenance),
        Some(&0.7)
    );
    assert_close(valuation.confidence, 0.95);
    assert!(valuation.explanation.contains("Condition validation issues"));
}

#[test]
fn engines_share_reference_tables() {
    let tables = ReferenceTables::shared();
    let engine = ValuationEngine::new(Arc::clone(&tables));
    assert!(engine.tables().has_condition("needs_work"));
    assert_eq!(engine.tables().base_price("penthouse"), Some(400.0));
}

#[test]
fn every_rejection_names_a_single_field() {
    let engine = ValuationEngine::default();
    let mut invalid = property("house", 0, 5, "good", "good", "standard", &[]);
    invalid.bedrooms = 0;
    invalid.bathrooms = 0;

    let err = engine
        .appraise(&invalid, as_of())
        .expect_err("zero square footage rejected");

    let ValuationError::Invalid(failure) = err;
    assert_eq!(failure.field, PropertyField::SquareFootage);
    assert_eq!(failure.message, "invalid square footage");
}
