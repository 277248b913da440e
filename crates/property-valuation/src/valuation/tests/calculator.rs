use super::common::*;
use crate::valuation::calculator::{calculate_valuation, depreciation_factor, MAX_CONFIDENCE};
use crate::valuation::conformance::IssueCategory;

#[test]
fn good_house_scenario() {
    let valuation = calculate_valuation(&good_house(), &tables(), current_year());

    assert!(valuation.conformance.is_valid());
    assert_close(valuation.conformance.total_score, 1.0);
    assert_close(valuation.confidence, 0.95);
    // 2000 * 300 * 1.10 + 45_000, depreciated 5 years, plus rooms
    assert_close(valuation.value, (660_000.0 + 45_000.0) * 0.975 + 105_000.0);
    assert_close(valuation.breakdown.base_value, 600_000.0);
    assert_close(valuation.breakdown.feature_additions, 45_000.0);
    assert_close(valuation.breakdown.bedroom_value, 75_000.0);
    assert_close(valuation.breakdown.bathroom_value, 30_000.0);
}

#[test]
fn nonconformance_lowers_value_but_not_below_cap() {
    let mut property = good_house();
    property.condition = "excellent".to_string();

    let valuation = calculate_valuation(&property, &tables(), current_year());

    let expected_multiplier = 1.40 * 0.5 * 0.4 * 0.7 * 0.7;
    assert_close(valuation.breakdown.adjusted_multiplier, expected_multiplier);
    assert_close(
        valuation.value,
        (600_000.0 * expected_multiplier + 45_000.0) * 0.975 + 105_000.0,
    );
    assert_close(valuation.confidence, 0.95);
    assert!(valuation.confidence <= MAX_CONFIDENCE);
}

#[test]
fn confidence_drops_without_features_or_conformance() {
    let mut property = good_house();
    property.features.clear();
    property.maintenance_level = "fair".to_string();

    let valuation = calculate_valuation(&property, &tables(), current_year());

    assert_eq!(
        valuation
            .conformance
            .issues_in(IssueCategory::Maintenance)
            .count(),
        1
    );
    assert_close(valuation.confidence, 0.90);
}

#[test]
fn unknown_property_type_uses_apartment_rate() {
    let mut property = good_house();
    property.property_type = "castle".to_string();

    let valuation = calculate_valuation(&property, &tables(), current_year());

    assert_close(valuation.breakdown.base_price_per_square_foot, 250.0);
    assert_close(valuation.breakdown.base_value, 500_000.0);
    assert!(valuation.explanation.contains("per sq ft for castle property"));
}

#[test]
fn unknown_condition_uses_good_criteria() {
    let mut property = good_house();
    property.condition = "pristine".to_string();

    let valuation = calculate_valuation(&property, &tables(), current_year());

    assert_close(valuation.breakdown.condition_multiplier, 1.10);
    assert!(valuation.conformance.is_valid());
    assert!(valuation
        .explanation
        .contains("Condition: Standard condition, some wear"));
}

#[test]
fn unrecognized_features_add_nothing() {
    let mut property = good_house();
    property.features = features(&["garage", "moat", "drawbridge"]);

    let valuation = calculate_valuation(&property, &tables(), current_year());

    assert_close(valuation.breakdown.feature_additions, 20_000.0);
    assert_close(valuation.confidence, 0.95);
}

#[test]
fn depreciation_is_monotonic_and_floored() {
    let mut previous = depreciation_factor(0);
    assert_close(previous, 1.0);
    for age in 1..=500 {
        let factor = depreciation_factor(age);
        assert!(factor <= previous, "age {age} increased depreciation factor");
        assert!(factor >= 0.7);
        previous = factor;
    }
    assert_close(depreciation_factor(60), 0.7);
    assert_close(depreciation_factor(i32::MAX), 0.7);
}

#[test]
fn valuation_is_deterministic_for_a_given_year() {
    let mut property = good_house();
    property.condition = "very_good".to_string();
    property.features = features(&["pool", "updated_systems", "outdated_systems"]);

    let tables = tables();
    let first = calculate_valuation(&property, &tables, current_year());
    let second = calculate_valuation(&property, &tables, current_year());

    assert_eq!(first, second);
}

#[test]
fn explanation_lists_issues_only_when_nonconformant() {
    let clean = calculate_valuation(&good_house(), &tables(), current_year());
    assert!(clean.explanation.starts_with("Valuation based on:\n"));
    assert!(!clean.explanation.contains("Condition validation issues"));
    assert!(clean.explanation.contains("- Age-based depreciation: 0.97"));
    assert!(clean.explanation.contains("- Bedroom value: $75000.00"));
    assert!(clean.explanation.ends_with("- Bathroom value: $30000.00\n"));

    let mut property = good_house();
    property.condition = "excellent".to_string();
    let flagged = calculate_valuation(&property, &tables(), current_year());
    assert!(flagged.explanation.contains("Condition validation issues:"));
    assert!(flagged
        .explanation
        .contains("  ! [feature] Missing required feature: smart_home (Severity: 0.7)"));
    assert!(flagged.explanation.contains("  * features: 0.40"));
    assert!(flagged.explanation.contains("  Final multiplier: 0.14"));

    let age_line = flagged
        .explanation
        .find("  * age:")
        .expect("age adjustment listed");
    let renovation_line = flagged
        .explanation
        .find("  * renovation:")
        .expect("renovation adjustment listed");
    assert!(age_line < renovation_line);
}
