use super::conformance::{score_conformance, ConformanceReport};
use super::domain::Property;
use super::tables::{ConditionCriteria, ReferenceTables, DEFAULT_CONDITION, DEFAULT_PROPERTY_TYPE};
use serde::Serialize;
use tracing::debug;

pub const BEDROOM_VALUE: f64 = 25_000.0;
pub const BATHROOM_VALUE: f64 = 15_000.0;

const DEPRECIATION_PER_YEAR: f64 = 0.005;
const DEPRECIATION_FLOOR: f64 = 0.7;

const BASE_CONFIDENCE: f64 = 0.85;
const CONFIDENCE_BONUS: f64 = 0.05;
pub const MAX_CONFIDENCE: f64 = 0.95;

/// Intermediate figures of a valuation, in the order they were applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValuationBreakdown {
    pub base_price_per_square_foot: f64,
    pub base_value: f64,
    pub condition_multiplier: f64,
    pub adjusted_multiplier: f64,
    pub feature_additions: f64,
    pub depreciation_factor: f64,
    pub bedroom_value: f64,
    pub bathroom_value: f64,
}

/// Appraisal output: point estimate, confidence, and narrative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Valuation {
    pub value: f64,
    pub confidence: f64,
    pub explanation: String,
    pub conformance: ConformanceReport,
    pub breakdown: ValuationBreakdown,
}

/// Linear age depreciation, floored so at most 30% of value is lost.
pub fn depreciation_factor(age: i32) -> f64 {
    (1.0 - f64::from(age) * DEPRECIATION_PER_YEAR).max(DEPRECIATION_FLOOR)
}

/// Prices a property. Missing table entries fall back to defaults rather
/// than failing; structural checks belong to the validator.
pub fn calculate_valuation(
    property: &Property,
    tables: &ReferenceTables,
    current_year: i32,
) -> Valuation {
    let base_price = match tables.base_price(&property.property_type) {
        Some(price) => price,
        None => {
            debug!(
                property_type = %property.property_type,
                "unknown property type, using {DEFAULT_PROPERTY_TYPE} rate"
            );
            tables.default_base_price()
        }
    };

    let base_value = f64::from(property.square_footage) * base_price;
    let mut value = base_value;

    let criteria = match tables.condition(&property.condition) {
        Some(criteria) => criteria,
        None => {
            debug!(
                condition = %property.condition,
                "unknown condition, using {DEFAULT_CONDITION} criteria"
            );
            tables.default_condition()
        }
    };

    let conformance = score_conformance(property, criteria, current_year);
    let adjusted_multiplier = criteria.multiplier * conformance.total_score;
    value *= adjusted_multiplier;

    let feature_additions: f64 = property
        .features
        .iter()
        .filter_map(|feature| tables.feature_value(feature))
        .sum();
    value += feature_additions;

    let depreciation = depreciation_factor(current_year - property.year_built);
    value *= depreciation;

    let bedroom_value = f64::from(property.bedrooms) * BEDROOM_VALUE;
    let bathroom_value = f64::from(property.bathrooms) * BATHROOM_VALUE;
    value += bedroom_value + bathroom_value;

    let mut confidence = BASE_CONFIDENCE;
    if !property.features.is_empty() {
        confidence += CONFIDENCE_BONUS;
    }
    if !property.condition.is_empty() {
        confidence += CONFIDENCE_BONUS;
    }
    if conformance.is_valid() {
        confidence += CONFIDENCE_BONUS;
    }
    let confidence = confidence.min(MAX_CONFIDENCE);

    let breakdown = ValuationBreakdown {
        base_price_per_square_foot: base_price,
        base_value,
        condition_multiplier: criteria.multiplier,
        adjusted_multiplier,
        feature_additions,
        depreciation_factor: depreciation,
        bedroom_value,
        bathroom_value,
    };
    let explanation = explain(property, criteria, &conformance, &breakdown);

    Valuation {
        value,
        confidence,
        explanation,
        conformance,
        breakdown,
    }
}

fn explain(
    property: &Property,
    criteria: &ConditionCriteria,
    conformance: &ConformanceReport,
    breakdown: &ValuationBreakdown,
) -> String {
    let mut explanation = String::from("Valuation based on:\n");
    explanation.push_str(&format!(
        "- Base value: ${:.2} per sq ft for {} property\n",
        breakdown.base_price_per_square_foot, property.property_type
    ));
    explanation.push_str(&format!(
        "- Condition: {} (base multiplier: {:.2})\n",
        criteria.description, criteria.multiplier
    ));

    if !conformance.is_valid() {
        explanation.push_str("\nCondition validation issues:\n");
        for issue in &conformance.issues {
            explanation.push_str(&format!(
                "  ! [{}] {} (Severity: {:.1})\n",
                issue.category, issue.description, issue.severity
            ));
        }
        explanation.push_str("\nAdjustment factors applied:\n");
        for (factor, adjustment) in &conformance.adjustments {
            explanation.push_str(&format!("  * {}: {:.2}\n", factor, adjustment));
        }
        explanation.push_str(&format!(
            "  Final multiplier: {:.2}\n",
            breakdown.adjusted_multiplier
        ));
    }

    explanation.push_str(&format!(
        "- Feature additions: ${:.2}\n",
        breakdown.feature_additions
    ));
    explanation.push_str(&format!(
        "- Age-based depreciation: {:.2}\n",
        breakdown.depreciation_factor
    ));
    explanation.push_str(&format!(
        "- Bedroom value: ${:.2}\n",
        breakdown.bedroom_value
    ));
    explanation.push_str(&format!(
        "- Bathroom value: ${:.2}\n",
        breakdown.bathroom_value
    ));
    explanation
}
