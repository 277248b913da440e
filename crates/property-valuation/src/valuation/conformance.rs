use super::domain::{MaintenanceLevel, Property, RenovationStatus};
use super::tables::ConditionCriteria;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

const OUT_OF_RANGE_AGE_SCORE: f64 = 0.5;
const MISSING_FEATURE_PENALTY: f64 = 0.2;
const EXCLUDED_FEATURE_FACTOR: f64 = 0.8;
const MISMATCH_SCORE: f64 = 0.7;

const TOO_OLD_SEVERITY: f64 = 0.9;
const TOO_NEW_SEVERITY: f64 = 0.8;
const MISSING_FEATURE_SEVERITY: f64 = 0.7;
const EXCLUDED_FEATURE_SEVERITY: f64 = 0.6;
const MAINTENANCE_SEVERITY: f64 = 0.5;
const RENOVATION_SEVERITY: f64 = 0.6;
const ESCALATED_SEVERITY: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    Age,
    Feature,
    Maintenance,
    Renovation,
}

impl IssueCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Feature => "feature",
            Self::Maintenance => "maintenance",
            Self::Renovation => "renovation",
        }
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Independent sub-scores folded into the conformance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentFactor {
    Age,
    Features,
    ExcludedFeatures,
    Maintenance,
    Renovation,
}

impl AdjustmentFactor {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Features => "features",
            Self::ExcludedFeatures => "excluded_features",
            Self::Maintenance => "maintenance",
            Self::Renovation => "renovation",
        }
    }
}

impl fmt::Display for AdjustmentFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One mismatch between a property and its declared condition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub description: String,
    pub severity: f64,
    pub category: IssueCategory,
}

/// How well a property's attributes support its declared condition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConformanceReport {
    pub issues: Vec<ValidationIssue>,
    pub total_score: f64,
    pub adjustments: BTreeMap<AdjustmentFactor, f64>,
}

impl ConformanceReport {
    /// True when no issue was logged, regardless of the score.
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn adjustment(&self, factor: AdjustmentFactor) -> Option<f64> {
        self.adjustments.get(&factor).copied()
    }

    pub fn issues_in(&self, category: IssueCategory) -> impl Iterator<Item = &ValidationIssue> {
        self.issues
            .iter()
            .filter(move |issue| issue.category == category)
    }
}

/// Scores a property against the criteria of the condition it claims.
pub fn score_conformance(
    property: &Property,
    criteria: &ConditionCriteria,
    current_year: i32,
) -> ConformanceReport {
    let mut issues = Vec::new();
    let mut adjustments = BTreeMap::new();

    let years = criteria.age_window.year_range(current_year);
    let mut age_score = 1.0;
    if !years.contains(property.year_built) {
        let severity = if property.year_built < years.min {
            TOO_OLD_SEVERITY
        } else {
            TOO_NEW_SEVERITY
        };
        issues.push(ValidationIssue {
            description: format!(
                "Property year built ({}) is outside the acceptable range ({}-{}) for {} condition",
                property.year_built, years.min, years.max, criteria.description
            ),
            severity,
            category: IssueCategory::Age,
        });
        age_score = OUT_OF_RANGE_AGE_SCORE;
    }
    adjustments.insert(AdjustmentFactor::Age, age_score);

    let mut missing = 0u32;
    for required in criteria.required_features {
        if !property.has_feature(required) {
            missing += 1;
            issues.push(ValidationIssue {
                description: format!("Missing required feature: {required}"),
                severity: MISSING_FEATURE_SEVERITY,
                category: IssueCategory::Feature,
            });
        }
    }
    let feature_score = (1.0 - f64::from(missing) * MISSING_FEATURE_PENALTY).clamp(0.0, 1.0);
    adjustments.insert(AdjustmentFactor::Features, feature_score);

    let mut excluded_score = 1.0;
    for excluded in criteria.excluded_features {
        if property.has_feature(excluded) {
            issues.push(ValidationIssue {
                description: format!("Property has excluded feature: {excluded}"),
                severity: EXCLUDED_FEATURE_SEVERITY,
                category: IssueCategory::Feature,
            });
            excluded_score *= EXCLUDED_FEATURE_FACTOR;
        }
    }
    adjustments.insert(AdjustmentFactor::ExcludedFeatures, excluded_score);

    let mut maintenance_score = 1.0;
    let expected_maintenance = criteria.maintenance_level;
    if property.maintenance_level != expected_maintenance.as_str() {
        let escalated = expected_maintenance == MaintenanceLevel::Excellent
            && property.maintenance_level == MaintenanceLevel::VeryPoor.as_str();
        issues.push(ValidationIssue {
            description: format!(
                "Maintenance level ({}) does not match expected level ({}) for {} condition",
                property.maintenance_level, expected_maintenance, criteria.description
            ),
            severity: if escalated {
                ESCALATED_SEVERITY
            } else {
                MAINTENANCE_SEVERITY
            },
            category: IssueCategory::Maintenance,
        });
        maintenance_score = MISMATCH_SCORE;
    }
    adjustments.insert(AdjustmentFactor::Maintenance, maintenance_score);

    let mut renovation_score = 1.0;
    let expected_renovation = criteria.renovation_status;
    if property.renovation_status != expected_renovation.as_str() {
        let escalated = expected_renovation == RenovationStatus::Recent
            && property.renovation_status == RenovationStatus::NeedsRenovation.as_str();
        issues.push(ValidationIssue {
            description: format!(
                "Renovation status ({}) does not match expected status ({}) for {} condition",
                property.renovation_status, expected_renovation, criteria.description
            ),
            severity: if escalated {
                ESCALATED_SEVERITY
            } else {
                RENOVATION_SEVERITY
            },
            category: IssueCategory::Renovation,
        });
        renovation_score = MISMATCH_SCORE;
    }
    adjustments.insert(AdjustmentFactor::Renovation, renovation_score);

    let total_score = adjustments.values().product();

    ConformanceReport {
        issues,
        total_score,
        adjustments,
    }
}
