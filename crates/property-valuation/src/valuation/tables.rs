//! Static reference data backing the pricing formula.
//!
//! Tables are assembled once and shared read-only; lookups never mutate.

use super::domain::{MaintenanceLevel, RenovationStatus};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

/// Property type whose rate is used when a type has no table entry.
pub const DEFAULT_PROPERTY_TYPE: &str = "apartment";
/// Condition whose criteria are used when a condition has no table entry.
pub const DEFAULT_CONDITION: &str = "good";

const DEFAULT_BASE_PRICE: f64 = 250.0;

const PRICE_PER_SQUARE_FOOT: &[(&str, f64)] = &[
    // residential, urban
    (DEFAULT_PROPERTY_TYPE, DEFAULT_BASE_PRICE),
    ("house", 300.0),
    ("condo", 275.0),
    ("townhouse", 285.0),
    ("villa", 350.0),
    ("studio", 225.0),
    ("loft", 275.0),
    ("penthouse", 400.0),
    // residential, suburban
    ("suburban_house", 275.0),
    ("suburban_condo", 250.0),
    ("suburban_townhouse", 260.0),
    // office
    ("office_class_a", 200.0),
    ("office_class_b", 175.0),
    ("office_class_c", 150.0),
    // retail
    ("retail_high_street", 225.0),
    ("retail_mall", 200.0),
    ("retail_strip", 175.0),
    // industrial
    ("warehouse", 125.0),
    ("industrial", 100.0),
    ("logistics", 150.0),
    ("manufacturing", 120.0),
];

const FEATURE_VALUES: &[(&str, f64)] = &[
    // exterior
    ("garage", 20_000.0),
    ("garden", 25_000.0),
    ("pool", 35_000.0),
    ("tennis_court", 40_000.0),
    ("security_gate", 15_000.0),
    ("fence", 10_000.0),
    ("patio", 12_000.0),
    ("deck", 15_000.0),
    ("balcony", 8_000.0),
    ("roof_garden", 30_000.0),
    // interior
    ("fireplace", 12_000.0),
    ("basement", 30_000.0),
    ("wine_cellar", 25_000.0),
    ("home_office", 15_000.0),
    ("walk_in_closet", 8_000.0),
    ("laundry_room", 10_000.0),
    ("mudroom", 5_000.0),
    // smart home
    ("smart_home", 20_000.0),
    ("security_system", 15_000.0),
    ("cctv", 10_000.0),
    // energy
    ("solar_panels", 25_000.0),
    ("energy_efficient", 15_000.0),
    ("double_glazing", 12_000.0),
    // luxury
    ("elevator", 40_000.0),
    ("concierge", 20_000.0),
    ("gym", 30_000.0),
    ("spa", 35_000.0),
    ("movie_room", 25_000.0),
];

// Reserved: no market-data lookup feeds these into the formula yet.
const LOCATION_MULTIPLIERS: &[(&str, f64)] = &[
    ("urban", 1.20),
    ("suburban", 1.00),
    ("rural", 0.85),
    ("waterfront", 1.30),
    ("mountain", 1.15),
    ("beach", 1.25),
];

/// Age window a condition accepts, expressed relative to the as-of year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeWindow {
    /// Youngest acceptable age in years.
    pub min_age: i32,
    /// Oldest acceptable age in years; `None` accepts any older build.
    pub max_age: Option<i32>,
}

impl AgeWindow {
    pub const fn within(max_age: i32) -> Self {
        Self {
            min_age: 0,
            max_age: Some(max_age),
        }
    }

    pub const fn at_least(min_age: i32) -> Self {
        Self {
            min_age,
            max_age: None,
        }
    }

    /// Inclusive year-built range for the given current year.
    pub fn year_range(&self, current_year: i32) -> YearRange {
        YearRange {
            min: self.max_age.map_or(0, |age| current_year - age),
            max: current_year - self.min_age,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

impl YearRange {
    pub fn contains(&self, year: i32) -> bool {
        year >= self.min && year <= self.max
    }
}

/// Expectations a property must meet to support a declared condition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionCriteria {
    pub name: &'static str,
    pub multiplier: f64,
    pub description: &'static str,
    pub age_window: AgeWindow,
    pub required_features: &'static [&'static str],
    pub excluded_features: &'static [&'static str],
    pub maintenance_level: MaintenanceLevel,
    pub renovation_status: RenovationStatus,
    pub criteria: &'static [&'static str],
}

fn good_condition() -> ConditionCriteria {
    ConditionCriteria {
        name: DEFAULT_CONDITION,
        multiplier: 1.10,
        description: "Standard condition, some wear",
        age_window: AgeWindow::within(10),
        required_features: &[],
        excluded_features: &["system_failures", "major_repairs_needed"],
        maintenance_level: MaintenanceLevel::Good,
        renovation_status: RenovationStatus::Standard,
        criteria: &[
            "Built or renovated within last 10 years",
            "Standard finishes and materials",
            "Systems in working order",
            "Normal wear and tear",
            "Functional appliances and fixtures",
            "Regular maintenance",
            "Basic landscaping",
        ],
    }
}

fn standard_conditions() -> Vec<ConditionCriteria> {
    vec![
        ConditionCriteria {
            name: "excellent",
            multiplier: 1.40,
            description: "Like new, fully renovated, premium finishes",
            age_window: AgeWindow::within(2),
            required_features: &["energy_efficient", "modern_appliances", "smart_home"],
            excluded_features: &["needs_repair", "outdated_systems", "major_repairs_needed"],
            maintenance_level: MaintenanceLevel::Excellent,
            renovation_status: RenovationStatus::Recent,
            criteria: &[
                "Built or renovated within last 2 years",
                "High-end finishes and materials",
                "All systems (HVAC, electrical, plumbing) in perfect condition",
                "No visible wear or damage",
                "Modern appliances and fixtures",
                "Energy efficient systems",
                "Professional landscaping",
                "Smart home technology",
            ],
        },
        ConditionCriteria {
            name: "very_good",
            multiplier: 1.25,
            description: "Well maintained, minor updates needed",
            age_window: AgeWindow::within(5),
            required_features: &["updated_systems", "modern_appliances"],
            excluded_features: &["major_repairs_needed", "outdated_systems"],
            maintenance_level: MaintenanceLevel::VeryGood,
            renovation_status: RenovationStatus::Recent,
            criteria: &[
                "Built or renovated within last 5 years",
                "Quality finishes and materials",
                "All systems functioning properly",
                "Minimal wear and tear",
                "Updated appliances and fixtures",
                "Good maintenance history",
                "Attractive landscaping",
            ],
        },
        good_condition(),
        ConditionCriteria {
            name: "fair",
            multiplier: 0.90,
            description: "Needs some repairs and updates",
            age_window: AgeWindow::within(15),
            required_features: &[],
            excluded_features: &["major_system_failures"],
            maintenance_level: MaintenanceLevel::Fair,
            renovation_status: RenovationStatus::NeedsUpdates,
            criteria: &[
                "Built or renovated within last 15 years",
                "Some outdated finishes",
                "Systems need minor repairs",
                "Visible wear and tear",
                "Some outdated appliances",
                "Inconsistent maintenance",
                "Basic or neglected landscaping",
            ],
        },
        ConditionCriteria {
            name: "poor",
            multiplier: 0.75,
            description: "Needs significant repairs",
            age_window: AgeWindow::within(20),
            required_features: &[],
            excluded_features: &[],
            maintenance_level: MaintenanceLevel::Poor,
            renovation_status: RenovationStatus::NeedsRepairs,
            criteria: &[
                "Built or renovated within last 20 years",
                "Dated finishes and materials",
                "Systems need major repairs",
                "Significant wear and damage",
                "Outdated or non-functioning appliances",
                "Poor maintenance history",
                "Minimal or no landscaping",
            ],
        },
        ConditionCriteria {
            name: "needs_work",
            multiplier: 0.60,
            description: "Major renovation required",
            age_window: AgeWindow::at_least(20),
            required_features: &[],
            excluded_features: &[],
            maintenance_level: MaintenanceLevel::VeryPoor,
            renovation_status: RenovationStatus::NeedsRenovation,
            criteria: &[
                "Over 20 years old with no recent updates",
                "Deteriorated finishes and materials",
                "Systems need complete replacement",
                "Extensive damage and wear",
                "Non-functioning or missing appliances",
                "Long-term neglect",
                "No landscaping",
            ],
        },
    ]
}

/// Read-only lookup tables keyed by identifier.
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    price_per_square_foot: HashMap<&'static str, f64>,
    conditions: HashMap<&'static str, ConditionCriteria>,
    feature_values: HashMap<&'static str, f64>,
    location_multipliers: HashMap<&'static str, f64>,
    default_base_price: f64,
    default_condition: ConditionCriteria,
}

impl ReferenceTables {
    pub fn standard() -> Self {
        Self {
            price_per_square_foot: PRICE_PER_SQUARE_FOOT.iter().copied().collect(),
            conditions: standard_conditions()
                .into_iter()
                .map(|criteria| (criteria.name, criteria))
                .collect(),
            feature_values: FEATURE_VALUES.iter().copied().collect(),
            location_multipliers: LOCATION_MULTIPLIERS.iter().copied().collect(),
            default_base_price: DEFAULT_BASE_PRICE,
            default_condition: good_condition(),
        }
    }

    /// Process-wide instance built on first use.
    pub fn shared() -> Arc<Self> {
        static TABLES: OnceLock<Arc<ReferenceTables>> = OnceLock::new();
        TABLES.get_or_init(|| Arc::new(Self::standard())).clone()
    }

    pub fn base_price(&self, property_type: &str) -> Option<f64> {
        self.price_per_square_foot.get(property_type).copied()
    }

    pub fn condition(&self, name: &str) -> Option<&ConditionCriteria> {
        self.conditions.get(name)
    }

    /// Rate of the default property type.
    pub fn default_base_price(&self) -> f64 {
        self.default_base_price
    }

    /// Criteria of the default condition.
    pub fn default_condition(&self) -> &ConditionCriteria {
        &self.default_condition
    }

    pub fn feature_value(&self, feature: &str) -> Option<f64> {
        self.feature_values.get(feature).copied()
    }

    pub fn location_multiplier(&self, location: &str) -> Option<f64> {
        self.location_multipliers.get(location).copied()
    }

    pub fn has_property_type(&self, property_type: &str) -> bool {
        self.price_per_square_foot.contains_key(property_type)
    }

    pub fn has_condition(&self, name: &str) -> bool {
        self.conditions.contains_key(name)
    }

    /// Property types and their rates, sorted by name.
    pub fn property_types(&self) -> Vec<(&'static str, f64)> {
        sorted_entries(&self.price_per_square_foot)
    }

    /// Conditions ordered from the highest multiplier to the lowest.
    pub fn conditions(&self) -> Vec<&ConditionCriteria> {
        let mut conditions: Vec<_> = self.conditions.values().collect();
        conditions.sort_by(|a, b| b.multiplier.total_cmp(&a.multiplier));
        conditions
    }

    pub fn features(&self) -> Vec<(&'static str, f64)> {
        sorted_entries(&self.feature_values)
    }

    pub fn location_multipliers(&self) -> Vec<(&'static str, f64)> {
        sorted_entries(&self.location_multipliers)
    }
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self::standard()
    }
}

fn sorted_entries(map: &HashMap<&'static str, f64>) -> Vec<(&'static str, f64)> {
    let mut entries: Vec<_> = map.iter().map(|(key, value)| (*key, *value)).collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
}
