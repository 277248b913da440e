use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Property attributes submitted for appraisal.
///
/// Enumerated attributes stay textual and absent fields take zero values,
/// so both reach the validator instead of failing during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Property {
    pub address: String,
    pub property_type: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub square_footage: i32,
    pub year_built: i32,
    pub condition: String,
    pub maintenance_level: String,
    pub renovation_status: String,
    pub features: BTreeSet<String>,
    pub location: Location,
}

impl Property {
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.contains(feature)
    }
}

/// Coordinates carried with a property. Not consumed by the pricing formula.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceLevel {
    Excellent,
    VeryGood,
    Good,
    Fair,
    Poor,
    VeryPoor,
}

impl MaintenanceLevel {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Excellent,
            Self::VeryGood,
            Self::Good,
            Self::Fair,
            Self::Poor,
            Self::VeryPoor,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::VeryGood => "very_good",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
            Self::VeryPoor => "very_poor",
        }
    }
}

impl FromStr for MaintenanceLevel {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ordered()
            .into_iter()
            .find(|level| level.as_str() == value)
            .ok_or_else(|| UnknownVariant(value.to_string()))
    }
}

impl fmt::Display for MaintenanceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenovationStatus {
    Recent,
    Standard,
    NeedsUpdates,
    NeedsRepairs,
    NeedsRenovation,
}

impl RenovationStatus {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Recent,
            Self::Standard,
            Self::NeedsUpdates,
            Self::NeedsRepairs,
            Self::NeedsRenovation,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::Standard => "standard",
            Self::NeedsUpdates => "needs_updates",
            Self::NeedsRepairs => "needs_repairs",
            Self::NeedsRenovation => "needs_renovation",
        }
    }
}

impl FromStr for RenovationStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ordered()
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownVariant(value.to_string()))
    }
}

impl fmt::Display for RenovationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value '{0}'")]
pub struct UnknownVariant(pub String);
