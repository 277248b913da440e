use crate::infra::local_today;
use crate::routes::ValuationResponse;
use chrono::NaiveDate;
use clap::Args;
use property_valuation::error::AppError;
use property_valuation::valuation::{
    MaintenanceLevel, Property, ReferenceTables, RenovationStatus, Valuation, ValuationEngine,
};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct EstimateArgs {
    /// JSON property document to appraise; "-" reads standard input
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Valuation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Print the full valuation as JSON instead of the narrative
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_estimate(args: EstimateArgs) -> Result<(), AppError> {
    let EstimateArgs { input, as_of, json } = args;

    let today = as_of.unwrap_or_else(local_today);
    let property = load_property(&input)?;
    let valuation = ValuationEngine::default().appraise(&property, today)?;

    if json {
        let response = ValuationResponse::new(valuation, today);
        println!("{}", to_pretty_json(&response)?);
    } else {
        render_valuation(&property, &valuation, today);
    }

    Ok(())
}

pub(crate) fn run_tables() {
    render_tables(&ReferenceTables::shared());
}

fn load_property(input: &Path) -> Result<Property, AppError> {
    let raw = if input.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(input)?
    };

    Ok(serde_json::from_str(&raw)?)
}

fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|err| AppError::Internal(err.to_string()))
}

fn render_valuation(property: &Property, valuation: &Valuation, today: NaiveDate) {
    let label = if property.address.is_empty() {
        property.property_type.as_str()
    } else {
        property.address.as_str()
    };

    println!("Valuation for {} as of {}", label, today);
    println!("Estimated value: ${:.2}", valuation.value);
    println!("Confidence: {:.0}%", valuation.confidence * 100.0);
    println!(
        "Conformance score: {:.2} ({} issue(s))",
        valuation.conformance.total_score,
        valuation.conformance.issues.len()
    );
    println!();
    print!("{}", valuation.explanation);
}

fn render_tables(tables: &ReferenceTables) {
    println!("Property types (price per sq ft):");
    for (name, rate) in tables.property_types() {
        println!("  {:<20} ${:>7.2}", name, rate);
    }

    println!();
    println!("Conditions:");
    for criteria in tables.conditions() {
        println!(
            "  {:<12} x{:.2}  {}",
            criteria.name, criteria.multiplier, criteria.description
        );
        println!(
            "    expects maintenance '{}', renovation '{}'",
            criteria.maintenance_level, criteria.renovation_status
        );
        if !criteria.required_features.is_empty() {
            println!("    requires: {}", criteria.required_features.join(", "));
        }
        if !criteria.excluded_features.is_empty() {
            println!("    excludes: {}", criteria.excluded_features.join(", "));
        }
        for line in criteria.criteria {
            println!("    - {}", line);
        }
    }

    println!();
    println!(
        "Maintenance levels: {}",
        MaintenanceLevel::ordered().map(MaintenanceLevel::as_str).join(", ")
    );
    println!(
        "Renovation statuses: {}",
        RenovationStatus::ordered().map(RenovationStatus::as_str).join(", ")
    );

    println!();
    println!("Feature values:");
    for (name, value) in tables.features() {
        println!("  {:<20} ${:>10.2}", name, value);
    }

    println!();
    println!("Location multipliers (reserved, not applied):");
    for (name, multiplier) in tables.location_multipliers() {
        println!("  {:<20} x{:.2}", name, multiplier);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use property_valuation::valuation::ValuationError;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "property-valuation-{}-{}.json",
            name,
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).expect("temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        path
    }

    #[test]
    fn loads_property_document_from_file() {
        let path = write_temp(
            "load",
            r#"{
                "property_type": "condo",
                "bedrooms": 2,
                "bathrooms": 1,
                "square_footage": 900,
                "year_built": 2019,
                "condition": "good",
                "maintenance_level": "good",
                "renovation_status": "standard",
                "features": ["balcony", "balcony"]
            }"#,
        );

        let property = load_property(&path).expect("document parses");
        std::fs::remove_file(&path).ok();

        assert_eq!(property.property_type, "condo");
        assert_eq!(property.features.len(), 1);
        assert!(property.address.is_empty());
    }

    #[test]
    fn malformed_document_is_an_input_error() {
        let path = write_temp("malformed", r#"{"property_type": "condo""#);
        let result = load_property(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(AppError::Input(_))));
    }

    #[test]
    fn invalid_property_fails_the_estimate() {
        let path = write_temp(
            "invalid",
            r#"{
                "property_type": "castle",
                "bedrooms": 2,
                "bathrooms": 1,
                "square_footage": 900,
                "year_built": 2019,
                "condition": "good",
                "maintenance_level": "good",
                "renovation_status": "standard"
            }"#,
        );

        let result = run_estimate(EstimateArgs {
            input: path.clone(),
            as_of: NaiveDate::from_ymd_opt(2026, 5, 1),
            json: false,
        });
        std::fs::remove_file(&path).ok();

        match result {
            Err(AppError::Valuation(ValuationError::Invalid(invalid))) => {
                assert_eq!(invalid.field.as_str(), "property_type");
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    struct Unrenderable;

    impl Serialize for Unrenderable {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("cannot render"))
        }
    }

    #[test]
    fn output_serialization_failure_is_internal() {
        match to_pretty_json(&Unrenderable) {
            Err(AppError::Internal(detail)) => assert!(detail.contains("cannot render")),
            other => panic!("expected internal error, got {other:?}"),
        }
    }

    #[test]
    fn missing_input_is_an_io_error() {
        let result = load_property(Path::new("/nonexistent/property.json"));
        assert!(matches!(result, Err(AppError::Io(_))));
    }
}
