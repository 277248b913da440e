use crate::infra::{AppState, ValuationState};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::NaiveDate;
use property_valuation::error::AppError;
use property_valuation::valuation::{
    AdjustmentFactor, MaintenanceLevel, Property, RenovationStatus, Valuation,
    ValuationBreakdown, ValuationError, ValidationIssue,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use tracing::{error, info, warn};

/// The as-of date is taken from the server clock, never from the caller.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ValuationRequest {
    pub(crate) property: Property,
}

#[derive(Debug, Serialize)]
pub(crate) struct ValuationResponse {
    pub(crate) value: f64,
    pub(crate) confidence: f64,
    pub(crate) explanation: String,
    pub(crate) as_of: NaiveDate,
    pub(crate) conformance_score: f64,
    pub(crate) issues: Vec<ValidationIssue>,
    pub(crate) adjustments: BTreeMap<AdjustmentFactor, f64>,
    pub(crate) breakdown: ValuationBreakdown,
}

impl ValuationResponse {
    pub(crate) fn new(valuation: Valuation, as_of: NaiveDate) -> Self {
        let Valuation {
            value,
            confidence,
            explanation,
            conformance,
            breakdown,
        } = valuation;

        Self {
            value,
            confidence,
            explanation,
            as_of,
            conformance_score: conformance.total_score,
            issues: conformance.issues,
            adjustments: conformance.adjustments,
            breakdown,
        }
    }
}

pub(crate) fn with_valuation_routes(state: ValuationState) -> Router {
    Router::new()
        .route("/api/v1", get(api_description))
        .route("/api/v1/valuations", post(valuation_endpoint))
        .with_state(state)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn api_description(
    State(state): State<ValuationState>,
) -> Json<serde_json::Value> {
    let tables = state.engine.tables();
    let property_types: Vec<_> = tables
        .property_types()
        .into_iter()
        .map(|(name, rate)| json!({ "name": name, "price_per_square_foot": rate }))
        .collect();
    let conditions: Vec<_> = tables
        .conditions()
        .into_iter()
        .map(|criteria| {
            json!({
                "name": criteria.name,
                "multiplier": criteria.multiplier,
                "description": criteria.description,
                "criteria": criteria.criteria,
            })
        })
        .collect();
    let maintenance_levels: Vec<_> = MaintenanceLevel::ordered()
        .into_iter()
        .map(MaintenanceLevel::as_str)
        .collect();
    let renovation_statuses: Vec<_> = RenovationStatus::ordered()
        .into_iter()
        .map(RenovationStatus::as_str)
        .collect();
    let features: Vec<_> = tables
        .features()
        .into_iter()
        .map(|(name, _)| name)
        .collect();

    Json(json!({
        "name": "Property Valuation API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "valuate": {
                "method": "POST",
                "path": "/api/v1/valuations",
                "description": "Estimate a property's value, confidence, and explanation",
                "body": {
                    "property": "Property (see property_types, conditions, maintenance_levels, renovation_statuses)",
                },
            },
            "health": { "method": "GET", "path": "/health" },
            "ready": { "method": "GET", "path": "/ready" },
            "metrics": { "method": "GET", "path": "/metrics" },
        },
        "property_types": property_types,
        "conditions": conditions,
        "maintenance_levels": maintenance_levels,
        "renovation_statuses": renovation_statuses,
        "features": features,
    }))
}

pub(crate) async fn valuation_endpoint(
    State(state): State<ValuationState>,
    body: Bytes,
) -> Result<Json<ValuationResponse>, AppError> {
    let ValuationRequest { property } =
        serde_json::from_slice::<ValuationRequest>(&body).map_err(|err| {
            warn!(%err, "malformed valuation request");
            AppError::Input(err)
        })?;

    let engine = state.engine.clone();
    let clock = state.clock;
    let task = tokio::task::spawn_blocking(move || {
        let today = clock();
        let outcome = engine.appraise(&property, today);
        (property, today, outcome)
    });

    let deadline = tokio::time::timeout(state.request_timeout, task);
    let (property, today, outcome) = match deadline.await {
        Ok(Ok(result)) => result,
        Ok(Err(join_error)) => {
            error!(%join_error, "valuation task failed");
            return Err(AppError::Internal(join_error.to_string()));
        }
        Err(_) => {
            warn!(
                timeout_ms = state.request_timeout.as_millis() as u64,
                "valuation deadline exceeded"
            );
            return Err(AppError::DeadlineExceeded);
        }
    };

    match outcome {
        Ok(valuation) => {
            info!(
                property_type = %property.property_type,
                condition = %property.condition,
                value = valuation.value,
                confidence = valuation.confidence,
                issues = valuation.conformance.issues.len(),
                "property valuated"
            );
            Ok(Json(ValuationResponse::new(valuation, today)))
        }
        Err(ValuationError::Invalid(invalid)) => {
            warn!(field = %invalid.field, "property rejected");
            Err(ValuationError::Invalid(invalid).into())
        }
    }
}
