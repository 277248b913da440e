use chrono::{Local, NaiveDate};
use metrics_exporter_prometheus::PrometheusHandle;
use property_valuation::valuation::ValuationEngine;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

/// Source of the as-of date for server-side valuations.
pub(crate) type Clock = fn() -> NaiveDate;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Shared by valuation handlers; the engine's tables are read-only.
#[derive(Clone)]
pub(crate) struct ValuationState {
    pub(crate) engine: ValuationEngine,
    pub(crate) request_timeout: Duration,
    pub(crate) clock: Clock,
}

pub(crate) fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
