use crate::cli::ServeArgs;
use crate::infra::{local_today, AppState, ValuationState};
use crate::routes::with_valuation_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use property_valuation::config::AppConfig;
use property_valuation::error::AppError;
use property_valuation::telemetry;
use property_valuation::valuation::{ReferenceTables, ValuationEngine};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let valuation_state = ValuationState {
        engine: ValuationEngine::new(ReferenceTables::shared()),
        request_timeout: config.server.request_timeout,
        clock: local_today,
    };

    let app = with_valuation_routes(valuation_state)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        timeout_ms = config.server.request_timeout.as_millis() as u64,
        "property valuation service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
