use crate::cli::ServeArgs;
use crate::infra::{load_served_dataset, AppState};
use crate::routes::with_operational_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use listing_audit::config::AppConfig;
use listing_audit::error::AppError;
use listing_audit::router::AuditState;
use listing_audit::telemetry;
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

    let dataset = load_served_dataset(&config, args.listings.take())?;
    let audit_state = Arc::new(AuditState::new(
        Arc::new(dataset),
        config.chart,
        config.dataset.snapshot_date,
    ));

    let app = with_operational_routes(audit_state)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "listing audit service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
