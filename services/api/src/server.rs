use crate::cli::ServeArgs;
use crate::infra::{pipeline_settings, AppState, InMemoryObjectStore, LogFailureNotifier};
use crate::routes::with_billing_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use billing_gate::config::AppConfig;
use billing_gate::error::AppError;
use billing_gate::telemetry;
use billing_gate::workflows::billing::BillingPipelineService;
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

    let store = Arc::new(InMemoryObjectStore::default());
    let notifier = Arc::new(LogFailureNotifier);
    let service = Arc::new(BillingPipelineService::new(
        store,
        notifier,
        pipeline_settings(&config),
    ));

    let app = with_billing_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "billing validation pipeline ready");

    axum::serve(listener, app).await?;
    Ok(())
}
