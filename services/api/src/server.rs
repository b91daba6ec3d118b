use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_observatory_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use evasao::config::AppConfig;
use evasao::error::AppError;
use evasao::telemetry;
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
    let data_config = Arc::new(config.data.clone());

    let app = with_observatory_routes()
        .layer(Extension(app_state))
        .layer(Extension(data_config))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        default_area = %config.data.default_area,
        candidates = config.data.candidate_paths.len(),
        "evasion observatory ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
