use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryAssignmentStore, InMemoryDispatchPublisher};
use crate::routes::with_assignment_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use outreach_ai::config::AppConfig;
use outreach_ai::error::AppError;
use outreach_ai::telemetry;
use outreach_ai::workflows::campaigns::assignment::CampaignAssignmentService;
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

    let store = Arc::new(InMemoryAssignmentStore::seeded());
    let dispatch = Arc::new(InMemoryDispatchPublisher::default());
    let assignment_service = Arc::new(CampaignAssignmentService::new(
        store,
        dispatch,
        config.assignment.verdict_ttl(),
    ));

    let app = with_assignment_routes(assignment_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "campaign outreach orchestrator ready");

    axum::serve(listener, app).await?;
    Ok(())
}
