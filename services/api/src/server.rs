use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryApplicationRepository, InMemoryInterviewRepository,
    InMemoryJobPostingRepository, InMemoryUserRepository,
};
use crate::routes::app_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use jobtrack::auth::{AuthService, SessionManager};
use jobtrack::config::AppConfig;
use jobtrack::error::AppError;
use jobtrack::telemetry;
use jobtrack::tracker::applications::ApplicationService;
use jobtrack::tracker::interviews::InterviewService;
use jobtrack::tracker::job_postings::JobPostingService;
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

    let sessions = Arc::new(SessionManager::new(config.session.cookie_name.clone()));
    let auth_service = Arc::new(AuthService::new(
        Arc::new(InMemoryUserRepository::default()),
        sessions.clone(),
    ));
    let posting_service = Arc::new(JobPostingService::new(Arc::new(
        InMemoryJobPostingRepository::default(),
    )));
    let application_service = Arc::new(ApplicationService::new(Arc::new(
        InMemoryApplicationRepository::default(),
    )));
    let interview_service = Arc::new(InterviewService::new(Arc::new(
        InMemoryInterviewRepository::default(),
    )));

    let app = app_router(
        auth_service,
        posting_service,
        application_service,
        interview_service,
    )
    .layer(Extension(sessions))
    .layer(Extension(app_state))
    .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "job tracker ready");

    axum::serve(listener, app).await?;
    Ok(())
}
