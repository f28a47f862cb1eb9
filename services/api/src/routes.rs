use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use axum::Router;
use serde_json::json;
use std::sync::Arc;

use jobtrack::auth::{auth_router, AuthService, UserRepository};
use jobtrack::tracker::applications::{application_router, ApplicationRepository, ApplicationService};
use jobtrack::tracker::interviews::{interview_router, InterviewRepository, InterviewService};
use jobtrack::tracker::job_postings::{job_posting_router, JobPostingRepository, JobPostingService};

/// Composes the resource routers with the operational endpoints.
pub(crate) fn app_router<U, P, A, I>(
    auth: Arc<AuthService<U>>,
    postings: Arc<JobPostingService<P>>,
    applications: Arc<ApplicationService<A>>,
    interviews: Arc<InterviewService<I>>,
) -> Router
where
    U: UserRepository + 'static,
    P: JobPostingRepository + 'static,
    A: ApplicationRepository + 'static,
    I: InterviewRepository + 'static,
{
    auth_router(auth)
        .merge(job_posting_router(postings))
        .merge(application_router(applications))
        .merge(interview_router(interviews))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{
        InMemoryApplicationRepository, InMemoryInterviewRepository, InMemoryJobPostingRepository,
        InMemoryUserRepository,
    };
    use axum::body::Body;
    use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
    use axum::http::Request;
    use axum_prometheus::PrometheusMetricLayer;
    use jobtrack::auth::SessionManager;
    use metrics_exporter_prometheus::PrometheusHandle;
    use std::sync::atomic::AtomicBool;
    use std::sync::OnceLock;
    use tower::ServiceExt;

    // The recorder behind the prometheus pair is process-global and can only
    // be installed once, so every test shares a single handle.
    fn metrics_handle() -> &'static PrometheusHandle {
        static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();
        HANDLE.get_or_init(|| PrometheusMetricLayer::pair().1)
    }

    fn test_app(ready: bool) -> Router {
        let app_state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(metrics_handle().clone()),
        };
        let sessions = Arc::new(SessionManager::new("jobtrack_session"));
        let auth = Arc::new(AuthService::new(
            Arc::new(InMemoryUserRepository::default()),
            sessions.clone(),
        ));
        let postings = Arc::new(JobPostingService::new(Arc::new(
            InMemoryJobPostingRepository::default(),
        )));
        let applications = Arc::new(ApplicationService::new(Arc::new(
            InMemoryApplicationRepository::default(),
        )));
        let interviews = Arc::new(InterviewService::new(Arc::new(
            InMemoryInterviewRepository::default(),
        )));

        app_router(auth, postings, applications, interviews)
            .layer(Extension(sessions))
            .layer(Extension(app_state))
    }

    fn json_request(method: &str, uri: &str, cookie: Option<&str>, body: serde_json::Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        builder
            .body(Body::from(body.to_string()))
            .expect("request builds")
    }

    async fn read_json_body(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 65536)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let app = test_app(true);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn readiness_reflects_the_flag() {
        let app = test_app(false);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/ready")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = read_json_body(response).await;
        assert_eq!(body["status"], "initializing");
    }

    #[tokio::test]
    async fn metrics_endpoint_renders_prometheus_text() {
        let app = test_app(true);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/metrics")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("text/plain; version=0.0.4")
        );
    }

    #[tokio::test]
    async fn signup_login_and_create_posting_flow() {
        let app = test_app(true);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/users/signup",
                None,
                serde_json::json!({
                    "name": "김지원",
                    "email": "jiwon@example.com",
                    "password": "secret-pw-1"
                }),
            ))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/users/login",
                None,
                serde_json::json!({
                    "email": "jiwon@example.com",
                    "password": "secret-pw-1"
                }),
            ))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response
            .headers()
            .get(SET_COOKIE)
            .and_then(|value| value.to_str().ok())
            .expect("session cookie set")
            .to_string();
        let cookie = set_cookie
            .split(';')
            .next()
            .expect("cookie pair")
            .to_string();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/job-postings",
                Some(&cookie),
                serde_json::json!({
                    "title": "백엔드 엔지니어",
                    "companyName": "테크컴퍼니",
                    "dueDate": "2025-03-31"
                }),
            ))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = read_json_body(response).await;
        assert_eq!(body["data"]["companyName"], "테크컴퍼니");

        let response = app
            .oneshot(json_request(
                "GET",
                "/job-postings",
                Some(&cookie),
                serde_json::json!({}),
            ))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn resource_routes_reject_anonymous_requests() {
        let app = test_app(true);
        let response = app
            .oneshot(json_request(
                "GET",
                "/interviews",
                None,
                serde_json::json!({}),
            ))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
