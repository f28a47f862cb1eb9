use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use super::domain::{JobPostingDraft, JobPostingPatch};
use super::repository::JobPostingRepository;
use super::service::JobPostingService;
use crate::auth::Session;
use crate::error::AppError;

/// Router exposing the job posting CRUD surface. The detail route is public
/// so a posting link can be shared; everything else needs a session.
pub fn job_posting_router<R>(service: Arc<JobPostingService<R>>) -> Router
where
    R: JobPostingRepository + 'static,
{
    Router::new()
        .route(
            "/job-postings",
            get(list_handler::<R>).post(create_handler::<R>),
        )
        .route(
            "/job-postings/:id",
            get(detail_handler::<R>)
                .patch(update_handler::<R>)
                .delete(delete_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<JobPostingService<R>>>,
    session: Session,
) -> Result<Response, AppError>
where
    R: JobPostingRepository + 'static,
{
    let rows = service.list(&session.0.id)?;
    Ok(Json(json!({ "data": rows })).into_response())
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<JobPostingService<R>>>,
    session: Session,
    Json(payload): Json<JobPostingDraft>,
) -> Result<Response, AppError>
where
    R: JobPostingRepository + 'static,
{
    let input = payload.validate()?;
    let row = service.create(&session.0.id, input)?;
    Ok((StatusCode::CREATED, Json(json!({ "data": row }))).into_response())
}

pub(crate) async fn detail_handler<R>(
    State(service): State<Arc<JobPostingService<R>>>,
    Path(id): Path<String>,
) -> Result<Response, AppError>
where
    R: JobPostingRepository + 'static,
{
    let row = service.get_public(&id)?;
    Ok(Json(json!({ "data": row })).into_response())
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<JobPostingService<R>>>,
    session: Session,
    Path(id): Path<String>,
    Json(payload): Json<JobPostingPatch>,
) -> Result<Response, AppError>
where
    R: JobPostingRepository + 'static,
{
    let changes = payload.validate()?;
    let row = service.update(&session.0.id, &id, changes)?;
    Ok(Json(json!({ "data": row })).into_response())
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<JobPostingService<R>>>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Response, AppError>
where
    R: JobPostingRepository + 'static,
{
    service.delete(&session.0.id, &id)?;
    Ok(Json(json!({ "success": true })).into_response())
}
