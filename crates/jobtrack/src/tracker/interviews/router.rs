use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use super::domain::{InterviewDraft, InterviewPatch};
use super::repository::InterviewRepository;
use super::service::InterviewService;
use crate::auth::Session;
use crate::error::AppError;

/// Router exposing the interview CRUD surface; every route needs a session.
pub fn interview_router<R>(service: Arc<InterviewService<R>>) -> Router
where
    R: InterviewRepository + 'static,
{
    Router::new()
        .route(
            "/interviews",
            get(list_handler::<R>).post(create_handler::<R>),
        )
        .route(
            "/interviews/:id",
            get(detail_handler::<R>)
                .patch(update_handler::<R>)
                .delete(delete_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<InterviewService<R>>>,
    session: Session,
) -> Result<Response, AppError>
where
    R: InterviewRepository + 'static,
{
    let rows = service.list(&session.0.id)?;
    Ok(Json(json!({ "data": rows })).into_response())
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<InterviewService<R>>>,
    session: Session,
    Json(payload): Json<InterviewDraft>,
) -> Result<Response, AppError>
where
    R: InterviewRepository + 'static,
{
    let input = payload.validate()?;
    let row = service.create(&session.0.id, input)?;
    Ok((StatusCode::CREATED, Json(json!({ "data": row }))).into_response())
}

pub(crate) async fn detail_handler<R>(
    State(service): State<Arc<InterviewService<R>>>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Response, AppError>
where
    R: InterviewRepository + 'static,
{
    let row = service.get(&session.0.id, &id)?;
    Ok(Json(json!({ "data": row })).into_response())
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<InterviewService<R>>>,
    session: Session,
    Path(id): Path<String>,
    Json(payload): Json<InterviewPatch>,
) -> Result<Response, AppError>
where
    R: InterviewRepository + 'static,
{
    let changes = payload.validate()?;
    let row = service.update(&session.0.id, &id, changes)?;
    Ok(Json(json!({ "data": row })).into_response())
}

/// Deletion acknowledges with a bare boolean payload.
pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<InterviewService<R>>>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Response, AppError>
where
    R: InterviewRepository + 'static,
{
    service.delete(&session.0.id, &id)?;
    Ok(Json(json!({ "data": true })).into_response())
}
