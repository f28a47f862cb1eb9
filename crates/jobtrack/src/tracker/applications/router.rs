use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use super::domain::{ApplicationDraft, ApplicationPatch};
use super::repository::ApplicationRepository;
use super::service::ApplicationService;
use crate::auth::Session;
use crate::error::AppError;

/// Router exposing the application CRUD surface; every route needs a session.
pub fn application_router<R>(service: Arc<ApplicationService<R>>) -> Router
where
    R: ApplicationRepository + 'static,
{
    Router::new()
        .route(
            "/applications",
            get(list_handler::<R>).post(create_handler::<R>),
        )
        .route(
            "/applications/:id",
            get(detail_handler::<R>)
                .patch(update_handler::<R>)
                .delete(delete_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<ApplicationService<R>>>,
    session: Session,
) -> Result<Response, AppError>
where
    R: ApplicationRepository + 'static,
{
    let rows = service.list(&session.0.id)?;
    Ok(Json(json!({ "data": rows })).into_response())
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<ApplicationService<R>>>,
    session: Session,
    Json(payload): Json<ApplicationDraft>,
) -> Result<Response, AppError>
where
    R: ApplicationRepository + 'static,
{
    let input = payload.validate()?;
    let row = service.create(&session.0.id, input)?;
    Ok((StatusCode::CREATED, Json(json!({ "data": row }))).into_response())
}

pub(crate) async fn detail_handler<R>(
    State(service): State<Arc<ApplicationService<R>>>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Response, AppError>
where
    R: ApplicationRepository + 'static,
{
    let row = service.get(&session.0.id, &id)?;
    Ok(Json(json!({ "data": row })).into_response())
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<ApplicationService<R>>>,
    session: Session,
    Path(id): Path<String>,
    Json(payload): Json<ApplicationPatch>,
) -> Result<Response, AppError>
where
    R: ApplicationRepository + 'static,
{
    let changes = payload.validate()?;
    let row = service.update(&session.0.id, &id, changes)?;
    Ok(Json(json!({ "data": row })).into_response())
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<ApplicationService<R>>>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Response, AppError>
where
    R: ApplicationRepository + 'static,
{
    service.delete(&session.0.id, &id)?;
    Ok(Json(json!({ "ok": true })).into_response())
}
