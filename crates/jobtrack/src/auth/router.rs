use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use validator::Validate;

use super::domain::{LoginRequest, SignupRequest};
use super::repository::UserRepository;
use super::service::AuthService;
use crate::error::AppError;

/// Router exposing signup, login, and logout.
pub fn auth_router<U>(service: Arc<AuthService<U>>) -> Router
where
    U: UserRepository + 'static,
{
    Router::new()
        .route("/users/signup", post(signup_handler::<U>))
        .route("/users/login", post(login_handler::<U>))
        .route("/users/logout", post(logout_handler::<U>))
        .with_state(service)
}

pub(crate) async fn signup_handler<U>(
    State(service): State<Arc<AuthService<U>>>,
    Json(payload): Json<SignupRequest>,
) -> Result<Response, AppError>
where
    U: UserRepository + 'static,
{
    payload.validate()?;
    let user = service.signup(payload)?;
    let body = json!({ "message": "회원가입이 완료되었습니다.", "user": user });
    Ok((StatusCode::CREATED, Json(body)).into_response())
}

pub(crate) async fn login_handler<U>(
    State(service): State<Arc<AuthService<U>>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, AppError>
where
    U: UserRepository + 'static,
{
    payload.validate()?;
    let (user, token) = service.login(payload)?;
    let body = json!({ "message": "로그인되었습니다.", "user": user });
    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, service.sessions().set_cookie(&token))],
        Json(body),
    )
        .into_response())
}

pub(crate) async fn logout_handler<U>(
    State(service): State<Arc<AuthService<U>>>,
    headers: HeaderMap,
) -> Result<Response, AppError>
where
    U: UserRepository + 'static,
{
    if let Some(token) = service.sessions().token_from(&headers) {
        service.logout(&token);
    }
    let body = json!({ "message": "로그아웃되었습니다." });
    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, service.sessions().clear_cookie())],
        Json(body),
    )
        .into_response())
}
