use crate::config::ConfigError;
use crate::store::RepositoryError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use std::fmt;
use validator::ValidationErrors;

/// Library-wide error type; every HTTP handler returns `Result<_, AppError>`
/// and the `IntoResponse` impl maps each variant to the documented status code.
#[derive(Debug)]
pub enum AppError {
    Validation(ValidationErrors),
    Unauthenticated,
    InvalidCredentials,
    NotFound,
    DuplicateEmail,
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Storage(RepositoryError),
    Hash(bcrypt::BcryptError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(_) => write!(f, "validation failed"),
            AppError::Unauthenticated => write!(f, "authentication required"),
            AppError::InvalidCredentials => write!(f, "invalid credentials"),
            AppError::NotFound => write!(f, "record not found"),
            AppError::DuplicateEmail => write!(f, "email already registered"),
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Storage(err) => write!(f, "storage error: {}", err),
            AppError::Hash(err) => write!(f, "password hashing error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Validation(err) => Some(err),
            AppError::Unauthenticated
            | AppError::InvalidCredentials
            | AppError::NotFound
            | AppError::DuplicateEmail => None,
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Storage(err) => Some(err),
            AppError::Hash(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(errors) => (StatusCode::BAD_REQUEST, validation_body(errors)),
            AppError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "로그인이 필요합니다." }),
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "이메일 또는 비밀번호가 올바르지 않습니다." }),
            ),
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                json!({ "error": "요청한 리소스를 찾을 수 없습니다." }),
            ),
            AppError::DuplicateEmail => (
                StatusCode::CONFLICT,
                json!({ "error": "이미 가입된 이메일입니다." }),
            ),
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Storage(_)
            | AppError::Hash(_) => {
                tracing::error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "서버 오류가 발생했습니다." }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Render `ValidationErrors` as the `{fieldErrors, formErrors}` body the
/// client-side message extractor understands.
pub fn validation_body(errors: &ValidationErrors) -> Value {
    let mut fields = serde_json::Map::new();
    for (field, entries) in errors.field_errors() {
        let messages: Vec<Value> = entries
            .iter()
            .map(|error| {
                error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| error.code.to_string())
            })
            .map(Value::String)
            .collect();
        fields.insert(field.to_string(), Value::Array(messages));
    }

    json!({ "fieldErrors": Value::Object(fields), "formErrors": [] })
}

impl From<ValidationErrors> for AppError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

impl From<RepositoryError> for AppError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound => Self::NotFound,
            other => Self::Storage(other),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(value: bcrypt::BcryptError) -> Self {
        Self::Hash(value)
    }
}
