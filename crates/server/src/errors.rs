use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::ServiceError;
use tracing::{error, warn};

/// Terminal error for a request, rendered as `{"error": message}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        let status = match &e {
            ServiceError::BookNotFound | ServiceError::ReviewNotFound | ServiceError::UserNotFound => StatusCode::NOT_FOUND,
            ServiceError::AlreadyExists | ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::InvalidCredentials | ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServiceError::Seed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(code = e.code(), err = %e, "service error");
        } else {
            warn!(code = e.code(), err = %e, "request rejected");
        }
        Self::new(status, e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(status = rejection.status().as_u16(), err = %rejection.body_text(), "request body rejected");
        Self::bad_request(format!("Invalid JSON body: {}", rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

/// `Json` extractor whose rejections render as `{"error": ...}` with status 400.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// Presence check for optional JSON fields; blank strings count as missing.
pub fn require(field: Option<String>, message: &str) -> Result<String, ApiError> {
    match field {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ServiceError::Validation(message.to_string()).into()),
    }
}
