use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Raised by the limiter and the daily quota when a caller is over its allowance.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LimitError {
    #[error("{0}")]
    TooManyRequests(String),
}

impl LimitError {
    pub fn message(&self) -> &str {
        match self {
            LimitError::TooManyRequests(message) => message,
        }
    }
}

impl IntoResponse for LimitError {
    fn into_response(self) -> Response {
        detail_response(StatusCode::TOO_MANY_REQUESTS, self.message())
    }
}

// Handler level errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Limited(#[from] LimitError),

    #[error("Authentication required")]
    Unauthorized,

    #[error("{0}")]
    Validation(String),

    #[error("{}", .0.body_text())]
    Json(#[from] JsonRejection),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Limited(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Json(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Limited(err) => err.into_response(),
            other => detail_response(other.status_code(), &other.to_string()),
        }
    }
}

fn detail_response(status: StatusCode, detail: &str) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}
