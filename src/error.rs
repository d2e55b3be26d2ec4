use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::error;

use crate::models::storage::StoreError;

// Error body shape: the message appears both top-level and nested under
// `error`, as a list for validation failures and a single string otherwise.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
    pub message: Value,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub message: Value,
    pub status: u16,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(Vec<String>),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound("Book not found".to_string()),
            StoreError::Conflict(isbn) => {
                ApiError::Conflict(format!("Book with isbn '{}' already exists", isbn))
            }
            StoreError::Postgres(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(violations) => (StatusCode::BAD_REQUEST, json!(violations)),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!(msg)),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, json!(msg)),
            ApiError::Internal(detail) => {
                error!("internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!("Internal server error"),
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail {
                message: message.clone(),
                status: status.as_u16(),
            },
            message,
        };

        (status, Json(body)).into_response()
    }
}
