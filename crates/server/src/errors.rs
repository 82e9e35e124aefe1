use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use deadpool_sqlite::{InteractError, PoolError};
use serde_json::json;
use shared::{api::InvalidDuration, log::LogQueryError, model::StoreError};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("user not found")]
    UserNotFound,
    #[error("{0}")]
    InvalidDateRange(LogQueryError),
    #[error("{0}")]
    InvalidDuration(#[from] InvalidDuration),
    #[error("malformed request body: {0}")]
    MalformedPayload(String),
    #[error("database unavailable: {0}")]
    StoreUnavailable(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::UserNotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidDateRange(_)
            | ApiError::InvalidDuration(_)
            | ApiError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Render ApiError into a response. Every error path produces a response;
// nothing is logged-and-dropped
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<LogQueryError> for ApiError {
    fn from(err: LogQueryError) -> Self {
        ApiError::InvalidDateRange(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UserNotFound(_) => ApiError::UserNotFound,
            // Duplicates are suppressed at the new-user route; one reaching
            // here is a handler bug
            e @ StoreError::DuplicateUsername(_) => ApiError::Internal(e.to_string()),
            StoreError::Sqlite(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<InteractError> for ApiError {
    fn from(err: InteractError) -> Self {
        ApiError::StoreUnavailable(err.to_string())
    }
}

impl From<PoolError> for ApiError {
    fn from(err: PoolError) -> Self {
        ApiError::StoreUnavailable(err.to_string())
    }
}
