//! API error types and handling

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::error;
use serde_json::json;
use thiserror::Error;

use replacer_core::ReplacerError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Replacer(#[from] ReplacerError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    pub fn status_and_type(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Replacer(err) => match err {
                ReplacerError::FileNotFound { .. } => (StatusCode::NOT_FOUND, "file_not_found"),
                ReplacerError::DirectoryUnavailable { .. } => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "directory_unavailable")
                }
                ReplacerError::PatternError(_) => (StatusCode::BAD_REQUEST, "pattern_error"),
                ReplacerError::ReadError { .. } => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "read_error")
                }
                ReplacerError::WriteError { .. } => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "write_error")
                }
                ReplacerError::NotText { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "not_text"),
                ReplacerError::InvalidName(_) => (StatusCode::BAD_REQUEST, "invalid_name"),
                ReplacerError::ReportUnavailable { .. } => {
                    (StatusCode::NOT_FOUND, "report_unavailable")
                }
                ReplacerError::ReportReadError { .. } => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "report_read_error")
                }
                ReplacerError::ReportInvalid { .. } => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "report_invalid")
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status_and_type();
        error!("Request failed with {status}: {self}");

        let body = Json(json!({
            "status": "error",
            "error": {
                "type": error_type,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
