use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::documents::ExtractError;
use crate::grading::models::GradingError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// 4xx variants echo their message back as `{"detail": ...}`. 5xx variants log
/// the full error and return a generic message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Unreadable document: {0}")]
    UnreadableDocument(String),

    #[error("Upload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Upstream request failed: {0}")]
    UpstreamRequest(String),

    #[error("Malformed upstream response: {0}")]
    MalformedUpstreamResponse(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<GradingError> for AppError {
    fn from(err: GradingError) -> Self {
        match err {
            GradingError::InvalidInput(msg) => AppError::InvalidInput(msg),
        }
    }
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::UnsupportedFileType(mime) => AppError::UnsupportedFileType(mime),
            e @ ExtractError::Unreadable { .. } => AppError::UnreadableDocument(e.to_string()),
            ExtractError::Task(e) => AppError::Internal(e.into()),
        }
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MalformedResponse(msg) => AppError::MalformedUpstreamResponse(msg),
            e @ (LlmError::Request(_) | LlmError::Status { .. }) => {
                AppError::UpstreamRequest(e.to_string())
            }
        }
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge(err.body_text());
        }
        AppError::InvalidInput(format!("Malformed multipart body: {}", err.body_text()))
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::InvalidInput(format!(
            "Expected a multipart/form-data request: {}",
            rejection.body_text()
        ))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::UnsupportedFileType(mime) => (
                StatusCode::BAD_REQUEST,
                format!("Unsupported file type: {mime}"),
            ),
            AppError::UnreadableDocument(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg.clone()),
            AppError::UpstreamRequest(msg) => {
                tracing::error!("Upstream request error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The grading service is temporarily unavailable".to_string(),
                )
            }
            AppError::MalformedUpstreamResponse(msg) => {
                tracing::error!("Malformed upstream response: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The grading service returned an unexpected response".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        (status, Json(json!({ "detail": message }))).into_response()
    }
}
