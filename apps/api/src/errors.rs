use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant renders as `{"error": "<message>"}`; client-facing variants
/// already carry their full message, server-side ones get it from `context`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    UnprocessableEntity(String),

    #[error("{0}")]
    Llm(String),

    #[error("{0}")]
    Storage(#[from] StoreError),

    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Prefixes server-side failures with the operation that hit them,
    /// e.g. "Failed to save answer: I/O error: ...". Client-facing variants
    /// pass through untouched.
    pub fn context(self, operation: &'static str) -> Self {
        match self {
            AppError::Storage(e) => AppError::Internal(anyhow::anyhow!("{operation}: {e}")),
            AppError::Internal(e) => AppError::Internal(anyhow::anyhow!("{operation}: {e:#}")),
            other => other,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Llm(_) => StatusCode::BAD_GATEWAY,
            AppError::Storage(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        match &self {
            AppError::Llm(_) => tracing::error!("LLM error: {message}"),
            AppError::Storage(_) | AppError::Internal(_) => {
                tracing::error!("Internal error: {message}")
            }
            _ => tracing::debug!("Request rejected ({status}): {message}"),
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}
