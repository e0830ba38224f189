//! Error types and error handling for the application
//!
//! This module defines the batch-level error type that is converted to HTTP
//! responses. Item-level failures never reach this type; they are folded into
//! the sync report (see `crate::sync::error`).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Message returned for every internal failure. The cause is only logged.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Application-level error types
///
/// Each variant implements automatic conversion to HTTP responses via `IntoResponse`.
#[derive(Error, Debug)]
pub enum AppError {
    /// The request payload is malformed (missing `items`, oversized batch, bad JSON)
    #[error("{0}")]
    Validation(String),

    /// Failure outside the per-item isolation boundary
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// HTTP status this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_message = match &self {
            AppError::Validation(message) => message.clone(),
            AppError::Internal(cause) => {
                tracing::error!(error = %cause, "Batch failed outside item isolation");
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
