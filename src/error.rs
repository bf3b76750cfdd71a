//! Error handling module
//!
//! Centralized error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::{AccountId, DomainError};
use crate::store::StoreError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Validation(#[from] DomainError),

    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    #[error("Insufficient limit: transaction would exceed the credit limit of account {0}")]
    InsufficientLimit(AccountId),

    // Server errors (5xx)
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::AccountNotFound(_) => StatusCode::NOT_FOUND,
            AppError::InsufficientLimit(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (error, error_code, details) = match &self {
            // 400 Bad Request
            AppError::InvalidRequest(msg) => {
                (self.to_string(), "invalid_request", Some(msg.clone()))
            }
            AppError::Validation(err) => (self.to_string(), err.code(), None),

            // 404 Not Found
            AppError::AccountNotFound(id) => {
                (self.to_string(), "account_not_found", Some(id.to_string()))
            }

            // 422 Unprocessable Entity
            AppError::InsufficientLimit(_) => (self.to_string(), "insufficient_limit", None),

            // 500 Internal Server Error, details stay in the logs
            AppError::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                ("Internal server error".to_string(), "storage_error", None)
            }
        };

        let body = ErrorResponse {
            error,
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}
