// src/error.rs
use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::models::ProductId;
use crate::repository::RepositoryError;
use crate::validation::ValidationError;

/// Errors surfaced by inventory operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// One or more field invariants were violated; nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("product {0} not found")]
    NotFound(ProductId),

    /// The repository failed. Passed through unchanged.
    #[error("storage failure: {0}")]
    Storage(RepositoryError),

    /// The request could not be read at all (malformed JSON, wrong content
    /// type, non-numeric id).
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => AppError::NotFound(id),
            other => AppError::Storage(other),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Rejected { status, .. } => *status,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::Validation(err) => json!({
                "error": "validation_error",
                "message": err.to_string(),
                "violations": err.violations,
            }),
            AppError::NotFound(id) => json!({
                "error": "not_found",
                "message": format!("Product {id} not found"),
                "id": id,
            }),
            AppError::Storage(err) => {
                error!(error = %err, "Storage failure");
                json!({
                    "error": "storage_error",
                    "message": "Database error occurred",
                })
            }
            AppError::Rejected { message, .. } => json!({
                "error": "invalid_request",
                "message": message,
            }),
        };

        (status, Json(body)).into_response()
    }
}
