use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("travel dataset not found: {}", .0.display())]
    DataNotFound(PathBuf),

    #[error("Dataset error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON")]
    InvalidJson,

    #[error("{field} must be among {allowed}")]
    Validation { field: &'static str, allowed: String },

    #[error("Computation error: {0}")]
    Computation(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Builds a validation error listing the allowed values of `field`
    pub fn validation<T: std::fmt::Debug>(field: &'static str, allowed: &[T]) -> Self {
        AppError::Validation {
            field,
            allowed: format!("{:?}", allowed),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::InvalidJson => (
                StatusCode::BAD_REQUEST,
                json!({ "error": self.to_string() }),
            ),
            AppError::Validation { field, allowed } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "error": self.to_string(),
                    "field": field,
                    "allowed": allowed,
                }),
            ),
            AppError::DataNotFound(_)
            | AppError::Csv(_)
            | AppError::Io(_)
            | AppError::Computation(_)
            | AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": self.to_string() }),
            ),
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
