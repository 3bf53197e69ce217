//! Custom error types for the API service

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::DatabaseError;
use serde_json::json;
use thiserror::Error;

use crate::validation::{INVALID_INPUT, SCHEMA_KEY, ValidationErrors};

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Referenced entity does not exist
    #[error("{0}")]
    NotFound(String),

    /// Field-level constraint violations
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl ApiError {
    pub fn not_found(entity: &str) -> Self {
        ApiError::NotFound(format!("{} not found", entity))
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Database(DatabaseError::Query(e))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        ApiError::Validation(ValidationErrors::single(SCHEMA_KEY, INVALID_INPUT))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
            }
            ApiError::Validation(errors) => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(errors)).into_response()
            }
            ApiError::Database(e) => {
                tracing::error!("Database failure: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Database error" })),
                )
                    .into_response()
            }
        }
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
