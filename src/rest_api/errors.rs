//! # REST API Errors
//!
//! Error taxonomy for the posts resource and its HTTP mapping.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::SchemaError;

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

/// REST API errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestError {
    /// Malformed or incomplete caller input, detected before storage
    #[error("{0}")]
    Validation(String),

    /// The identifier matched no row
    #[error("post not found")]
    NotFound,

    /// Failure raised by the database layer, message passed through verbatim
    #[error("{0}")]
    Storage(String),
}

impl RestError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::Validation(_) => StatusCode::BAD_REQUEST,
            RestError::NotFound => StatusCode::NOT_FOUND,
            RestError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            RestError::Validation(_) => "validation",
            RestError::NotFound => "not_found",
            RestError::Storage(_) => "storage",
        }
    }
}

impl From<SchemaError> for RestError {
    fn from(err: SchemaError) -> Self {
        RestError::Validation(err.message().to_string())
    }
}

impl From<sqlx::Error> for RestError {
    fn from(err: sqlx::Error) -> Self {
        RestError::Storage(err.to_string())
    }
}

impl From<JsonRejection> for RestError {
    fn from(rejection: JsonRejection) -> Self {
        RestError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for RestError {
    fn from(rejection: PathRejection) -> Self {
        RestError::Validation(rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
    pub code: u16,
}

impl From<RestError> for ErrorResponse {
    fn from(err: RestError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            detail: err.to_string(),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
