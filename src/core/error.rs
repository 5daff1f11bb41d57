//! Typed error handling for restbase
//!
//! The error surface is deliberately small: the framework defines no retry,
//! timeout, or translation behavior for backend faults. A failing store call
//! surfaces as a 500-class response with a structured `{code, message}` body;
//! absent resources are not errors at all (they travel as explicit `None`
//! values and become 404 through the not-found middleware).

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Errors produced while serving a resource request.
#[derive(Debug, Error)]
pub enum RestError {
    /// A resource lookup failed. Reserved for store implementations that
    /// prefer a hard error over the null-body/404 path.
    #[error("resource not found: {resource}/{id}")]
    NotFound { resource: String, id: String },

    /// The persistence backend failed; propagated untranslated.
    #[error("storage backend failure: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Wire shape of an error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Error code for programmatic handling
    pub code: &'static str,
    /// Human-readable error message
    pub message: String,
}

impl RestError {
    /// The HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::NotFound { .. } => StatusCode::NOT_FOUND,
            RestError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The stable error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            RestError::NotFound { .. } => "NOT_FOUND",
            RestError::Storage(_) => "STORAGE_ERROR",
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorBody {
            code: self.error_code(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}
