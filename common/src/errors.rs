//! Application error taxonomy.
//!
//! Three kinds cover the demos end to end: configuration resolution failures
//! (before any network call), connection establishment failures, and command
//! execution failures. None of them is recovered or retried locally; the
//! HTTP surface maps all of them to 5xx responses with a machine-readable
//! error code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::response::ApiResponse;

/// Result alias used throughout the workspace.
pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Required configuration keys missing or unparseable.
    #[error("missing or invalid configuration: {}", .0.join(", "))]
    Configuration(Vec<String>),

    /// Network or authentication failure establishing a session.
    #[error("failed to establish connection: {0}")]
    Connection(String),

    /// Query or command execution failure on an open connection.
    #[error("operation failed: {0}")]
    Operation(String),
}

impl AppError {
    /// Machine-readable error code carried in response bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Connection(_) => "CONNECTION_ERROR",
            Self::Operation(_) => "OPERATION_ERROR",
        }
    }

    /// HTTP status for the error kind.
    ///
    /// Connection failures are a bad gateway from the caller's point of
    /// view; everything else is an internal error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Connection(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(code = self.code(), error = %self, "request failed");
        let body = ApiResponse::err(self.code(), self.to_string());
        (self.status(), Json(body)).into_response()
    }
}
