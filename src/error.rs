//! Error types for the OSS exporter

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Result type for HTTP handlers
pub type Result<T> = std::result::Result<T, AppError>;

/// Handler error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}

/// Failure while listing a bucket. Any of these ends the walk.
#[derive(Error, Debug)]
pub enum ListError {
    #[error("Failed to open bucket {bucket}: {message}")]
    Bucket { bucket: String, message: String },

    #[error("Failed to list objects (prefix {prefix:?}, marker {marker:?}): {message}")]
    Request {
        prefix: String,
        marker: String,
        message: String,
    },

    #[error("Malformed listing response: {0}")]
    MalformedResponse(String),
}

/// Startup configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid listen address {0}: {1}")]
    InvalidListenAddress(String, std::net::AddrParseError),

    #[error("Invalid route path {0}: must start with '/'")]
    InvalidPath(String),

    #[error("Route path {0} is already in use")]
    ConflictingPath(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Metrics(e) => {
                tracing::error!("Metrics error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "metrics_error",
                    "Failed to encode metrics".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
            details: if cfg!(debug_assertions) {
                Some(self.to_string())
            } else {
                None
            },
        });

        (status, body).into_response()
    }
}
