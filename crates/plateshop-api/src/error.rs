//! Error types for plateshop-api

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Result type alias for plateshop-api operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can stop the server from starting or running.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Unusable configuration
    #[error("Configuration error: {message}")]
    Config {
        /// What is wrong
        message: String,
    },

    /// Socket or file system failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from plateshop-store
    #[error("Store error: {0}")]
    Store(#[from] plateshop_store::Error),

    /// Error from plateshop-auth
    #[error("Auth error: {0}")]
    Auth(#[from] plateshop_auth::AuthError),
}

impl Error {
    /// Creates a new configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }
}

/// Per-request failures, rendered as JSON error bodies.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or malformed request fields (400).
    #[error("{0}")]
    Validation(String),

    /// Login rejected (401).
    #[error("Invalid credentials")]
    Unauthorized,

    /// Row index out of range (404).
    #[error("{0}")]
    NotFound(String),

    /// Store or server failure (500).
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Unauthorized => json!({ "success": false, "message": self.to_string() }),
            _ => json!({ "error": self.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}
