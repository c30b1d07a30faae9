//! Error types for the learning-path service.
//!
//! Errors are defined with `thiserror` so every failure carries a readable
//! message, and the same enum doubles as an axum response so handlers can
//! simply return `Result<_, CatalogError>`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use tracing::error;

/// Message returned to clients when path generation fails internally.
pub const GENERATION_FAILED: &str = "Failed to generate learning path";

/// Custom error type for catalog and recommendation operations.
///
/// # Rust Concepts
/// - `#[from]` implements `From<T>`, so `?` converts IO and JSON errors
/// - `IntoResponse` lets axum turn the error straight into an HTTP reply
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Error reading a catalog file from disk.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing a catalog file.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A loaded catalog breaks one of its invariants (duplicate ids, empty tags...).
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// The client sent a body that is not a usable profile.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Path generation failed after the request was accepted.
    #[error("Path generation failed: {0}")]
    Generation(String),
}

impl CatalogError {
    fn status(&self) -> StatusCode {
        match self {
            CatalogError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Internal details stay in the log.
        let message = match &self {
            CatalogError::InvalidRequest(_) => self.to_string(),
            _ => {
                error!("{}", self);
                GENERATION_FAILED.to_string()
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
