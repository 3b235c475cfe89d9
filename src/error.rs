//! Relay error types
//!
//! Every failure is terminal for the request it belongs to and is turned
//! into an HTTP 500 with a JSON `error` field at the handler boundary.

use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Result type for relay operations
pub type RelayResult<T> = Result<T, RelayError>;

#[derive(Error, Debug)]
pub enum RelayError {
    /// Structured failure reported by the model provider
    #[error("{code} - {message}")]
    Provider { code: String, message: String },

    /// Anything else: malformed input, transport, serialization
    #[error("{0}")]
    Unclassified(String),
}

impl RelayError {
    pub fn provider(code: impl Into<String>, message: impl Into<String>) -> Self {
        RelayError::Provider {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn unclassified(description: impl ToString) -> Self {
        RelayError::Unclassified(description.to_string())
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        RelayError::Unclassified(err.to_string())
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        RelayError::Unclassified(err.to_string())
    }
}

impl From<BytesRejection> for RelayError {
    fn from(err: BytesRejection) -> Self {
        RelayError::Unclassified(err.to_string())
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
