//! Internal error types for prediction service calls.
//!
//! Mapped to the core port error at the boundary (see `port.rs`).

use thiserror::Error;

/// Result type alias for prediction service operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors talking to the prediction service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered with a non-success status.
    #[error("Prediction service returned status {status} for {url}")]
    Status {
        status: u16,
        url: String,
        /// FastAPI `detail` from the response body, if any
        detail: Option<String>,
    },

    /// The service answered with a body we could not use.
    #[error("Invalid response from prediction service: {message}")]
    InvalidResponse { message: String },

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
