//! Client-side error taxonomy.
//!
//! Validation errors never reach this layer; everything here is a network
//! or API failure. Failures are terminal for the user action; the client
//! performs no retries.

use thiserror::Error;

/// Result type for all API calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error surfaced by the HTTP client wrapper.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed (connection refused, DNS, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("api error ({0}): {1}")]
    Api(u16, String),

    /// The response body could not be decoded into the expected shape.
    #[error("parse error: {0}")]
    Parse(String),
}

impl ApiError {
    /// Whether this is a plain not-found answer from the backend.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Api(404, _))
    }
}
