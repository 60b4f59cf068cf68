//! API error taxonomy shared by every resource client
//!
//! Non-success HTTP statuses are classified into fixed domain errors; a
//! status without a dedicated case carries the caller-supplied fallback
//! message instead. Transport-level failures stay distinct from classified
//! responses so callers can tell "the server said no" from "the server was
//! never reached".

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unauthorised access to API")]
    Unauthorized,

    #[error("you do not have permission to access this resource")]
    Forbidden,

    #[error("resource not found")]
    NotFound,

    #[error("internal server error")]
    Server,

    #[error("{0}")]
    Rejected(String),

    #[error("an error occurred communicating with the server: {0}")]
    Communication(#[from] reqwest::Error),
}

impl ApiError {
    /// True for auth-class failures (401/403), so callers can route the
    /// user back to login instead of showing a generic error.
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Unauthorized | ApiError::Forbidden)
    }
}

/// Classify a non-success HTTP status into a domain error.
///
/// Pure lookup; no retries happen anywhere in this layer.
pub fn error_for_status(status: StatusCode, fallback: &str) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        StatusCode::FORBIDDEN => ApiError::Forbidden,
        StatusCode::NOT_FOUND => ApiError::NotFound,
        StatusCode::INTERNAL_SERVER_ERROR => ApiError::Server,
        _ => ApiError::Rejected(fallback.to_string()),
    }
}
