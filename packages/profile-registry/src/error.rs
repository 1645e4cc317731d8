//! Error types for the registry.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use profile_types::AuthError;
use std::fmt;

/// Body for a create request missing any required identity field.
pub(crate) const REQUIRED_FIELDS_MSG: &str = "Required body parameter is missing or invalid";

/// Registry error type. Every handler failure converts into one of these
/// before crossing the HTTP boundary.
#[derive(Debug)]
pub enum Error {
    /// Missing or malformed request field (400, plain-text body).
    InvalidArgument(String),
    /// Absent, stale, or mismatched signature (401, empty body).
    Unauthorized,
    /// Unknown profile id (404, empty body).
    NotFound,
    /// JSON-RPC transport or contract-call failure (500, empty body).
    RemoteCall(String),
    /// Unexpected failure (400, diagnostic body).
    Internal(String),
    /// Startup configuration error.
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(msg) => write!(f, "{msg}"),
            Error::Unauthorized => write!(f, "unauthorized"),
            Error::NotFound => write!(f, "not found"),
            Error::RemoteCall(msg) => write!(f, "remote call error: {msg}"),
            Error::Internal(msg) => write!(f, "internal error: {msg}"),
            Error::Config(msg) => write!(f, "config error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<AuthError> for Error {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::RemoteCall(msg) => Error::RemoteCall(msg),
            AuthError::InvalidInput(msg) => Error::InvalidArgument(msg),
            AuthError::Unauthorized(_) | AuthError::SignatureInvalid | AuthError::PayloadExpired => {
                Error::Unauthorized
            }
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Internal(format!("json: {e}"))
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidArgument(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            Error::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            Error::NotFound => StatusCode::NOT_FOUND.into_response(),
            Error::RemoteCall(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
            Error::Internal(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            Error::Config(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}
