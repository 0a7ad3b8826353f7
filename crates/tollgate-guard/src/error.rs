//! Error types for the Delegated Verifier

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tollgate_core::TokenError;

/// Result type for verifier operations
pub type Result<T> = std::result::Result<T, GuardError>;

/// Errors that can occur while authenticating a request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuardError {
    /// No usable bearer token on the request
    #[error("Authentication required")]
    MissingToken,

    /// Terminal rejection after local and remote verification both failed
    #[error("Invalid or expired token")]
    InvalidOrExpiredToken(String),

    /// Network error or timeout talking to the authority
    #[error("Authority unavailable: {0}")]
    RemoteUnavailable(String),

    /// The authority answered with a non-success status
    #[error("Authority rejected token with status {0}")]
    RemoteRejected(u16),

    /// The authority's response body could not be decoded
    #[error("Invalid authority response: {0}")]
    InvalidResponse(String),
}

impl From<TokenError> for GuardError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::MissingToken => GuardError::MissingToken,
            TokenError::InvalidOrExpired(cause) | TokenError::Signing(cause) => {
                GuardError::InvalidOrExpiredToken(cause)
            }
        }
    }
}

impl From<reqwest::Error> for GuardError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GuardError::InvalidResponse(err.to_string())
        } else {
            GuardError::RemoteUnavailable(err.to_string())
        }
    }
}

impl IntoResponse for GuardError {
    fn into_response(self) -> Response {
        let message = match self {
            GuardError::MissingToken => "Authentication required",
            _ => "Invalid or expired token",
        };

        (StatusCode::UNAUTHORIZED, Json(json!({ "message": message }))).into_response()
    }
}
