//! HTTP mapping for authority errors

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, warn};

use crate::error::AuthError;

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match &self {
            AuthError::DuplicateCredential
            | AuthError::InvalidCredentials
            | AuthError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AuthError::MissingToken => StatusCode::UNAUTHORIZED,
            AuthError::InvalidOrExpiredToken(cause) => {
                warn!(cause = %cause, "Rejected token");
                StatusCode::UNAUTHORIZED
            }
            AuthError::Internal(cause) => {
                // Log the real error, return a generic message
                error!(cause = %cause, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = match &self {
            AuthError::Internal(_) => "Server error".to_string(),
            other => other.to_string(),
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::InvalidRequest(rejection.body_text())
    }
}
