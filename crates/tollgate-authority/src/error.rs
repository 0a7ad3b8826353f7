//! Error types for the Credential Authority

use thiserror::Error;
use tollgate_core::TokenError;

use crate::storage::StorageError;

/// Result type for authority operations
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors surfaced by registration, login and token verification
#[derive(Error, Debug)]
pub enum AuthError {
    /// Username or email is already registered
    #[error("Username or Email already in use")]
    DuplicateCredential,

    /// Unknown email or wrong password; the two are deliberately the same error
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("No token provided")]
    MissingToken,

    /// Request body missing, not JSON, or lacking a required field
    #[error("{0}")]
    InvalidRequest(String),

    /// Forged, malformed or expired token. The cause is for logs only.
    #[error("Invalid or expired token")]
    InvalidOrExpiredToken(String),

    /// Store, hashing or signing failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::MissingToken => AuthError::MissingToken,
            TokenError::InvalidOrExpired(cause) => AuthError::InvalidOrExpiredToken(cause),
            TokenError::Signing(cause) => AuthError::Internal(format!("token signing: {}", cause)),
        }
    }
}

impl From<StorageError> for AuthError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::AlreadyExists(_) => AuthError::DuplicateCredential,
            other => AuthError::Internal(other.to_string()),
        }
    }
}

impl From<bcrypt::BcryptError> for AuthError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AuthError::Internal(format!("password hashing: {}", err))
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        AuthError::Internal(format!("hashing task: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_conflict_is_duplicate() {
        let err: AuthError = StorageError::AlreadyExists("email".into()).into();
        assert!(matches!(err, AuthError::DuplicateCredential));

        let err: AuthError = StorageError::Database("connection reset".into()).into();
        assert!(matches!(err, AuthError::Internal(_)));
    }

    #[test]
    fn test_token_errors_map() {
        assert!(matches!(AuthError::from(TokenError::MissingToken), AuthError::MissingToken));
        assert!(matches!(
            AuthError::from(TokenError::InvalidOrExpired("token expired".into())),
            AuthError::InvalidOrExpiredToken(_)
        ));
        assert!(matches!(
            AuthError::from(TokenError::Signing("bad key".into())),
            AuthError::Internal(_)
        ));
    }
}
