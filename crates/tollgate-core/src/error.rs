//! Error types for token handling

use thiserror::Error;

/// Result type alias using TokenError
pub type Result<T> = std::result::Result<T, TokenError>;

/// Errors that can occur while issuing or checking a token
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// No `Bearer <token>` value was presented
    #[error("No token provided")]
    MissingToken,

    /// Signature mismatch, malformed token or expiry.
    ///
    /// The cause is kept for logs only; the display text is the same for a
    /// forged token and a stale one.
    #[error("Invalid or expired token")]
    InvalidOrExpired(String),

    /// Encoding or signing the token failed
    #[error("Token signing failed: {0}")]
    Signing(String),
}

impl TokenError {
    /// Diagnostic cause, if any
    pub fn cause(&self) -> Option<&str> {
        match self {
            TokenError::MissingToken => None,
            TokenError::InvalidOrExpired(cause) | TokenError::Signing(cause) => Some(cause),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;
        let cause = match err.kind() {
            ErrorKind::ExpiredSignature => "token expired".to_string(),
            ErrorKind::InvalidSignature => "signature mismatch".to_string(),
            ErrorKind::InvalidToken => "malformed token".to_string(),
            ErrorKind::InvalidAlgorithm => "unexpected algorithm".to_string(),
            ErrorKind::MissingRequiredClaim(claim) => format!("missing claim: {}", claim),
            _ => err.to_string(),
        };
        TokenError::InvalidOrExpired(cause)
    }
}
