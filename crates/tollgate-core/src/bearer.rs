//! `Authorization: Bearer <token>` parsing

use crate::error::{Result, TokenError};

/// Authorization scheme accepted for tokens
pub const BEARER_SCHEME: &str = "Bearer";

/// Extract the token from an `Authorization` header value.
///
/// Anything other than `Bearer` followed by a non-empty token is treated as
/// no token at all.
pub fn extract_bearer(authorization: Option<&str>) -> Result<&str> {
    let value = authorization.ok_or(TokenError::MissingToken)?;
    let (scheme, token) = value.split_once(' ').ok_or(TokenError::MissingToken)?;

    if scheme != BEARER_SCHEME {
        return Err(TokenError::MissingToken);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(TokenError::MissingToken);
    }

    Ok(token)
}

/// Render a token as an `Authorization` header value
pub fn bearer_header(token: &str) -> String {
    format!("{} {}", BEARER_SCHEME, token)
}
