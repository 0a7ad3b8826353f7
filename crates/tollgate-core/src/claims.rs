//! Token claims

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// The identity a token speaks for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Opaque user identifier assigned by the user store
    pub user_id: String,
    pub username: String,
    pub email: String,
}

impl Identity {
    pub fn new(
        user_id: impl Into<String>,
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            email: email.into(),
        }
    }
}

/// Decoded token payload
///
/// Serializes to `{userId, username, email, iat, exp}`, which is both the
/// JWT payload and the `user` object returned by the verify endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: String,
    pub username: String,
    pub email: String,
    /// Issued at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}

impl Claims {
    /// Build claims for an identity with explicit timestamps
    pub fn new(identity: &Identity, iat: i64, exp: i64) -> Self {
        Self {
            user_id: identity.user_id.clone(),
            username: identity.username.clone(),
            email: identity.email.clone(),
            iat,
            exp,
        }
    }

    /// The identity fields without timestamps
    pub fn identity(&self) -> Identity {
        Identity::new(&self.user_id, &self.username, &self.email)
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.iat, 0).single()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }

    /// A token stays valid up to and including the instant `exp`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().map_or(true, |exp| now > exp)
    }
}
