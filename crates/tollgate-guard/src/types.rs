//! Authenticated identity attached to requests

use serde::{Deserialize, Serialize};
use tollgate_core::{Claims, Identity};

/// How a token was verified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationSource {
    /// Checked against the locally configured shared secret
    Local,
    /// Confirmed by the Credential Authority's verify endpoint
    Remote,
}

impl std::fmt::Display for VerificationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerificationSource::Local => write!(f, "local"),
            VerificationSource::Remote => write!(f, "remote"),
        }
    }
}

/// The identity a request was authorized as
///
/// Inserted into request extensions by [`crate::require_auth`] and
/// available to handlers as an extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub claims: Claims,
    pub source: VerificationSource,
}

impl AuthenticatedUser {
    pub fn new(claims: Claims, source: VerificationSource) -> Self {
        Self { claims, source }
    }

    pub fn identity(&self) -> Identity {
        self.claims.identity()
    }

    pub fn user_id(&self) -> &str {
        &self.claims.user_id
    }
}
