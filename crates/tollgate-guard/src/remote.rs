//! Remote verification against the Credential Authority

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use tollgate_core::{bearer_header, Claims};

use crate::error::{GuardError, Result};

/// Asks the issuing authority whether a token is valid
///
/// Injected into [`crate::DelegatedVerifier`] so the fallback path can be
/// exercised with a fake in tests.
#[async_trait]
pub trait RemoteVerifier: Send + Sync {
    /// Verify `token` remotely and return the claims the authority reports
    async fn verify(&self, token: &str) -> Result<Claims>;

    /// Get a description of this verifier (for logging)
    fn description(&self) -> &str {
        "remote verifier"
    }
}

/// Body of a successful `GET /api/auth/verify`
#[derive(Debug, Deserialize)]
struct VerifyResponse {
    #[allow(dead_code)] // "Token valid"; only `user` is consumed
    message: String,
    user: Claims,
}

/// Calls the authority's verify endpoint over HTTP
#[derive(Debug, Clone)]
pub struct HttpRemoteVerifier {
    verify_url: String,
    http_client: reqwest::Client,
}

impl HttpRemoteVerifier {
    /// Create a verifier for `verify_url`. Every call is bounded by `timeout`.
    pub fn new(verify_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GuardError::RemoteUnavailable(format!("http client: {}", e)))?;

        Ok(Self::with_client(verify_url, http_client))
    }

    /// Use a preconfigured client
    pub fn with_client(verify_url: impl Into<String>, http_client: reqwest::Client) -> Self {
        Self {
            verify_url: verify_url.into(),
            http_client,
        }
    }

    pub fn verify_url(&self) -> &str {
        &self.verify_url
    }
}

#[async_trait]
impl RemoteVerifier for HttpRemoteVerifier {
    async fn verify(&self, token: &str) -> Result<Claims> {
        debug!(url = %self.verify_url, "Delegating token verification to authority");

        let response = self
            .http_client
            .get(&self.verify_url)
            .header(reqwest::header::AUTHORIZATION, bearer_header(token))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GuardError::RemoteRejected(status.as_u16()));
        }

        let body: VerifyResponse = response
            .json()
            .await
            .map_err(|e| GuardError::InvalidResponse(e.to_string()))?;

        Ok(body.user)
    }

    fn description(&self) -> &str {
        "credential authority verify endpoint"
    }
}
