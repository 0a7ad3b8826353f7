//! Local-then-remote token verification

use std::sync::Arc;
use tracing::{debug, warn};

use tollgate_core::{extract_bearer, SharedSecret, TokenVerifier};

use crate::error::{GuardError, Result};
use crate::remote::RemoteVerifier;
use crate::types::{AuthenticatedUser, VerificationSource};

/// Verifies tokens locally, falling back to the issuing authority
#[derive(Clone)]
pub struct DelegatedVerifier {
    local: TokenVerifier,
    remote: Arc<dyn RemoteVerifier>,
}

impl DelegatedVerifier {
    /// Verify locally with `secret`, fall back to `remote`
    pub fn new(secret: &SharedSecret, remote: Arc<dyn RemoteVerifier>) -> Self {
        Self::with_local(TokenVerifier::new(secret), remote)
    }

    pub fn with_local(local: TokenVerifier, remote: Arc<dyn RemoteVerifier>) -> Self {
        Self { local, remote }
    }

    /// Authenticate a request from its `Authorization` header value.
    ///
    /// A missing or malformed header is rejected before any verification is
    /// attempted. Any remote failure, including a timeout, collapses into
    /// [`GuardError::InvalidOrExpiredToken`].
    pub async fn authenticate(&self, authorization: Option<&str>) -> Result<AuthenticatedUser> {
        let token = extract_bearer(authorization)?;

        let local_err = match self.local.verify(token) {
            Ok(claims) => {
                debug!(user_id = %claims.user_id, "Token verified locally");
                return Ok(AuthenticatedUser::new(claims, VerificationSource::Local));
            }
            Err(e) => e,
        };

        debug!(
            cause = ?local_err.cause(),
            remote = self.remote.description(),
            "Local verification failed, asking authority"
        );

        match self.remote.verify(token).await {
            Ok(claims) => {
                // Local secret may be out of sync with the authority.
                warn!(
                    user_id = %claims.user_id,
                    local_cause = ?local_err.cause(),
                    "Token accepted by authority after local verification failed"
                );
                Ok(AuthenticatedUser::new(claims, VerificationSource::Remote))
            }
            Err(remote_err) => {
                warn!(
                    local_cause = ?local_err.cause(),
                    remote_error = %remote_err,
                    "Token rejected"
                );
                Err(GuardError::InvalidOrExpiredToken(remote_err.to_string()))
            }
        }
    }
}

impl std::fmt::Debug for DelegatedVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelegatedVerifier")
            .field("local", &self.local)
            .field("remote", &self.remote.description())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tollgate_core::{bearer_header, Claims, Identity, TokenIssuer};

    /// Remote verifier returning a canned answer and counting calls
    struct FakeRemote {
        answer: Result<Claims>,
        calls: AtomicUsize,
    }

    impl FakeRemote {
        fn accepting(claims: Claims) -> Arc<Self> {
            Arc::new(Self {
                answer: Ok(claims),
                calls: AtomicUsize::new(0),
            })
        }

        fn rejecting(err: GuardError) -> Arc<Self> {
            Arc::new(Self {
                answer: Err(err),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RemoteVerifier for FakeRemote {
        async fn verify(&self, _token: &str) -> Result<Claims> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer.clone()
        }
    }

    fn local_secret() -> SharedSecret {
        SharedSecret::from("local-secret")
    }

    fn token_signed_with(secret: &str, identity: &Identity) -> String {
        TokenIssuer::new(&SharedSecret::from(secret))
            .issue(identity)
            .unwrap()
            .token
    }

    #[tokio::test]
    async fn test_local_success_skips_remote() {
        let alice = Identity::new("u-1", "alice", "alice@example.com");
        let remote = FakeRemote::rejecting(GuardError::RemoteRejected(401));
        let verifier = DelegatedVerifier::new(&local_secret(), remote.clone());

        let token = token_signed_with("local-secret", &alice);
        let user = verifier.authenticate(Some(&bearer_header(&token))).await.unwrap();

        assert_eq!(user.source, VerificationSource::Local);
        assert_eq!(user.identity(), alice);
        assert_eq!(remote.calls(), 0);
    }

    #[tokio::test]
    async fn test_remote_fallback_uses_authority_identity() {
        let authority_view = Claims::new(&Identity::new("u-9", "bob", "bob@example.com"), 10, 3610);
        let remote = FakeRemote::accepting(authority_view.clone());
        let verifier = DelegatedVerifier::new(&local_secret(), remote.clone());

        // Signed with a secret this service does not know
        let token = token_signed_with("rotated-secret", &Identity::new("u-9", "bob", "bob@example.com"));
        let user = verifier.authenticate(Some(&bearer_header(&token))).await.unwrap();

        assert_eq!(user.source, VerificationSource::Remote);
        assert_eq!(user.claims, authority_view);
        assert_eq!(remote.calls(), 1);
    }

    #[tokio::test]
    async fn test_rejected_by_both() {
        let remote = FakeRemote::rejecting(GuardError::RemoteRejected(401));
        let verifier = DelegatedVerifier::new(&local_secret(), remote.clone());

        let token = token_signed_with("forged", &Identity::new("u-1", "eve", "eve@example.com"));
        let result = verifier.authenticate(Some(&bearer_header(&token))).await;

        assert!(matches!(result, Err(GuardError::InvalidOrExpiredToken(_))));
        assert_eq!(remote.calls(), 1);
    }

    #[tokio::test]
    async fn test_remote_unavailable_is_rejection() {
        let remote = FakeRemote::rejecting(GuardError::RemoteUnavailable("timed out".into()));
        let verifier = DelegatedVerifier::new(&local_secret(), remote);

        let result = verifier.authenticate(Some("Bearer not.a.token")).await;
        assert!(matches!(result, Err(GuardError::InvalidOrExpiredToken(_))));
    }

    #[tokio::test]
    async fn test_missing_token_never_verifies() {
        let remote = FakeRemote::accepting(Claims::new(&Identity::new("u", "u", "u@x.io"), 0, i64::MAX));
        let verifier = DelegatedVerifier::new(&local_secret(), remote.clone());

        for header in [None, Some(""), Some("Bearer "), Some("Basic abc"), Some("token-only")] {
            let result = verifier.authenticate(header).await;
            assert_eq!(result, Err(GuardError::MissingToken), "{:?}", header);
        }
        assert_eq!(remote.calls(), 0);
    }
}
