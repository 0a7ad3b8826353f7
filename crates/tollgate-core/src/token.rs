//! Token issuance and verification
//!
//! Tokens are compact HS256 JWS strings. [`TokenIssuer::issue_at`] is the
//! only place a token is minted; registration and login both go through it.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;
use tracing::debug;

use crate::claims::{Claims, Identity};
use crate::error::{Result, TokenError};
use crate::secret::SharedSecret;

/// Token lifetime: exactly one hour after issuance
pub const TOKEN_LIFETIME_SECS: i64 = 3600;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// A freshly signed token together with the claims it carries
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
}

/// Checks signature and expiry of presented tokens
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &SharedSecret) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        // Expiry is checked against an explicit clock in `verify_at`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verify a raw token against the current time
    pub fn verify(&self, token: &str) -> Result<Claims> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a raw token as of `now`.
    ///
    /// Valid iff the signature matches and `now <= exp`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.key, &self.validation).map_err(|e| {
            let err = TokenError::from(e);
            debug!(cause = ?err.cause(), "Token rejected");
            err
        })?;

        let claims = data.claims;
        if claims.is_expired_at(now) {
            debug!(exp = claims.exp, now = now.timestamp(), "Token expired");
            return Err(TokenError::InvalidOrExpired("token expired".into()));
        }

        Ok(claims)
    }
}

impl fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("algorithm", &ALGORITHM)
            .finish_non_exhaustive()
    }
}

/// Signs tokens with the shared secret
#[derive(Clone)]
pub struct TokenIssuer {
    key: EncodingKey,
    verifier: TokenVerifier,
}

impl TokenIssuer {
    pub fn new(secret: &SharedSecret) -> Self {
        Self {
            key: EncodingKey::from_secret(secret.as_bytes()),
            verifier: TokenVerifier::new(secret),
        }
    }

    /// Verifier for tokens minted by this issuer
    pub fn verifier(&self) -> &TokenVerifier {
        &self.verifier
    }

    /// Issue a token for `identity`, valid for one hour from now
    pub fn issue(&self, identity: &Identity) -> Result<IssuedToken> {
        self.issue_at(identity, Utc::now())
    }

    /// Issue a token as if signed at `issued_at`
    pub fn issue_at(&self, identity: &Identity, issued_at: DateTime<Utc>) -> Result<IssuedToken> {
        let iat = issued_at.timestamp();
        let exp = (issued_at + Duration::seconds(TOKEN_LIFETIME_SECS)).timestamp();
        let claims = Claims::new(identity, iat, exp);

        let token = encode(&Header::new(ALGORITHM), &claims, &self.key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok(IssuedToken { token, claims })
    }
}

impl fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("algorithm", &ALGORITHM)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(&SharedSecret::from("test-secret"))
    }

    fn alice() -> Identity {
        Identity::new("6f1c", "alice", "alice@example.com")
    }

    #[test]
    fn test_issue_and_verify() {
        let issuer = issuer();
        let issued = issuer.issue(&alice()).unwrap();

        assert_eq!(issued.token.split('.').count(), 3);
        assert_eq!(issued.claims.exp - issued.claims.iat, TOKEN_LIFETIME_SECS);

        let claims = issuer.verifier().verify(&issued.token).unwrap();
        assert_eq!(claims, issued.claims);
        assert_eq!(claims.identity(), alice());
    }

    #[test]
    fn test_expiry_window() {
        let issuer = issuer();
        let t0 = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let issued = issuer.issue_at(&alice(), t0).unwrap();
        let verifier = issuer.verifier();

        assert!(verifier.verify_at(&issued.token, t0 + Duration::seconds(3599)).is_ok());
        assert!(verifier.verify_at(&issued.token, t0 + Duration::seconds(3600)).is_ok());

        let err = verifier
            .verify_at(&issued.token, t0 + Duration::seconds(3601))
            .unwrap_err();
        assert!(matches!(err, TokenError::InvalidOrExpired(_)));

        let just_past = t0 + Duration::seconds(3600) + Duration::milliseconds(500);
        assert!(matches!(
            verifier.verify_at(&issued.token, just_past),
            Err(TokenError::InvalidOrExpired(_))
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issued = issuer().issue(&alice()).unwrap();
        let other = TokenVerifier::new(&SharedSecret::from("other-secret"));

        let err = other.verify(&issued.token).unwrap_err();
        assert_eq!(err.to_string(), "Invalid or expired token");
    }

    #[test]
    fn test_garbage_rejected() {
        let verifier = issuer().verifier().clone();
        for token in ["", "abc", "a.b.c", "eyJhbGciOiJIUzI1NiJ9.e30.sig"] {
            assert!(matches!(
                verifier.verify(token),
                Err(TokenError::InvalidOrExpired(_))
            ));
        }
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let rendered = format!("{:?}", issuer());
        assert!(!rendered.contains("test-secret"));
    }
}
