//! Credential Authority
//!
//! Registers users, checks passwords, and mints tokens. Every token goes
//! through [`Authority::issue_for`], which delegates to the shared
//! [`TokenIssuer`].

use std::sync::Arc;
use tracing::{debug, info, warn};

use tollgate_core::{extract_bearer, Claims, IssuedToken, SharedSecret, TokenIssuer};

use crate::error::{AuthError, Result};
use crate::password::PasswordHasher;
use crate::storage::{NewUser, UserRecord, UserStore};

/// The Credential Authority
#[derive(Debug, Clone)]
pub struct Authority {
    store: Arc<dyn UserStore>,
    issuer: TokenIssuer,
    hasher: PasswordHasher,
}

impl Authority {
    /// Create an authority over `store`, signing with `secret`
    pub fn new(store: Arc<dyn UserStore>, secret: &SharedSecret) -> Self {
        Self {
            store,
            issuer: TokenIssuer::new(secret),
            hasher: PasswordHasher::new(),
        }
    }

    /// Replace the password hasher
    pub fn with_hasher(mut self, hasher: PasswordHasher) -> Self {
        self.hasher = hasher;
        self
    }

    pub fn store(&self) -> &Arc<dyn UserStore> {
        &self.store
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    /// Register a new user and issue their first token.
    ///
    /// Inputs are passed to the store and hasher as given. Fails with
    /// [`AuthError::DuplicateCredential`] if the email or the username is
    /// already taken, including when a concurrent registration wins the
    /// insert.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> Result<IssuedToken> {
        if self
            .store
            .find_by_email_or_username(email, username)
            .await?
            .is_some()
        {
            warn!(username = %username, "Registration rejected: username or email in use");
            return Err(AuthError::DuplicateCredential);
        }

        let password_hash = self.hasher.hash(password).await?;

        let user = self
            .store
            .insert(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, username = %user.username, "User registered");

        self.issue_for(&user)
    }

    /// Authenticate by email and password.
    ///
    /// An unknown email and a wrong password both yield
    /// [`AuthError::InvalidCredentials`].
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedToken> {
        let Some(user) = self.store.find_by_email(email).await? else {
            warn!("Login failed: invalid credentials");
            return Err(AuthError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &user.password_hash).await? {
            warn!("Login failed: invalid credentials");
            return Err(AuthError::InvalidCredentials);
        }

        info!(user_id = %user.id, "Login successful");

        self.issue_for(&user)
    }

    /// Verify the token carried in an `Authorization` header value
    pub fn verify_token(&self, authorization: Option<&str>) -> Result<Claims> {
        let token = extract_bearer(authorization)?;

        let claims = self.issuer.verifier().verify(token).map_err(|e| {
            debug!(cause = ?e.cause(), "Token verification failed");
            AuthError::from(e)
        })?;

        debug!(user_id = %claims.user_id, "Token verified");
        Ok(claims)
    }

    fn issue_for(&self, user: &UserRecord) -> Result<IssuedToken> {
        let issued = self.issuer.issue(&user.identity())?;
        info!(user_id = %user.id, exp = issued.claims.exp, "Issued token");
        Ok(issued)
    }
}
