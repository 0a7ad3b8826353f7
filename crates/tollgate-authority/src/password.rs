//! Password hashing
//!
//! bcrypt with a cost of 10. Hashing and verification are CPU-bound, so both
//! run on the blocking thread pool.

use crate::error::Result;

/// bcrypt cost factor used for stored passwords
pub const BCRYPT_COST: u32 = 10;

/// One-way salted password hasher
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self { cost: BCRYPT_COST }
    }

    /// Hasher with a non-default cost (tests use the bcrypt minimum of 4)
    pub fn with_cost(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password
    pub async fn hash(&self, password: &str) -> Result<String> {
        let password = password.to_owned();
        let cost = self.cost;
        let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
        Ok(hashed)
    }

    /// Check a plaintext password against a stored hash
    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
        Ok(matches)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthError;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hasher = PasswordHasher::with_cost(4);
        let hash = hasher.hash("correct horse").await.unwrap();

        assert_ne!(hash, "correct horse");
        assert!(hasher.verify("correct horse", &hash).await.unwrap());
        assert!(!hasher.verify("battery staple", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_salted() {
        let hasher = PasswordHasher::with_cost(4);
        let a = hasher.hash("same").await.unwrap();
        let b = hasher.hash("same").await.unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_default_cost() {
        assert_eq!(PasswordHasher::default().cost(), 10);
    }

    #[tokio::test]
    async fn test_malformed_hash_is_internal() {
        let hasher = PasswordHasher::with_cost(4);
        let result = hasher.verify("pw", "not-a-bcrypt-hash").await;
        assert!(matches!(result, Err(AuthError::Internal(_))));
    }
}
