//! Storage abstraction for user records
//!
//! The Credential Authority only needs three operations from its user
//! store: a duplicate check, a lookup by email, and an insert. Records are
//! created once at registration and never updated or deleted here.
//!
//! Uniqueness of `username` and `email` is enforced by `insert` itself, so
//! two concurrent registrations for the same email cannot both succeed even
//! though the duplicate check and the insert are separate calls.

pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use memory::MemoryStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt::Debug;
use tollgate_core::Identity;
use uuid::Uuid;

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A record with the same username or email already exists
    #[error("User already exists: {0}")]
    AlreadyExists(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Store lock poisoned")]
    Poisoned,
}

/// A persisted user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Assigned at creation
    pub id: Uuid,
    pub username: String,
    pub email: String,
    /// bcrypt hash, never the plaintext password
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// The identity embedded in tokens issued for this user
    pub fn identity(&self) -> Identity {
        Identity::new(self.id.to_string(), &self.username, &self.email)
    }
}

/// Fields supplied at registration
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    /// Assign an id and creation time
    pub fn into_record(self) -> UserRecord {
        UserRecord {
            id: Uuid::new_v4(),
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            created_at: Utc::now(),
        }
    }
}

/// Storage backend trait for user records
///
/// Implementations must be thread-safe and support concurrent access.
#[async_trait]
pub trait UserStore: Send + Sync + Debug {
    /// Find any record whose email equals `email` OR whose username equals `username`
    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<UserRecord>, StorageError>;

    /// Find a record by exact email
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StorageError>;

    /// Persist a new user.
    ///
    /// Fails with [`StorageError::AlreadyExists`] if the username or email is taken.
    async fn insert(&self, user: NewUser) -> Result<UserRecord, StorageError>;

    /// Number of stored users
    async fn count(&self) -> Result<usize, StorageError>;
}
