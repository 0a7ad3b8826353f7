//! In-memory storage backend
//!
//! Default user store, backed by a hashmap behind a `RwLock`.
//! Suitable for development and single-instance deployments.
//! Data is lost on restart.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use super::{NewUser, StorageError, UserRecord, UserStore};

/// In-memory user store
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, UserRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<UserRecord>, StorageError> {
        let users = self.users.read().map_err(|_| StorageError::Poisoned)?;
        Ok(users
            .values()
            .find(|u| u.email == email || u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StorageError> {
        let users = self.users.read().map_err(|_| StorageError::Poisoned)?;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<UserRecord, StorageError> {
        // Check and insert under one write lock.
        let mut users = self.users.write().map_err(|_| StorageError::Poisoned)?;

        if let Some(existing) = users
            .values()
            .find(|u| u.email == user.email || u.username == user.username)
        {
            let field = if existing.email == user.email { "email" } else { "username" };
            return Err(StorageError::AlreadyExists(field.to_string()));
        }

        let record = user.into_record();
        info!(user_id = %record.id, username = %record.username, "Stored user record");
        users.insert(record.id, record.clone());
        Ok(record)
    }

    async fn count(&self) -> Result<usize, StorageError> {
        let users = self.users.read().map_err(|_| StorageError::Poisoned)?;
        Ok(users.len())
    }
}
