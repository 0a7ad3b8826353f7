//! Process configuration, read once from the environment at startup

use std::env;
use thiserror::Error;
use tollgate_core::SharedSecret;
use tracing::Level;

pub const DEFAULT_PORT: u16 = 5000;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set to a non-empty value")]
    MissingSecret,

    #[error("{name} must be a valid port number, got '{value}'")]
    InvalidPort { name: &'static str, value: String },
}

/// Credential Authority configuration
#[derive(Debug, Clone)]
pub struct AuthorityConfig {
    /// Signing secret shared with every verifier
    pub secret: SharedSecret,
    pub port: u16,
    pub log_level: Level,
    /// PostgreSQL connection string; the in-memory store is used when unset
    pub database_url: Option<String>,
}

impl AuthorityConfig {
    /// Load from process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .map(SharedSecret::from)
            .ok_or(ConfigError::MissingSecret)?;

        let port = match lookup("AUTH_SERVICE_PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidPort {
                name: "AUTH_SERVICE_PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let log_level = lookup("AUTH_SERVICE_LOG_LEVEL")
            .and_then(|v| v.parse().ok())
            .unwrap_or(Level::INFO);

        let database_url = lookup("DATABASE_URL").filter(|s| !s.is_empty());

        Ok(Self {
            secret,
            port,
            log_level,
            database_url,
        })
    }
}
