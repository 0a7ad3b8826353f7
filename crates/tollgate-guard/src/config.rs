//! Resource service configuration, read once from the environment

use std::env;
use std::time::Duration;
use thiserror::Error;
use tollgate_core::SharedSecret;
use tracing::Level;

pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_VERIFY_URL: &str = "http://localhost:5000/api/auth/verify";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set to a non-empty value")]
    MissingSecret,

    #[error("{name} is invalid: '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Delegated Verifier and resource service configuration
#[derive(Debug, Clone)]
pub struct GuardConfig {
    /// Local copy of the authority's signing secret
    pub secret: SharedSecret,
    /// Authority endpoint used when local verification fails
    pub verify_url: String,
    /// Upper bound on each remote verification call
    pub timeout: Duration,
    pub port: u16,
    pub log_level: Level,
}

impl GuardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET")
            .filter(|s| !s.is_empty())
            .map(SharedSecret::from)
            .ok_or(ConfigError::MissingSecret)?;

        let verify_url = lookup("AUTH_SERVICE_VERIFY_URL")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_VERIFY_URL.to_string());

        let timeout = match lookup("AUTH_SERVICE_TIMEOUT_MS") {
            Some(value) => match value.parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "AUTH_SERVICE_TIMEOUT_MS",
                        value,
                    })
                }
            },
            None => DEFAULT_TIMEOUT,
        };

        let port = match lookup("RESOURCE_SERVICE_PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid {
                name: "RESOURCE_SERVICE_PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let log_level = lookup("RESOURCE_SERVICE_LOG_LEVEL")
            .and_then(|v| v.parse().ok())
            .unwrap_or(Level::INFO);

        Ok(Self {
            secret,
            verify_url,
            timeout,
            port,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            vars.iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn test_defaults() {
        let config = GuardConfig::from_lookup(lookup(&[("JWT_SECRET", "s")])).unwrap();

        assert_eq!(config.verify_url, DEFAULT_VERIFY_URL);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.port, 5001);
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    fn test_overrides() {
        let config = GuardConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s"),
            ("AUTH_SERVICE_VERIFY_URL", "http://auth:5000/api/auth/verify"),
            ("AUTH_SERVICE_TIMEOUT_MS", "250"),
            ("RESOURCE_SERVICE_PORT", "8081"),
        ]))
        .unwrap();

        assert_eq!(config.verify_url, "http://auth:5000/api/auth/verify");
        assert_eq!(config.timeout, Duration::from_millis(250));
        assert_eq!(config.port, 8081);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            GuardConfig::from_lookup(lookup(&[])),
            Err(ConfigError::MissingSecret)
        ));
        assert!(matches!(
            GuardConfig::from_lookup(lookup(&[("JWT_SECRET", "s"), ("AUTH_SERVICE_TIMEOUT_MS", "0")])),
            Err(ConfigError::Invalid { .. })
        ));
    }
}
