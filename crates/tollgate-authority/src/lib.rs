//! Credential Authority
//!
//! Owns user registration and login, issues signed bearer tokens, and
//! exposes a verification endpoint for services that cannot (or could not)
//! verify a token locally.
//!
//! ## API Endpoints
//!
//! - `GET /health` - Liveness check
//! - `GET /ready` - Readiness check against the user store
//! - `POST /api/auth/register` - Create a user and issue a token
//! - `POST /api/auth/login` - Authenticate and issue a token
//! - `GET /api/auth/verify` - Verify `Authorization: Bearer <token>`
//!
//! ## Known Limitations
//!
//! Tokens are self-contained and valid for one hour. There is no revocation
//! list, so a leaked token stays usable until it expires.

pub mod api;
pub mod authority;
pub mod config;
pub mod error;
pub mod password;
pub mod storage;

pub use api::create_router;
pub use api::handlers::AppState;
pub use authority::Authority;
pub use config::{AuthorityConfig, ConfigError};
pub use error::{AuthError, Result};
pub use password::{PasswordHasher, BCRYPT_COST};
pub use storage::{MemoryStore, NewUser, StorageError, UserRecord, UserStore};
#[cfg(feature = "postgres")]
pub use storage::PostgresStore;
