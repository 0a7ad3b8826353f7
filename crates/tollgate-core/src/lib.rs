//! # Tollgate Core
//!
//! Token primitives shared by the Credential Authority and the
//! delegated verifier that guards resource services.
//!
//! ## Key Concepts
//!
//! - **Claims**: the identity embedded in a token (`userId`, `username`,
//!   `email`) plus its issue and expiry times
//! - **Shared secret**: the symmetric HS256 key both sides are configured with
//! - **Bearer header**: `Authorization: Bearer <token>`, the only accepted
//!   transport for tokens
//!
//! ## Token Validity
//!
//! A token is valid iff its signature verifies against the shared secret and
//! the current time is not past `exp`. Tokens live for one hour and are never
//! stored server-side, so there is no way to revoke one before it expires.

pub mod bearer;
pub mod claims;
pub mod error;
pub mod secret;
pub mod token;

pub use bearer::{bearer_header, extract_bearer, BEARER_SCHEME};
pub use claims::{Claims, Identity};
pub use error::{Result, TokenError};
pub use secret::SharedSecret;
pub use token::{IssuedToken, TokenIssuer, TokenVerifier, TOKEN_LIFETIME_SECS};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
