//! Delegated Verifier
//!
//! Guards resource endpoints in services that trust tokens issued by the
//! Credential Authority.
//!
//! ## Verification Strategy
//!
//! For each request:
//!
//! 1. Extract `Authorization: Bearer <token>`; reject if absent
//! 2. Verify signature and expiry locally with the configured shared secret
//! 3. If local verification fails, ask the authority's verify endpoint
//! 4. Reject if the authority is unreachable, times out, or says no
//!
//! Step 3 means a request can be authorized even when this service's secret
//! has drifted from the authority's, as long as the authority is reachable.
//! Every such request is logged at `warn` so drift is visible.
//!
//! ## Usage
//!
//! ```ignore
//! use tollgate_guard::{protect, DelegatedVerifier, HttpRemoteVerifier};
//!
//! let remote = HttpRemoteVerifier::new("http://localhost:5000/api/auth/verify", timeout)?;
//! let verifier = Arc::new(DelegatedVerifier::new(&secret, Arc::new(remote)));
//! let app = protect(Router::new().route("/api/profile", get(profile)), verifier);
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod remote;
pub mod resource;
pub mod types;
pub mod verifier;

pub use config::{ConfigError, GuardConfig};
pub use error::{GuardError, Result};
pub use middleware::{protect, require_auth};
pub use remote::{HttpRemoteVerifier, RemoteVerifier};
pub use resource::create_resource_router;
pub use types::{AuthenticatedUser, VerificationSource};
pub use verifier::DelegatedVerifier;
