//! Example resource service guarded by the Delegated Verifier
//!
//! - `GET /health` - Liveness check (unguarded)
//! - `GET /api/profile` - Returns the caller's identity and how it was verified

use axum::{routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use tollgate_core::Claims;

use crate::middleware::protect;
use crate::types::{AuthenticatedUser, VerificationSource};
use crate::verifier::DelegatedVerifier;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// GET /api/profile response
#[derive(Serialize)]
pub struct ProfileResponse {
    pub user: Claims,
    pub verified_by: VerificationSource,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
    })
}

async fn profile(user: AuthenticatedUser) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        user: user.claims,
        verified_by: user.source,
    })
}

/// Create the resource service router
pub fn create_resource_router(verifier: Arc<DelegatedVerifier>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let guarded = protect(Router::new().route("/api/profile", get(profile)), verifier);

    guarded
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
