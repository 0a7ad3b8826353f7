//! axum integration: request guard and identity extractor

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};
use std::sync::Arc;

use crate::error::GuardError;
use crate::types::AuthenticatedUser;
use crate::verifier::DelegatedVerifier;

/// Reject unauthenticated requests; attach [`AuthenticatedUser`] otherwise
pub async fn require_auth(
    State(verifier): State<Arc<DelegatedVerifier>>,
    mut request: Request,
    next: Next,
) -> Response {
    let authorization = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    match verifier.authenticate(authorization.as_deref()).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

/// Guard every route currently on `router`.
///
/// Routes added after this call are not guarded. `router` must already
/// have at least one route.
pub fn protect<S>(router: Router<S>, verifier: Arc<DelegatedVerifier>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(verifier, require_auth))
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = GuardError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(GuardError::MissingToken)
    }
}
