//! Registration, login and token verification handlers
//!
//! - `POST /api/auth/register` → 201 `{message, token}`
//! - `POST /api/auth/login` → 200 `{message, token}`
//! - `GET /api/auth/verify` → 200 `{message, user}`

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use tollgate_core::Claims;

use crate::authority::Authority;
use crate::error::AuthError;

/// Application state shared across handlers
#[derive(Debug)]
pub struct AppState {
    pub authority: Authority,
}

/// POST /api/auth/register body
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// POST /api/auth/login body
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Register/login response
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub message: String,
    pub token: String,
}

/// Verify response; `user` is the decoded claims
#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub message: String,
    pub user: Claims,
}

/// Register a new user
///
/// POST /api/auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TokenResponse>), AuthError> {
    let Json(request) = body?;
    let issued = state
        .authority
        .register(&request.username, &request.email, &request.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            message: "User registered".into(),
            token: issued.token,
        }),
    ))
}

/// Log in with email and password
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AuthError> {
    let Json(request) = body?;
    let issued = state
        .authority
        .login(&request.email, &request.password)
        .await?;

    Ok(Json(TokenResponse {
        message: "Login successful".into(),
        token: issued.token,
    }))
}

/// Verify a bearer token for other services
///
/// GET /api/auth/verify
pub async fn verify_token(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<VerifyResponse>, AuthError> {
    let authorization = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    let claims = state.authority.verify_token(authorization)?;

    Ok(Json(VerifyResponse {
        message: "Token valid".into(),
        user: claims,
    }))
}
