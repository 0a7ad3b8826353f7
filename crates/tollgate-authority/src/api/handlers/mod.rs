//! API request handlers

pub mod auth;

pub use auth::{
    login, register, verify_token, AppState, LoginRequest, RegisterRequest, TokenResponse,
    VerifyResponse,
};
