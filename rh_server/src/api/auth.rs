//! Authentication API handlers.
//!
//! This module provides HTTP REST endpoints for the credential lifecycle:
//! - User registration with username and password
//! - Login issuing an access/refresh token pair
//! - Access-token refresh from a valid refresh token
//! - Logout, which revokes the presented refresh token
//!
//! All endpoints return JSON with either tokens or a sanitized error message.
//!
//! # Examples
//!
//! Register a new user:
//! ```bash
//! curl -X POST http://localhost:3000/api/v1/auth/register \
//!   -H "Content-Type: application/json" \
//!   -d '{"username": "alice", "password": "SecurePass123"}'
//! ```
//!
//! Login:
//! ```bash
//! curl -X POST http://localhost:3000/api/v1/auth/login \
//!   -H "Content-Type: application/json" \
//!   -d '{"username": "alice", "password": "SecurePass123"}'
//! ```

use axum::{Json, extract::State, http::StatusCode};
use riddle_hunt::auth::{AuthError, LoginRequest, RegisterRequest};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::metrics;

#[derive(Debug, Deserialize)]
pub struct RegisterPayload {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshPayload {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: i64,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user_id: i64,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_status(err: &AuthError) -> StatusCode {
    match err {
        AuthError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        AuthError::UsernameTaken => StatusCode::CONFLICT,
        AuthError::InvalidUsername(_) | AuthError::WeakPassword(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::UNAUTHORIZED,
    }
}

fn error_response(err: &AuthError) -> (StatusCode, Json<ErrorResponse>) {
    if let AuthError::Database(db_err) = err {
        tracing::error!(error = %db_err, "Auth operation failed on storage");
    }
    (
        error_status(err),
        Json(ErrorResponse {
            error: err.client_message(),
        }),
    )
}

/// Register a new user account.
///
/// # Errors
///
/// - `400 Bad Request`: Invalid username format or weak password
/// - `409 Conflict`: Username already taken
/// - `500 Internal Server Error`: Storage failure
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<(StatusCode, Json<RegisterResponse>), (StatusCode, Json<ErrorResponse>)> {
    let request = RegisterRequest {
        username: payload.username,
        password: payload.password,
    };

    match state.auth_manager.register(request).await {
        Ok(user) => Ok((
            StatusCode::CREATED,
            Json(RegisterResponse {
                user_id: user.id,
                username: user.username,
            }),
        )),
        Err(e) => Err(error_response(&e)),
    }
}

/// Authenticate a user and issue session tokens.
///
/// Access tokens are short-lived (15 minutes); refresh tokens last longer
/// (7 days) and are individually revocable via logout.
///
/// # Errors
///
/// - `401 Unauthorized`: Invalid credentials. The response does not reveal
///   whether the username exists.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>, (StatusCode, Json<ErrorResponse>)> {
    let request = LoginRequest {
        username: payload.username,
        password: payload.password,
    };

    match state.auth_manager.login(request).await {
        Ok((user, tokens)) => {
            metrics::login_attempts_total(true);
            Ok(Json(AuthResponse {
                access_token: tokens.access_token,
                refresh_token: tokens.refresh_token,
                user_id: user.id,
                username: user.username,
            }))
        }
        Err(e) => {
            metrics::login_attempts_total(false);
            Err(error_response(&e))
        }
    }
}

/// Mint a new access token from a valid refresh token.
///
/// The refresh token is not rotated; the same refresh token keeps working
/// until it expires or is revoked.
///
/// # Errors
///
/// - `401 Unauthorized`: Expired, malformed, or revoked refresh token
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshPayload>,
) -> Result<Json<RefreshResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.auth_manager.refresh(&payload.refresh_token).await {
        Ok(access_token) => {
            metrics::token_refreshes_total(true);
            Ok(Json(RefreshResponse { access_token }))
        }
        Err(e) => {
            metrics::token_refreshes_total(false);
            Err(error_response(&e))
        }
    }
}

/// Logout by revoking the presented refresh token.
///
/// Revocation requires a currently valid token: revoking an expired or
/// already-revoked token fails. The matching access token keeps working
/// until it expires naturally.
///
/// # Errors
///
/// - `401 Unauthorized`: Expired, malformed, or already-revoked token
pub async fn logout(
    State(state): State<AppState>,
    Json(payload): Json<RefreshPayload>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    match state.auth_manager.revoke(&payload.refresh_token).await {
        Ok(()) => Ok(StatusCode::NO_CONTENT),
        Err(e) => Err(error_response(&e)),
    }
}
