//! Authentication middleware for protected endpoints.
//!
//! Extracts and validates the JWT access token from the `Authorization`
//! header and injects the verified [`AccessClaims`] into request extensions
//! for downstream handlers. Handlers evaluate the admin predicate against
//! these verified claims only, never against request input.
//!
//! # Extracting claims
//!
//! ```rust,no_run
//! use axum::extract::Extension;
//! use riddle_hunt::auth::AccessClaims;
//!
//! async fn protected_handler(Extension(claims): Extension<AccessClaims>) -> String {
//!     format!("Authenticated as user {}", claims.sub)
//! }
//! # let _ = protected_handler;
//! ```

use axum::{
    extract::{Request, State},
    http::{StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};

use super::AppState;

/// Validate the bearer access token and inject its claims.
///
/// - **Success**: claims injected into extensions, next handler runs
/// - **Missing header / bad format / invalid or expired token**: `401`
///
/// Verification is stateless; the revocation list is deliberately not
/// consulted here — it gates refresh tokens only.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let token = match auth_header {
        Some(t) => t,
        None => return Err(StatusCode::UNAUTHORIZED),
    };

    match state.auth_manager.verify_access_token(token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            Ok(next.run(request).await)
        }
        Err(_) => Err(StatusCode::UNAUTHORIZED),
    }
}
