//! Authentication error types.

use thiserror::Error;

/// Authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing failed
    #[error("Password hashing failed")]
    HashingFailed,

    /// Login failed. Deliberately covers both an unknown username and a
    /// wrong password so the response never reveals which one it was.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Username already exists
    #[error("Username already exists")]
    UsernameTaken,

    /// Invalid username format
    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    /// Password too weak
    #[error("Password too weak: {0}")]
    WeakPassword(String),

    /// JWT token error
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Token was signed with a claim schema this build does not speak
    #[error("Unsupported token claims version: {0}")]
    UnsupportedClaimsVersion(u8),

    /// Refresh token expired, malformed, or not issued by this service
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    /// Refresh token's jti is on the revocation list
    #[error("Refresh token has been revoked")]
    TokenRevoked,

    /// User referenced by a token no longer exists
    #[error("User not found")]
    UserNotFound,
}

impl AuthError {
    /// Get a client-safe error message that doesn't leak sensitive information
    ///
    /// Database and JWT errors are sanitized to prevent information disclosure
    /// about the internal system structure.
    pub fn client_message(&self) -> String {
        match self {
            AuthError::Database(_) => "Internal server error".to_string(),
            AuthError::Jwt(_) => "Authentication failed".to_string(),
            AuthError::UnsupportedClaimsVersion(_) => "Authentication failed".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;
