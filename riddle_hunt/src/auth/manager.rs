//! Authentication manager implementation.

use super::{
    errors::{AuthError, AuthResult},
    models::{LoginRequest, RegisterRequest, SessionTokens, User},
    tokens::{AccessClaims, TokenIssuer},
};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Utc};
use log::{debug, info};
use sqlx::{PgPool, Row};
use std::sync::Arc;
use uuid::Uuid;

/// Authentication manager
///
/// Issues, refreshes, and revokes bearer credentials against the user store.
/// Token issuance is stateless; only revocation writes to the store.
#[derive(Clone)]
pub struct AuthManager {
    pool: Arc<PgPool>,
    pepper: String,
    issuer: TokenIssuer,
}

impl AuthManager {
    /// Create a new authentication manager
    ///
    /// # Arguments
    ///
    /// * `pool` - Database connection pool
    /// * `pepper` - Server-side pepper for password hashing
    /// * `jwt_secret` - Secret key for JWT signing
    pub fn new(pool: Arc<PgPool>, pepper: String, jwt_secret: String) -> Self {
        Self {
            pool,
            pepper,
            issuer: TokenIssuer::new(jwt_secret),
        }
    }

    /// Register a new user
    ///
    /// Usernames are unique; uniqueness is enforced by the store's unique
    /// index rather than a lookup, so two concurrent registrations of the
    /// same name cannot both succeed.
    ///
    /// # Errors
    ///
    /// * `AuthError::UsernameTaken` - Username already exists
    /// * `AuthError::InvalidUsername` - Username format invalid
    /// * `AuthError::WeakPassword` - Password too weak
    pub async fn register(&self, request: RegisterRequest) -> AuthResult<User> {
        self.validate_username(&request.username)?;
        self.validate_password(&request.password)?;

        let password_hash = self.hash_password(&request.password)?;

        let row = sqlx::query(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, is_admin, created_at
            "#,
        )
        .bind(&request.username)
        .bind(&password_hash)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => AuthError::UsernameTaken,
            _ => AuthError::from(e),
        })?;

        let user = User {
            id: row.get("id"),
            username: row.get("username"),
            is_admin: row.get("is_admin"),
            created_at: row.get::<chrono::NaiveDateTime, _>("created_at").and_utc(),
        };

        info!("Registered user {} (id {})", user.username, user.id);

        Ok(user)
    }

    /// Login a user
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidCredentials` - Unknown username or wrong
    ///   password; the two cases are indistinguishable to the caller
    pub async fn login(&self, request: LoginRequest) -> AuthResult<(User, SessionTokens)> {
        let user_row = sqlx::query(
            r#"
            SELECT id, username, password_hash, is_admin, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(&request.username)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

        let password_hash: String = user_row.get("password_hash");
        self.verify_password(&request.password, &password_hash)?;

        let user = User {
            id: user_row.get("id"),
            username: user_row.get("username"),
            is_admin: user_row.get("is_admin"),
            created_at: user_row
                .get::<chrono::NaiveDateTime, _>("created_at")
                .and_utc(),
        };

        let tokens = SessionTokens {
            access_token: self
                .issuer
                .issue_access_token(user.id, &user.username, user.is_admin)?,
            refresh_token: self.issuer.issue_refresh_token(user.id, &user.username)?,
        };

        Ok((user, tokens))
    }

    /// Mint a new access token from a valid refresh token
    ///
    /// The refresh token itself is not rotated. The admin claim is re-read
    /// from the store so it reflects the user's current role at refresh
    /// time, not the role at login time.
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidRefreshToken` - Expired, malformed, or foreign token
    /// * `AuthError::TokenRevoked` - Token's `jti` is on the revocation list
    /// * `AuthError::UserNotFound` - User behind the token no longer exists
    pub async fn refresh(&self, refresh_token: &str) -> AuthResult<String> {
        let claims = self.issuer.verify_refresh_token(refresh_token)?;

        if self.is_revoked(claims.jti).await? {
            return Err(AuthError::TokenRevoked);
        }

        let user_row = sqlx::query("SELECT username, is_admin FROM users WHERE id = $1")
            .bind(claims.sub)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let username: String = user_row.get("username");
        let is_admin: bool = user_row.get("is_admin");

        self.issuer.issue_access_token(claims.sub, &username, is_admin)
    }

    /// Revoke a refresh token by adding its `jti` to the revocation list
    ///
    /// Requires a currently valid token: an expired, malformed, or
    /// already-revoked token fails. Once present, an entry permanently
    /// invalidates refresh for that `jti`; there is no un-revocation.
    ///
    /// # Errors
    ///
    /// * `AuthError::InvalidRefreshToken` - Expired or malformed token
    /// * `AuthError::TokenRevoked` - Token was already revoked
    pub async fn revoke(&self, refresh_token: &str) -> AuthResult<()> {
        let claims = self.issuer.verify_refresh_token(refresh_token)?;

        if self.is_revoked(claims.jti).await? {
            return Err(AuthError::TokenRevoked);
        }

        let expires_at =
            DateTime::<Utc>::from_timestamp(claims.exp, 0).ok_or(AuthError::InvalidRefreshToken)?;

        sqlx::query(
            r#"
            INSERT INTO revoked_tokens (jti, expires_at)
            VALUES ($1, $2)
            ON CONFLICT (jti) DO NOTHING
            "#,
        )
        .bind(claims.jti)
        .bind(expires_at.naive_utc())
        .execute(self.pool.as_ref())
        .await?;

        info!("Revoked refresh token for user {}", claims.sub);

        Ok(())
    }

    /// Verify an access token and return its claims
    ///
    /// Stateless: no store lookup, and the revocation list is not consulted.
    /// The list only gates refresh tokens; access tokens simply expire.
    pub fn verify_access_token(&self, token: &str) -> AuthResult<AccessClaims> {
        self.issuer.verify_access_token(token)
    }

    /// Delete revocation entries whose token has itself expired
    ///
    /// A revoked `jti` only needs to be remembered while the token could
    /// still be presented, which bounds the size of the revocation set.
    /// Returns the number of entries removed.
    pub async fn prune_revoked(&self) -> AuthResult<u64> {
        let result = sqlx::query("DELETE FROM revoked_tokens WHERE expires_at < NOW()")
            .execute(self.pool.as_ref())
            .await?;

        let pruned = result.rows_affected();
        if pruned > 0 {
            debug!("Pruned {pruned} expired revocation entries");
        }

        Ok(pruned)
    }

    async fn is_revoked(&self, jti: Uuid) -> AuthResult<bool> {
        let row = sqlx::query("SELECT jti FROM revoked_tokens WHERE jti = $1")
            .bind(jti)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.is_some())
    }

    /// Hash password with Argon2id + pepper
    fn hash_password(&self, password: &str) -> AuthResult<String> {
        let peppered = format!("{}{}", password, self.pepper);
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        Ok(argon2
            .hash_password(peppered.as_bytes(), &salt)
            .map_err(|_| AuthError::HashingFailed)?
            .to_string())
    }

    /// Verify password against hash
    fn verify_password(&self, password: &str, hash: &str) -> AuthResult<()> {
        let peppered = format!("{}{}", password, self.pepper);
        let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
        let argon2 = Argon2::default();

        argon2
            .verify_password(peppered.as_bytes(), &parsed_hash)
            .map_err(|_| AuthError::InvalidCredentials)
    }

    /// Validate username format
    fn validate_username(&self, username: &str) -> AuthResult<()> {
        let len = username.len();
        if !(3..=20).contains(&len) {
            return Err(AuthError::InvalidUsername(
                "Username must be 3-20 characters".to_string(),
            ));
        }

        if !username.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(AuthError::InvalidUsername(
                "Username can only contain letters, numbers, and underscores".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate password strength
    fn validate_password(&self, password: &str) -> AuthResult<()> {
        if password.len() < 8 {
            return Err(AuthError::WeakPassword(
                "Password must be at least 8 characters".to_string(),
            ));
        }

        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        let has_uppercase = password.chars().any(|c| c.is_ascii_uppercase());
        let has_lowercase = password.chars().any(|c| c.is_ascii_lowercase());

        if !has_digit || !has_uppercase || !has_lowercase {
            return Err(AuthError::WeakPassword(
                "Password must contain at least one number, one uppercase and one lowercase letter"
                    .to_string(),
            ));
        }

        Ok(())
    }
}
