//! Authentication module providing user registration, login, and session management.
//!
//! This module implements secure authentication with:
//! - Argon2id password hashing with server-side pepper
//! - JWT access tokens (15-minute expiry, stateless verification)
//! - JWT refresh tokens (7-day expiry) revocable by `jti`
//! - A store-backed revocation list that gates refresh, pruned as the
//!   underlying tokens expire
//!
//! ## Example
//!
//! ```no_run
//! use riddle_hunt::auth::{AuthManager, RegisterRequest};
//! use riddle_hunt::db::Database;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&Default::default()).await?;
//!     let auth = AuthManager::new(
//!         Arc::new(db.pool().clone()),
//!         "secret_pepper".to_string(),
//!         "jwt_secret".to_string(),
//!     );
//!
//!     let request = RegisterRequest {
//!         username: "player1".to_string(),
//!         password: "SecurePass123".to_string(),
//!     };
//!
//!     let user = auth.register(request).await?;
//!     println!("Registered user: {}", user.username);
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod manager;
pub mod models;
pub mod tokens;

pub use errors::{AuthError, AuthResult};
pub use manager::AuthManager;
pub use models::{LoginRequest, RegisterRequest, SessionTokens, User, UserId};
pub use tokens::{AccessClaims, CLAIMS_VERSION, RefreshClaims, TokenIssuer};
