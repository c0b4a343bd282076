//! JWT issuing and verification for access and refresh credentials.
//!
//! Token issuance is pure: nothing here touches the database. The manager
//! layers the revocation-list check on top for refresh tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{AuthError, AuthResult};
use super::models::UserId;

/// Version stamped into every claim set this service signs. Verification
/// rejects any other version, so a claim-schema change invalidates older
/// tokens loudly instead of silently misreading them.
pub const CLAIMS_VERSION: u8 = 1;

/// Claims carried by short-lived access tokens.
///
/// Access tokens are verified statelessly and are never checked against the
/// revocation list; expiry is their sole revocation mechanism.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessClaims {
    pub sub: UserId,
    pub username: String,
    pub is_admin: bool,
    pub ver: u8,
    pub exp: i64,
    pub iat: i64,
}

/// Claims carried by refresh tokens. The `jti` is the revocation key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: UserId,
    pub username: String,
    pub jti: Uuid,
    pub ver: u8,
    pub exp: i64,
    pub iat: i64,
}

/// Stateless JWT issuer and verifier (HS256).
#[derive(Clone)]
pub struct TokenIssuer {
    jwt_secret: String,
    access_token_duration: Duration,
    refresh_token_duration: Duration,
}

impl TokenIssuer {
    /// Create an issuer with the default token lifetimes
    /// (15-minute access tokens, 7-day refresh tokens).
    pub fn new(jwt_secret: String) -> Self {
        Self {
            jwt_secret,
            access_token_duration: Duration::minutes(15),
            refresh_token_duration: Duration::days(7),
        }
    }

    /// Issue an access token carrying identity and the admin claim.
    ///
    /// The admin claim is set exclusively here, from store-backed data; it
    /// is never accepted from request input.
    pub fn issue_access_token(
        &self,
        user_id: UserId,
        username: &str,
        is_admin: bool,
    ) -> AuthResult<String> {
        let now = Utc::now();
        let claims = AccessClaims {
            sub: user_id,
            username: username.to_string(),
            is_admin,
            ver: CLAIMS_VERSION,
            exp: (now + self.access_token_duration).timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Issue a refresh token with a freshly generated `jti`.
    pub fn issue_refresh_token(&self, user_id: UserId, username: &str) -> AuthResult<String> {
        let now = Utc::now();
        let claims = RefreshClaims {
            sub: user_id,
            username: username.to_string(),
            jti: Uuid::new_v4(),
            ver: CLAIMS_VERSION,
            exp: (now + self.refresh_token_duration).timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Verify an access token and return its claims.
    pub fn verify_access_token(&self, token: &str) -> AuthResult<AccessClaims> {
        let data = decode::<AccessClaims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )?;

        if data.claims.ver != CLAIMS_VERSION {
            return Err(AuthError::UnsupportedClaimsVersion(data.claims.ver));
        }

        Ok(data.claims)
    }

    /// Verify a refresh token's signature, expiry, and claim version.
    ///
    /// Any decode failure collapses into `InvalidRefreshToken`; the caller
    /// is responsible for consulting the revocation list.
    pub fn verify_refresh_token(&self, token: &str) -> AuthResult<RefreshClaims> {
        let data = decode::<RefreshClaims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AuthError::InvalidRefreshToken)?;

        if data.claims.ver != CLAIMS_VERSION {
            return Err(AuthError::InvalidRefreshToken);
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("test_secret_key_for_tokens".to_string())
    }

    #[test]
    fn access_token_round_trip() {
        let issuer = issuer();
        let token = issuer.issue_access_token(42, "alice", true).unwrap();
        let claims = issuer.verify_access_token(&token).unwrap();

        assert_eq!(claims.sub, 42);
        assert_eq!(claims.username, "alice");
        assert!(claims.is_admin);
        assert_eq!(claims.ver, CLAIMS_VERSION);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn refresh_tokens_carry_distinct_jtis() {
        let issuer = issuer();
        let first = issuer.issue_refresh_token(1, "alice").unwrap();
        let second = issuer.issue_refresh_token(1, "alice").unwrap();

        let first = issuer.verify_refresh_token(&first).unwrap();
        let second = issuer.verify_refresh_token(&second).unwrap();
        assert_ne!(first.jti, second.jti);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issuer().issue_access_token(1, "alice", false).unwrap();
        let other = TokenIssuer::new("a_completely_different_secret".to_string());

        assert!(other.verify_access_token(&token).is_err());
        let refresh = issuer().issue_refresh_token(1, "alice").unwrap();
        assert!(matches!(
            other.verify_refresh_token(&refresh),
            Err(AuthError::InvalidRefreshToken)
        ));
    }

    #[test]
    fn access_token_is_not_a_refresh_token() {
        let issuer = issuer();
        let access = issuer.issue_access_token(1, "alice", false).unwrap();

        // Missing jti claim, so refresh verification must fail.
        assert!(matches!(
            issuer.verify_refresh_token(&access),
            Err(AuthError::InvalidRefreshToken)
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let issuer = issuer();
        let now = Utc::now();
        // Expired well past the default decode leeway.
        let claims = AccessClaims {
            sub: 1,
            username: "alice".to_string(),
            is_admin: false,
            ver: CLAIMS_VERSION,
            exp: (now - Duration::hours(2)).timestamp(),
            iat: (now - Duration::hours(3)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test_secret_key_for_tokens".as_bytes()),
        )
        .unwrap();

        assert!(issuer.verify_access_token(&token).is_err());
    }

    #[test]
    fn future_claims_version_is_rejected() {
        let issuer = issuer();
        let now = Utc::now();
        let claims = AccessClaims {
            sub: 1,
            username: "alice".to_string(),
            is_admin: false,
            ver: CLAIMS_VERSION + 1,
            exp: (now + Duration::minutes(15)).timestamp(),
            iat: now.timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test_secret_key_for_tokens".as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            issuer.verify_access_token(&token),
            Err(AuthError::UnsupportedClaimsVersion(_))
        ));
    }
}
