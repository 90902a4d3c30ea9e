/**
 * Token Issuance and Verification
 *
 * This module handles JWT creation and validation. Tokens are the
 * stateless credential proof: nothing is stored server-side, validity is
 * the HMAC signature plus the embedded expiry.
 *
 * The signing secret is injected at construction. Configuration loading
 * refuses to start the process without one, so a constructed
 * `TokenService` always has a usable key and issuance never has to check
 * for a missing secret per call.
 */

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

use crate::backend::auth::users::{Role, User};

/// Token lifetime: one hour from issuance.
pub const TOKEN_TTL_SECS: i64 = 60 * 60;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Username
    pub username: String,
    /// Role at issuance time
    pub role: Role,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

/// Why a token failed verification.
///
/// The distinction exists for logging only; every variant maps to the
/// same opaque invalid-credentials response at the HTTP boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Not a decodable JWT at all
    #[error("malformed token")]
    Malformed,
    /// Decodable but not signed with our key
    #[error("invalid token signature")]
    InvalidSignature,
    /// Validly signed but past its expiry
    #[error("token expired")]
    Expired,
}

/// Issues and verifies signed bearer tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    /// Create a token service from the configured signing secret.
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_ref()),
            decoding: DecodingKey::from_secret(secret.as_ref()),
        }
    }

    /// Issue a token for a user with the standard one-hour lifetime.
    ///
    /// # Returns
    ///
    /// The signed JWT string, carrying `{id, username, role}` claims.
    pub fn issue(&self, user: &User) -> Result<String, jsonwebtoken::errors::Error> {
        self.issue_with_ttl(user, TOKEN_TTL_SECS)
    }

    /// Issue a token with an explicit lifetime in seconds.
    ///
    /// A non-positive `ttl_secs` produces an already-expired token; the
    /// expiry tests rely on this.
    pub fn issue_with_ttl(
        &self,
        user: &User,
        ttl_secs: i64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before Unix epoch")
            .as_secs();

        let exp = (now as i64 + ttl_secs).max(0) as u64;

        let claims = Claims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            role: user.role,
            iat: now,
            exp,
        };

        encode(&Header::default(), &claims, &self.encoding)
    }

    /// Verify a token's signature and expiry and decode its claims.
    ///
    /// # Errors
    ///
    /// Classified as `Malformed`, `InvalidSignature` or `Expired`. Callers
    /// at the HTTP boundary must collapse all three into the same generic
    /// rejection.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let validation = Validation::default();

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            })
    }
}
