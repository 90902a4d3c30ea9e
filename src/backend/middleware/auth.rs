/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require an
 * authenticated caller. Two credential proofs exist:
 *
 * - **Token proof**: a JWT from the `Authorization: Bearer` header or the
 *   HTTP-only `token` cookie, verified by the token service.
 * - **Session proof**: a `sessionId` cookie resolved against the
 *   server-side session store.
 *
 * Each protected route family is wired to exactly one proof via
 * `require_auth::<TokenProof>` or `require_auth::<SessionProof>`. On
 * success the middleware attaches a typed `Identity` to the request
 * extensions; handlers and the permission gate read it from there. Every
 * verification failure is rejected with the same generic 401 before the
 * handler runs.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::future::Future;
use uuid::Uuid;

use crate::backend::auth::cookies::{parse_cookie, SESSION_COOKIE, TOKEN_COOKIE};
use crate::backend::auth::users::Role;
use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;

/// Identity proven by a verified token: the decoded claims.
#[derive(Clone, Debug)]
pub struct TokenIdentity {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
}

/// Identity proven by a live session: the session lookup result.
#[derive(Clone, Debug)]
pub struct SessionIdentity {
    pub user_id: Uuid,
}

/// Request-scoped identity context attached by the middleware.
///
/// The two variants are deliberately not interchangeable: a session
/// carries no role, so it can never satisfy a permission gate, and a
/// token never touches the session store.
#[derive(Clone, Debug)]
pub enum Identity {
    Token(TokenIdentity),
    Session(SessionIdentity),
}

/// A verifiable credential carried by an inbound request.
///
/// Implementations resolve the credential in `headers` to the identity it
/// proves, or reject. Route configuration picks the implementation; there
/// is no fallback from one proof to the other, and no variant that skips
/// verification.
pub trait CredentialProof: Send + 'static {
    fn verify(
        state: &AppState,
        headers: &HeaderMap,
    ) -> impl Future<Output = Result<Identity, ApiError>> + Send;
}

/// Stateless proof: a signed bearer token.
pub struct TokenProof;

impl CredentialProof for TokenProof {
    async fn verify(state: &AppState, headers: &HeaderMap) -> Result<Identity, ApiError> {
        // Authorization header first, then the HTTP-only cookie set by
        // the admin cookie login.
        let token = bearer_token(headers)
            .or_else(|| parse_cookie(headers, TOKEN_COOKIE))
            .ok_or_else(|| {
                tracing::warn!("Missing bearer token");
                ApiError::AuthInvalid
            })?;

        let claims = state.tokens.verify(&token).map_err(|e| {
            tracing::warn!("Token rejected: {}", e);
            ApiError::AuthInvalid
        })?;

        let id = Uuid::parse_str(&claims.sub).map_err(|_| {
            tracing::warn!("Token subject is not a user id");
            ApiError::AuthInvalid
        })?;

        Ok(Identity::Token(TokenIdentity {
            id,
            username: claims.username,
            role: claims.role,
        }))
    }
}

/// Stateful proof: a server-side session named by a cookie.
pub struct SessionProof;

impl CredentialProof for SessionProof {
    async fn verify(state: &AppState, headers: &HeaderMap) -> Result<Identity, ApiError> {
        let session_id = parse_cookie(headers, SESSION_COOKIE).ok_or_else(|| {
            tracing::warn!("Missing session cookie");
            ApiError::AuthInvalid
        })?;

        let record = state.sessions.get(&session_id).await.ok_or_else(|| {
            tracing::warn!("Unknown or expired session");
            ApiError::AuthInvalid
        })?;

        Ok(Identity::Session(SessionIdentity {
            user_id: record.user_id,
        }))
    }
}

/// Authentication middleware, generic over the credential proof.
///
/// Wire with `middleware::from_fn_with_state(state, require_auth::<TokenProof>)`
/// (or `SessionProof`). Verifies the credential, attaches the resolved
/// `Identity` to the request extensions, and passes the request on.
/// Rejects with 401 on any verification failure.
pub async fn require_auth<P: CredentialProof>(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = P::verify(&state, request.headers()).await?;
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// Extract a bearer token from the Authorization header.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.to_string())
}

/// Axum extractor for the token-proven identity.
///
/// Usable as a handler parameter on routes behind
/// `require_auth::<TokenProof>`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub TokenIdentity);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Identity>() {
            Some(Identity::Token(user)) => Ok(AuthUser(user.clone())),
            _ => {
                tracing::warn!("Token identity not found in request extensions");
                Err(ApiError::AuthInvalid)
            }
        }
    }
}

/// Axum extractor for the session-proven identity.
///
/// Usable as a handler parameter on routes behind
/// `require_auth::<SessionProof>`.
#[derive(Clone, Debug)]
pub struct SessionUser(pub SessionIdentity);

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Identity>() {
            Some(Identity::Session(session)) => Ok(SessionUser(session.clone())),
            _ => {
                tracing::warn!("Session identity not found in request extensions");
                Err(ApiError::AuthInvalid)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::users::User;
    use axum::http::HeaderValue;
    use chrono::Utc;

    fn test_state() -> AppState {
        AppState::in_memory("test-signing-secret", 4)
    }

    fn test_user(role: Role) -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "$2b$04$hash".to_string(),
            role,
            created_at: now,
            updated_at: now,
        }
    }

    fn bearer_headers(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        headers
    }

    #[tokio::test]
    async fn test_token_proof_from_header() {
        let state = test_state();
        let user = test_user(Role::User);
        let token = state.tokens.issue(&user).unwrap();

        let identity = TokenProof::verify(&state, &bearer_headers(&token))
            .await
            .unwrap();

        match identity {
            Identity::Token(t) => {
                assert_eq!(t.id, user.id);
                assert_eq!(t.username, "alice");
                assert_eq!(t.role, Role::User);
            }
            Identity::Session(_) => panic!("Expected token identity"),
        }
    }

    #[tokio::test]
    async fn test_token_proof_from_cookie() {
        let state = test_state();
        let user = test_user(Role::Admin);
        let token = state.tokens.issue(&user).unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            "cookie",
            HeaderValue::from_str(&format!("token={}", token)).unwrap(),
        );

        assert!(TokenProof::verify(&state, &headers).await.is_ok());
    }

    #[tokio::test]
    async fn test_token_proof_rejects_garbage() {
        let state = test_state();

        let result = TokenProof::verify(&state, &bearer_headers("not.a.token")).await;
        assert!(matches!(result, Err(ApiError::AuthInvalid)));

        let result = TokenProof::verify(&state, &HeaderMap::new()).await;
        assert!(matches!(result, Err(ApiError::AuthInvalid)));
    }

    #[tokio::test]
    async fn test_token_proof_rejects_expired() {
        let state = test_state();
        let user = test_user(Role::User);
        let token = state.tokens.issue_with_ttl(&user, -2 * 60 * 60).unwrap();

        let result = TokenProof::verify(&state, &bearer_headers(&token)).await;
        assert!(matches!(result, Err(ApiError::AuthInvalid)));
    }

    #[tokio::test]
    async fn test_session_proof() {
        let state = test_state();
        let user_id = Uuid::new_v4();
        let session_id = state.sessions.create(user_id).await;

        let mut headers = HeaderMap::new();
        headers.insert(
            "cookie",
            HeaderValue::from_str(&format!("sessionId={}", session_id)).unwrap(),
        );

        let identity = SessionProof::verify(&state, &headers).await.unwrap();
        match identity {
            Identity::Session(s) => assert_eq!(s.user_id, user_id),
            Identity::Token(_) => panic!("Expected session identity"),
        }
    }

    #[tokio::test]
    async fn test_session_proof_rejects_destroyed_session() {
        let state = test_state();
        let session_id = state.sessions.create(Uuid::new_v4()).await;
        state.sessions.remove(&session_id).await;

        let mut headers = HeaderMap::new();
        headers.insert(
            "cookie",
            HeaderValue::from_str(&format!("sessionId={}", session_id)).unwrap(),
        );

        let result = SessionProof::verify(&state, &headers).await;
        assert!(matches!(result, Err(ApiError::AuthInvalid)));
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(
            bearer_token(&bearer_headers("abc")),
            Some("abc".to_string())
        );

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(bearer_token(&headers), None);
    }
}
