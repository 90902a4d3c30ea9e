/**
 * Session Login and Profile Handlers
 *
 * This module implements the stateful login path used by the storefront:
 * email and password in, a regenerated server-side session out, proven to
 * later requests by the `sessionId` cookie.
 *
 * # Session Fixation
 *
 * Login always creates a fresh session id and only then invalidates the
 * one presented in the request cookie, if any. An id minted before login
 * can therefore never name an authenticated session, and the caller is
 * never left without a valid session mid-login.
 */

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap},
    response::Json,
};

use crate::backend::auth::cookies::{parse_cookie, session_cookie, SESSION_COOKIE};
use crate::backend::auth::handlers::types::{
    ProfileResponse, SessionLoginRequest, SessionResponse, SessionUserSummary,
};
use crate::backend::error::ApiError;
use crate::backend::middleware::auth::SessionUser;
use crate::backend::server::state::AppState;

/// Session login handler for POST /api/auth/session.
///
/// # Errors
///
/// * `401 Unauthorized` - unknown email or wrong password, identically
/// * `500 Internal Server Error` - store or hasher failure
pub async fn session_login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<SessionLoginRequest>,
) -> Result<(HeaderMap, Json<SessionResponse>), ApiError> {
    tracing::info!("Session login request for: {}", request.email);

    let user = state
        .store
        .find_by_email(&request.email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Session login failed for unknown email: {}", request.email);
            ApiError::AuthInvalid
        })?;

    let valid = state
        .hasher
        .verify(&request.password, &user.password_hash)
        .map_err(|e| {
            tracing::error!("Password verification error: {:?}", e);
            ApiError::infrastructure(e)
        })?;

    if !valid {
        tracing::warn!("Invalid password for email: {}", request.email);
        return Err(ApiError::AuthInvalid);
    }

    // Regenerate: the new session must exist before the old id dies.
    let session_id = state.sessions.create(user.id).await;
    if let Some(old_session_id) = parse_cookie(&headers, SESSION_COOKIE) {
        state.sessions.remove(&old_session_id).await;
    }

    let mut response_headers = HeaderMap::new();
    response_headers.insert(SET_COOKIE, session_cookie(&session_id));

    tracing::info!("Session created for user: {}", user.username);

    Ok((
        response_headers,
        Json(SessionResponse {
            message: "Logged in successfully".to_string(),
            user: SessionUserSummary { email: user.email },
        }),
    ))
}

/// Profile handler for GET /api/auth/profile.
///
/// Session-authenticated; resolves the session's user id back to the
/// stored record and returns it without sensitive fields.
pub async fn profile(
    State(state): State<AppState>,
    SessionUser(session): SessionUser,
) -> Result<Json<ProfileResponse>, ApiError> {
    let user = state
        .store
        .find_by_id(session.user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Session user no longer exists: {}", session.user_id);
            ApiError::AuthInvalid
        })?;

    Ok(Json(ProfileResponse {
        id: user.id.to_string(),
        username: user.username,
        email: user.email,
        role: user.role,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::users::{CredentialStore, NewUser, Role};
    use axum::http::HeaderValue;

    async fn state_with_user(email: &str, password: &str) -> AppState {
        let state = AppState::in_memory("test-signing-secret", 4);
        let password_hash = state.hasher.hash(password).unwrap();
        state
            .store
            .create(NewUser {
                username: "alice".to_string(),
                email: email.to_string(),
                password_hash,
                role: Role::User,
            })
            .await
            .unwrap();
        state
    }

    fn login_request(email: &str, password: &str) -> SessionLoginRequest {
        SessionLoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn cookie_value(headers: &HeaderMap) -> String {
        let cookie = headers.get(SET_COOKIE).unwrap().to_str().unwrap();
        let pair = cookie.split(';').next().unwrap();
        pair.split_once('=').unwrap().1.to_string()
    }

    #[tokio::test]
    async fn test_session_login_success() {
        let state = state_with_user("a@x.com", "Abc12345!").await;

        let (headers, Json(response)) = session_login(
            State(state.clone()),
            HeaderMap::new(),
            Json(login_request("a@x.com", "Abc12345!")),
        )
        .await
        .unwrap();

        assert_eq!(response.user.email, "a@x.com");

        let session_id = cookie_value(&headers);
        assert!(state.sessions.get(&session_id).await.is_some());
    }

    #[tokio::test]
    async fn test_session_login_wrong_password() {
        let state = state_with_user("a@x.com", "Abc12345!").await;

        let err = session_login(
            State(state),
            HeaderMap::new(),
            Json(login_request("a@x.com", "wrong")),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::AuthInvalid));
    }

    #[tokio::test]
    async fn test_login_regenerates_session() {
        let state = state_with_user("a@x.com", "Abc12345!").await;

        // First login.
        let (headers, _) = session_login(
            State(state.clone()),
            HeaderMap::new(),
            Json(login_request("a@x.com", "Abc12345!")),
        )
        .await
        .unwrap();
        let first_id = cookie_value(&headers);

        // Second login presenting the first session's cookie.
        let mut request_headers = HeaderMap::new();
        request_headers.insert(
            "cookie",
            HeaderValue::from_str(&format!("sessionId={}", first_id)).unwrap(),
        );
        let (headers, _) = session_login(
            State(state.clone()),
            request_headers,
            Json(login_request("a@x.com", "Abc12345!")),
        )
        .await
        .unwrap();
        let second_id = cookie_value(&headers);

        assert_ne!(first_id, second_id);
        assert!(state.sessions.get(&first_id).await.is_none());
        assert!(state.sessions.get(&second_id).await.is_some());
    }

    #[tokio::test]
    async fn test_failed_login_leaves_no_session() {
        let state = state_with_user("a@x.com", "Abc12345!").await;

        let _ = session_login(
            State(state.clone()),
            HeaderMap::new(),
            Json(login_request("a@x.com", "wrong")),
        )
        .await;

        assert!(state.sessions.is_empty().await);
    }
}
