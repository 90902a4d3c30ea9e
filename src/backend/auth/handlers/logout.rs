/**
 * Logout Handler
 *
 * Logout destroys whichever credentials the request carries: the
 * server-side session named by the `sessionId` cookie is removed, and
 * both credential cookies are expired. Stateless tokens cannot be
 * revoked; clearing the cookie plus the 1-hour expiry is the bound on
 * their remaining life.
 *
 * The operation is idempotent: a request with no credentials, or with
 * ones already destroyed, still succeeds.
 */

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap},
    response::Json,
};

use crate::backend::auth::cookies::{clear_cookie, parse_cookie, SESSION_COOKIE, TOKEN_COOKIE};
use crate::backend::auth::handlers::types::MessageResponse;
use crate::backend::server::state::AppState;

/// Logout handler for POST /api/auth/logout. Always returns 200.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> (HeaderMap, Json<MessageResponse>) {
    if let Some(session_id) = parse_cookie(&headers, SESSION_COOKIE) {
        state.sessions.remove(&session_id).await;
        tracing::info!("Session destroyed on logout");
    }

    let mut response_headers = HeaderMap::new();
    response_headers.append(SET_COOKIE, clear_cookie(SESSION_COOKIE));
    response_headers.append(SET_COOKIE, clear_cookie(TOKEN_COOKIE));

    (
        response_headers,
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    )
}
