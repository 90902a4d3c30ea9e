/**
 * Storefront Auth Routes
 *
 * Route configuration for the customer-facing authentication endpoints.
 *
 * # Routes
 *
 * - `POST /api/auth/register` - User registration (public)
 * - `POST /api/auth/login` - Token login (public)
 * - `POST /api/auth/session` - Session login (public)
 * - `POST /api/auth/logout` - Logout (public, idempotent)
 * - `GET  /api/auth/profile` - Current user (session proof required)
 */

use axum::{middleware, routing::get, routing::post, Router};

use crate::backend::auth::handlers::{login_user, logout, profile, register_user, session_login};
use crate::backend::middleware::auth::{require_auth, SessionProof};
use crate::backend::server::state::AppState;

/// Configure the storefront auth routes.
///
/// The profile route is the only protected one here and uses the session
/// proof; everything else is public by nature.
pub fn configure_auth_routes(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    router
        .route("/api/auth/register", post(register_user))
        .route("/api/auth/login", post(login_user))
        .route("/api/auth/session", post(session_login))
        .route("/api/auth/logout", post(logout))
        .route(
            "/api/auth/profile",
            get(profile).layer(middleware::from_fn_with_state(
                state.clone(),
                require_auth::<SessionProof>,
            )),
        )
}
