/**
 * Admin Routes
 *
 * Route configuration for the dashboard authentication endpoints. The
 * admin family authenticates with tokens only; sessions never reach it.
 *
 * # Routes
 *
 * - `POST /api/admin/register` - Admin registration (public)
 * - `POST /api/admin/login` - Admin token login, token in body (public)
 * - `POST /api/admin/auth` - Admin token login, token in HTTP-only cookie (public)
 * - `GET  /api/admin/verify` - Role check (token proof required)
 */

use axum::{middleware, routing::get, routing::post, Router};

use crate::backend::auth::handlers::{admin_cookie_login, login_admin, register_admin, verify_admin};
use crate::backend::middleware::auth::{require_auth, TokenProof};
use crate::backend::server::state::AppState;

/// Configure the admin routes.
pub fn configure_admin_routes(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    router
        .route("/api/admin/register", post(register_admin))
        .route("/api/admin/login", post(login_admin))
        .route("/api/admin/auth", post(admin_cookie_login))
        .route(
            "/api/admin/verify",
            get(verify_admin).layer(middleware::from_fn_with_state(
                state.clone(),
                require_auth::<TokenProof>,
            )),
        )
}
