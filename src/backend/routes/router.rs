/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Route Families
 *
 * 1. Storefront auth routes (`/api/auth/...`) - session-proof family
 * 2. Admin routes (`/api/admin/...`) - token-proof family
 * 3. Order routes (`/api/orders/...`) - token proof + permission gates
 *
 * Requests and responses are traced via `TraceLayer`; unknown paths fall
 * through to a JSON 404.
 */

use axum::{http::StatusCode, response::Json, Router};
use tower_http::trace::TraceLayer;

use crate::backend::routes::admin_routes::configure_admin_routes;
use crate::backend::routes::auth_routes::configure_auth_routes;
use crate::backend::routes::order_routes::configure_order_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured.
///
/// # Arguments
///
/// * `app_state` - Application state containing the stores and services
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new();

    // Route families; each attaches its own middleware.
    let router = configure_auth_routes(router, &app_state);
    let router = configure_admin_routes(router, &app_state);
    let router = configure_order_routes(router, &app_state);

    router
        .fallback(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({ "message": "Not found" })),
            )
        })
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
