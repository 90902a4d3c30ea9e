/**
 * Order Routes
 *
 * Route configuration for the order endpoints. Every route requires the
 * token proof plus one permission; the gates stack so authentication
 * always runs before the permission check.
 *
 * # Routes
 *
 * - `POST  /api/orders` - Create order (`PLACE_ORDER`)
 * - `GET   /api/orders/email/{email}` - Orders for a customer (`VIEW_ORDERS`)
 * - `GET   /api/orders/admin/all` - All orders (`MANAGE_USERS`)
 * - `PATCH /api/orders/admin/{id}/status` - Update status (`MANAGE_USERS`)
 */

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

use crate::backend::middleware::auth::{require_auth, TokenProof};
use crate::backend::middleware::roles::{require_permission, Permission};
use crate::backend::orders::handlers::{
    create_order, get_all_orders, get_orders_by_email, update_order_status,
};
use crate::backend::server::state::AppState;

/// Configure the order routes.
///
/// The token-proof layer wraps the whole family (outermost, runs first);
/// each route adds its own permission gate inside it.
pub fn configure_order_routes(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    let order_router = Router::new()
        .route(
            "/api/orders",
            post(create_order)
                .layer(middleware::from_fn(require_permission(Permission::PlaceOrder))),
        )
        .route(
            "/api/orders/email/{email}",
            get(get_orders_by_email)
                .layer(middleware::from_fn(require_permission(Permission::ViewOrders))),
        )
        .route(
            "/api/orders/admin/all",
            get(get_all_orders)
                .layer(middleware::from_fn(require_permission(Permission::ManageUsers))),
        )
        .route(
            "/api/orders/admin/{id}/status",
            patch(update_order_status)
                .layer(middleware::from_fn(require_permission(Permission::ManageUsers))),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth::<TokenProof>,
        ));

    router.merge(order_router)
}
