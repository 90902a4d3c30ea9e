/**
 * Role-Based Authorization
 *
 * This module maps roles to permission sets and provides the
 * `require_permission` gate applied to protected routes. Permission
 * resolution is a pure table lookup over the role already attached to
 * the request; it consults no external state.
 */

use axum::{extract::Request, middleware::Next, response::Response};
use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::backend::auth::users::Role;
use crate::backend::error::ApiError;
use crate::backend::middleware::auth::Identity;

/// Enumerated capabilities checked against a role's permission set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Create an order
    PlaceOrder,
    /// View orders by customer email
    ViewOrders,
    /// Administrative access: all orders, status updates
    ManageUsers,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Permission::PlaceOrder => "PLACE_ORDER",
            Permission::ViewOrders => "VIEW_ORDERS",
            Permission::ManageUsers => "MANAGE_USERS",
        };
        f.write_str(name)
    }
}

/// The permission set granted to a role.
pub fn permissions(role: Role) -> &'static [Permission] {
    match role {
        Role::Admin => &[
            Permission::PlaceOrder,
            Permission::ViewOrders,
            Permission::ManageUsers,
        ],
        // Customers place orders and view their own; the order routes
        // scope the view to the caller's email family.
        Role::User => &[Permission::PlaceOrder, Permission::ViewOrders],
    }
}

/// Whether a role's permission set contains a permission.
pub fn has_permission(role: Role, permission: Permission) -> bool {
    permissions(role).contains(&permission)
}

/// Permission check middleware.
///
/// Expects an `Identity` already attached by the authentication
/// middleware; a request that reaches this gate without one is rejected
/// with 401. A session identity carries no role and can never pass a
/// permission gate, so only token-authenticated route families use this.
///
/// # Usage
///
/// ```ignore
/// use axum::middleware;
/// Router::new()
///     .route("/api/orders", post(create_order)
///         .layer(middleware::from_fn(require_permission(Permission::PlaceOrder))));
/// ```
pub fn require_permission(
    permission: Permission,
) -> impl Fn(Request, Next) -> Pin<Box<dyn Future<Output = Result<Response, ApiError>> + Send>> + Clone
{
    move |request: Request, next: Next| {
        Box::pin(async move {
            let identity = request
                .extensions()
                .get::<Identity>()
                .ok_or(ApiError::AuthInvalid)?;

            let role = match identity {
                Identity::Token(user) => user.role,
                Identity::Session(_) => {
                    tracing::warn!("Session credential presented to a permission-gated route");
                    return Err(ApiError::Forbidden);
                }
            };

            if !has_permission(role, permission) {
                tracing::warn!("Permission denied: role {} lacks {}", role, permission);
                return Err(ApiError::Forbidden);
            }

            Ok(next.run(request).await)
        })
    }
}
