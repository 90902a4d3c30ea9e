//! Routes Module
//!
//! HTTP route configuration, split by family:
//!
//! - **`router`** - Top-level router assembly
//! - **`auth_routes`** - Storefront authentication endpoints
//! - **`admin_routes`** - Dashboard endpoints
//! - **`order_routes`** - Permission-gated order endpoints

/// Top-level router assembly
pub mod router;

/// Storefront auth routes
pub mod auth_routes;

/// Admin routes
pub mod admin_routes;

/// Order routes
pub mod order_routes;

pub use router::create_router;
