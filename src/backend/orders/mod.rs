//! Order Management
//!
//! The protected resource family of the API. Customers place orders and
//! view their own; admins list everything and update fulfillment status.
//! Access control lives entirely in the route configuration (token proof
//! plus a permission per route); this module is the model, the store and
//! the handlers.

/// Order model and store
pub mod store;

/// HTTP handlers for order endpoints
pub mod handlers;

// Re-export commonly used types
pub use handlers::{create_order, get_all_orders, get_orders_by_email, update_order_status};
pub use store::{MemoryOrderStore, NewOrder, Order, OrderStore, PgOrderStore};
