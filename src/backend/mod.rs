//! Backend Module
//!
//! This module contains all server-side code for the bookstore application.
//! It provides a complete Axum HTTP server with authentication, role-based
//! authorization, and order management.
//!
//! # Overview
//!
//! The backend module includes:
//! - Axum HTTP server setup and configuration
//! - User/admin registration and login flows
//! - JWT token issuance and verification
//! - Cookie-backed server-side sessions
//! - Permission-gated order endpoints
//! - PostgreSQL persistence (with in-memory fallback)
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Passwords, tokens, sessions, user store, auth handlers
//! - **`middleware`** - Authentication and authorization middleware
//! - **`orders`** - Order model, store and handlers
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── middleware/     - Request middleware
//! ├── orders/         - Order management
//! └── error/          - Error types
//! ```
//!
//! # Authentication Model
//!
//! Two independent credential proofs coexist, selected per route family:
//!
//! - **Token proof**: a signed JWT carried in the `Authorization` header or
//!   in an HTTP-only `token` cookie. Stateless; validity is proven by the
//!   signature and the embedded expiry alone. Used by the admin dashboard
//!   and the order API.
//! - **Session proof**: a `sessionId` cookie naming a server-side session
//!   record. Stateful; sessions are regenerated on login and destroyed on
//!   logout. Used by the storefront login.
//!
//! A route requires exactly one of the two; they are never combined.
//!
//! # State Management
//!
//! Shared state (`AppState`) carries the credential store, order store,
//! session store, token service and password hasher. All of it is cheap to
//! clone and safe for concurrent access; the session store wraps its map in
//! `Arc<RwLock<>>` and the database pool is internally pooled.
//!
//! # Error Handling
//!
//! Handlers return `ApiError`, which implements `IntoResponse` and maps
//! each error class to a fixed HTTP status and JSON body. Credential
//! failures are deliberately indistinguishable from one another in the
//! response.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Authentication: passwords, tokens, sessions, users
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Order management
pub mod orders;

/// Backend error types
pub mod error;

// Re-export commonly used types
pub use error::ApiError;
pub use server::state::AppState;
