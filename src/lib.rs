//! Bookstore - Main Library
//!
//! Bookstore is the REST backend for a small online bookstore, built with
//! Rust and Axum. The React storefront consumes this API over HTTP; this
//! crate contains everything that runs on the server.
//!
//! # Overview
//!
//! This library provides the core functionality for the bookstore backend,
//! including:
//! - User and admin registration and login
//! - Stateless JWT authentication for the admin dashboard and API clients
//! - Cookie-backed server-side sessions for the storefront
//! - Role-based permission checks over the order endpoints
//! - PostgreSQL persistence with an in-memory fallback for development
//!
//! # Module Structure
//!
//! The library is organized around a single top-level module:
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP server setup, routing and application state
//!   - Authentication (passwords, tokens, sessions, user store)
//!   - Authorization middleware (roles and permissions)
//!   - Order management endpoints
//!   - Error types and HTTP response conversion
//!
//! # Usage
//!
//! ```rust,no_run
//! use bookstore::backend::server::config::ServerConfig;
//! use bookstore::backend::server::init::create_app;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env()?;
//! let app = create_app(&config).await;
//! // Use app with an Axum server
//! # Ok(())
//! # }
//! ```

/// Server-side code
pub mod backend;
