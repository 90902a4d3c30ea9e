//! Backend Error Module
//!
//! This module defines error types specific to the backend server.
//! These errors are used in HTTP handlers and middleware and can be
//! converted to HTTP responses.
//!
//! # Architecture
//!
//! The error module is organized into focused submodules:
//!
//! - **`types`** - Error type definitions and constructors
//! - **`conversion`** - Error conversion implementations (IntoResponse, etc.)
//!
//! # Error Taxonomy
//!
//! - `Validation` - missing or malformed input fields, reported with
//!   field-level detail
//! - `Conflict` - duplicate username/email, reported with which field
//! - `AuthInvalid` - bad credentials or token; always generic, never
//!   reveals which check failed
//! - `Forbidden` - authenticated but insufficient permission
//! - `Infrastructure` - store unavailable or another internal failure;
//!   reported generically, logged server-side with detail
//!
//! # HTTP Response Conversion
//!
//! `ApiError` implements `IntoResponse` from Axum, allowing handlers and
//! middleware to return it directly. Validation and conflict errors carry
//! structured 4xx bodies; credential and permission failures are opaque
//! 401/403 responses; infrastructure errors are opaque 500 responses.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::{ApiError, FieldErrors};
