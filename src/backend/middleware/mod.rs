//! Middleware Module
//!
//! This module contains all HTTP middleware for the backend server.
//! Middleware runs before handlers: authentication resolves a credential
//! proof to a typed identity, authorization checks that identity's role
//! against a required permission.
//!
//! # Architecture
//!
//! - **`auth`** - Credential proofs (token, session) and the
//!   `require_auth` middleware that attaches an `Identity` to the request
//! - **`roles`** - Permission sets per role and the `require_permission`
//!   gate
//!
//! A protected route stacks them in order: `require_auth` first (401 on
//! failure), then optionally `require_permission` (403 on failure).

pub mod auth;
pub mod roles;

pub use auth::{
    require_auth, AuthUser, CredentialProof, Identity, SessionIdentity, SessionProof, SessionUser,
    TokenIdentity, TokenProof,
};
pub use roles::{has_permission, permissions, require_permission, Permission};
