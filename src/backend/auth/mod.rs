//! Authentication Module
//!
//! This module handles registration, login, token and session lifecycle,
//! and the user store behind them.
//!
//! # Architecture
//!
//! The auth module is organized into focused submodules:
//!
//! - **`users`** - User model, roles, and the credential store
//! - **`password`** - bcrypt hashing and verification
//! - **`tokens`** - JWT issuance and verification
//! - **`sessions`** - Server-side session store
//! - **`cookies`** - Credential cookie names and helpers
//! - **`handlers`** - HTTP handlers for the auth endpoints
//!
//! # Authentication Flows
//!
//! 1. **Registration**: fields validated → uniqueness checked → password
//!    hashed → record persisted (201, no token)
//! 2. **Token login**: username+role lookup → password verified → signed
//!    JWT returned (or set as an HTTP-only cookie for the admin variant)
//! 3. **Session login**: email lookup → password verified → session
//!    regenerated → `sessionId` cookie set
//! 4. **Logout**: session destroyed, credential cookies cleared;
//!    idempotent
//!
//! # Security
//!
//! - Passwords are bcrypt-hashed before storage and never leave the server
//! - Tokens expire after 1 hour; sessions after 24
//! - Credential failures are generic: the response never says whether the
//!   account exists, the password was wrong, or the token expired
//! - Session ids are regenerated on every login to prevent fixation

/// User model, roles and credential store
pub mod users;

/// Password hashing
pub mod password;

/// JWT issuance and verification
pub mod tokens;

/// Server-side session store
pub mod sessions;

/// Credential cookie helpers
pub mod cookies;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types
pub use password::PasswordHasher;
pub use sessions::SessionStore;
pub use tokens::{Claims, TokenError, TokenService};
pub use users::{CredentialStore, MemoryCredentialStore, PgCredentialStore, Role, User};
