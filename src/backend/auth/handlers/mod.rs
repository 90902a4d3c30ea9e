//! Authentication Handlers Module
//!
//! This module contains all HTTP handlers for the authentication
//! endpoints, organized into focused submodules.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Handler exports
//! ├── types.rs    - Request and response types
//! ├── register.rs - User/admin registration
//! ├── login.rs    - Token logins (body and cookie variants)
//! ├── session.rs  - Session login and profile
//! ├── logout.rs   - Logout
//! └── verify.rs   - Admin verification
//! ```
//!
//! # Handlers
//!
//! - **`register_user`** - POST /api/auth/register
//! - **`login_user`** - POST /api/auth/login
//! - **`session_login`** - POST /api/auth/session
//! - **`profile`** - GET /api/auth/profile (session-authenticated)
//! - **`logout`** - POST /api/auth/logout
//! - **`register_admin`** - POST /api/admin/register
//! - **`login_admin`** - POST /api/admin/login
//! - **`admin_cookie_login`** - POST /api/admin/auth
//! - **`verify_admin`** - GET /api/admin/verify (token-authenticated)

/// Request and response types
pub mod types;

/// Registration handlers
pub mod register;

/// Token login handlers
pub mod login;

/// Session login and profile handlers
pub mod session;

/// Logout handler
pub mod logout;

/// Admin verification handler
pub mod verify;

// Re-export commonly used types
pub use types::{
    AuthResponse, CookieAuthResponse, LoginRequest, MessageResponse, ProfileResponse,
    RegisterRequest, SessionLoginRequest, SessionResponse, UserSummary, VerifyAdminResponse,
};

// Re-export handlers
pub use login::{admin_cookie_login, login_admin, login_user};
pub use logout::logout;
pub use register::{register_admin, register_user};
pub use session::{profile, session_login};
pub use verify::verify_admin;
