/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by the
 * authentication handlers. Password fields are accepted in requests and
 * never appear in any response type.
 */

use serde::{Deserialize, Serialize};

use crate::backend::auth::users::Role;

/// Registration request
///
/// Contains the username, email and password for user or admin
/// registration; the route family decides the role.
#[derive(Deserialize, Serialize, Debug)]
pub struct RegisterRequest {
    /// Chosen username (3-30 chars, alphanumeric + underscore)
    pub username: String,
    /// Email address
    pub email: String,
    /// Password (hashed before storage)
    pub password: String,
}

/// Token login request
///
/// Contains the username and password for the stateless token login.
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    /// Username
    pub username: String,
    /// Password (verified against the stored hash)
    pub password: String,
}

/// Session login request
///
/// The storefront login identifies users by email.
#[derive(Deserialize, Serialize, Debug)]
pub struct SessionLoginRequest {
    /// Email address
    pub email: String,
    /// Password (verified against the stored hash)
    pub password: String,
}

/// User information safe to return to clients.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UserSummary {
    /// Username
    pub username: String,
    /// Role
    pub role: Role,
}

/// Response for the token login: the JWT plus the user it names.
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    pub message: String,
    /// JWT for subsequent requests (1-hour expiration)
    pub token: String,
    pub user: UserSummary,
}

/// Response for the admin cookie login. The token travels only in the
/// Set-Cookie header, never in the body.
#[derive(Serialize, Deserialize, Debug)]
pub struct CookieAuthResponse {
    pub message: String,
    pub user: UserSummary,
}

/// Response for the session login.
#[derive(Serialize, Deserialize, Debug)]
pub struct SessionResponse {
    pub message: String,
    pub user: SessionUserSummary,
}

/// The session login echoes only the email back.
#[derive(Serialize, Deserialize, Debug)]
pub struct SessionUserSummary {
    pub email: String,
}

/// Profile of the session-authenticated user.
#[derive(Serialize, Deserialize, Debug)]
pub struct ProfileResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: Role,
}

/// Bare confirmation message (registration, logout).
#[derive(Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

/// Response of the admin verification endpoint.
#[derive(Serialize, Deserialize, Debug)]
pub struct VerifyAdminResponse {
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}
