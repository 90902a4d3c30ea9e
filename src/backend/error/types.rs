/**
 * Backend Error Types
 *
 * This module defines the error types used by HTTP handlers and middleware.
 * Each variant corresponds to one class of failure with a fixed HTTP
 * mapping; see the `conversion` module for the response shapes.
 */

use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

use crate::backend::auth::users::StoreError;

/// Per-field validation detail included in 400 responses.
///
/// Mirrors the request shape: a populated entry names what is wrong with
/// that field, a `null` entry means the field was fine. All three entries
/// are always serialized so clients can bind to a stable shape.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FieldErrors {
    /// Problem with the submitted username, if any
    pub username: Option<String>,
    /// Problem with the submitted email, if any
    pub email: Option<String>,
    /// Problem with the submitted password, if any
    pub password: Option<String>,
}

impl FieldErrors {
    /// True when no field carries an error.
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.password.is_none()
    }
}

/// Backend error type returned by handlers and middleware.
///
/// Every failure in the request pipeline is terminal for that request;
/// nothing here retries. The variants deliberately collapse detail where
/// leaking it would help an attacker: `AuthInvalid` is identical whether
/// the username was unknown, the password wrong, or the token expired.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input fields (400)
    #[error("validation failed: {message}")]
    Validation {
        /// Human-readable summary
        message: String,
        /// Field-level detail
        details: FieldErrors,
    },

    /// Duplicate username or email at registration (409)
    ///
    /// `field` is the capitalized field name ("Username" or "Email");
    /// reporting which field collided is a deliberate usability tradeoff.
    #[error("{field} already exists")]
    Conflict {
        /// Which unique field collided
        field: &'static str,
    },

    /// Bad credentials, token or session (401); always generic
    #[error("invalid credentials")]
    AuthInvalid,

    /// Authenticated but lacking the required permission (403)
    #[error("permission denied")]
    Forbidden,

    /// Referenced resource does not exist (404)
    #[error("not found")]
    NotFound,

    /// Internal failure: store unavailable, hashing or signing error (500)
    ///
    /// The message is logged server-side and never sent to the client.
    #[error("internal error: {0}")]
    Infrastructure(String),
}

impl ApiError {
    /// Create a validation error with field-level detail.
    pub fn validation(message: impl Into<String>, details: FieldErrors) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    /// Create an infrastructure error from any displayable cause.
    pub fn infrastructure(cause: impl std::fmt::Display) -> Self {
        Self::Infrastructure(cause.to_string())
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::AuthInvalid => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate { field } => Self::Conflict { field },
            StoreError::Database(e) => Self::Infrastructure(e.to_string()),
        }
    }
}

impl From<bcrypt::BcryptError> for ApiError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::Infrastructure(err.to_string())
    }
}
