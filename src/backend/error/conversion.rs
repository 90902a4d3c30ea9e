/**
 * Error Conversion
 *
 * This module converts backend errors into HTTP responses.
 *
 * # Response Format
 *
 * Error responses are JSON objects. Validation errors carry a `details`
 * object with one entry per request field; every other class is a bare
 * `{"message": ...}` body. The `AuthInvalid` and `Infrastructure` bodies
 * are fixed strings regardless of the underlying cause, so a caller can
 * never distinguish which credential check failed or what broke
 * internally.
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::backend::error::types::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            ApiError::Validation { message, details } => serde_json::json!({
                "message": message,
                "details": details,
            }),
            ApiError::Conflict { field } => serde_json::json!({
                "message": format!("{} already exists", field),
            }),
            ApiError::AuthInvalid => serde_json::json!({
                "message": "Invalid credentials",
            }),
            ApiError::Forbidden => serde_json::json!({
                "message": "Forbidden",
            }),
            ApiError::NotFound => serde_json::json!({
                "message": "Not found",
            }),
            ApiError::Infrastructure(detail) => {
                // Full detail stays server-side; the client gets a fixed body.
                tracing::error!("Infrastructure error: {}", detail);
                serde_json::json!({
                    "message": "Internal server error",
                })
            }
        };

        (status, Json(body)).into_response()
    }
}
