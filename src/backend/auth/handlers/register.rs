/**
 * Registration Handlers
 *
 * This module implements user and admin registration. Both route families
 * share one flow; the route decides the role, the caller never does.
 *
 * # Registration Process
 *
 * 1. Validate field presence and format (field-level detail on failure)
 * 2. Check username and email uniqueness
 * 3. Hash the password
 * 4. Persist the record
 *
 * No token is issued on registration; the caller logs in afterwards.
 *
 * # Security
 *
 * - Passwords are hashed with bcrypt before storage and never echoed back
 * - Duplicate errors name the colliding field (username vs email); this
 *   is a deliberate usability tradeoff for the registration form
 */

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::handlers::types::{MessageResponse, RegisterRequest};
use crate::backend::auth::users::{NewUser, Role};
use crate::backend::error::{ApiError, FieldErrors};
use crate::backend::server::state::AppState;

/// Validate username format.
///
/// Usernames must be:
/// - 3-30 characters long
/// - Contain only alphanumeric characters and underscores
/// - Start with a letter
fn is_valid_username(username: &str) -> bool {
    if username.len() < 3 || username.len() > 30 {
        return false;
    }

    let mut chars = username.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Validate a registration request, collecting per-field problems.
fn validate(request: &RegisterRequest) -> Result<(), ApiError> {
    let mut details = FieldErrors::default();

    if request.username.is_empty() {
        details.username = Some("Username is required".to_string());
    } else if !is_valid_username(&request.username) {
        details.username = Some(
            "Username must be 3-30 chars, start with a letter, and contain only letters, numbers, and underscores"
                .to_string(),
        );
    }

    if request.email.is_empty() {
        details.email = Some("Email is required".to_string());
    } else if !request.email.contains('@') {
        details.email = Some("Invalid email format".to_string());
    }

    if request.password.is_empty() {
        details.password = Some("Password is required".to_string());
    } else if request.password.len() < 8 {
        details.password = Some("Password must be at least 8 characters".to_string());
    }

    if details.is_empty() {
        return Ok(());
    }

    let message = if request.username.is_empty()
        || request.email.is_empty()
        || request.password.is_empty()
    {
        "All fields are required"
    } else {
        "Invalid registration fields"
    };

    Err(ApiError::validation(message, details))
}

/// User registration handler for POST /api/auth/register.
pub async fn register_user(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    register(state, request, Role::User).await
}

/// Admin registration handler for POST /api/admin/register.
///
/// The role is forced to admin here; it is not part of the request body.
pub async fn register_admin(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    register(state, request, Role::Admin).await
}

async fn register(
    state: AppState,
    request: RegisterRequest,
    role: Role,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    tracing::info!(
        "Registration request for username: {}, email: {}",
        request.username,
        request.email
    );

    validate(&request)?;

    // Check each unique field separately so the conflict response can
    // name the one that collided.
    if state.store.find_by_username(&request.username).await?.is_some() {
        tracing::warn!("Username already exists: {}", request.username);
        return Err(ApiError::Conflict { field: "Username" });
    }

    if state.store.find_by_email(&request.email).await?.is_some() {
        tracing::warn!("Email already exists: {}", request.email);
        return Err(ApiError::Conflict { field: "Email" });
    }

    let password_hash = state.hasher.hash(&request.password).map_err(|e| {
        tracing::error!("Failed to hash password: {:?}", e);
        ApiError::infrastructure(e)
    })?;

    // A concurrent registration can still win the race; the store maps
    // the resulting unique violation back to a field-specific conflict.
    let user = state
        .store
        .create(NewUser {
            username: request.username,
            email: request.email,
            password_hash,
            role,
        })
        .await?;

    tracing::info!("User created successfully: {} ({})", user.username, user.role);

    let message = match role {
        Role::Admin => "Admin registered successfully",
        Role::User => "User registered successfully",
    };

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: message.to_string(),
        }),
    ))
}
