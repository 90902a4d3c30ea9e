/**
 * Token Login Handlers
 *
 * This module implements the stateless login path: credentials in, signed
 * JWT out. The customer login and the admin login share the flow and
 * differ only in the role the lookup is restricted to.
 * The admin dashboard additionally has a cookie variant that delivers the
 * same token in an HTTP-only cookie instead of the response body.
 *
 * # Security
 *
 * - The lookup is by username AND role, so a customer account can never
 *   authenticate against the admin family
 * - An unknown username and a wrong password produce byte-identical 401
 *   responses; nothing reveals which check failed
 * - Password verification is constant-time inside bcrypt
 */

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap},
    response::Json,
};

use crate::backend::auth::cookies::token_cookie;
use crate::backend::auth::handlers::types::{
    AuthResponse, CookieAuthResponse, LoginRequest, UserSummary,
};
use crate::backend::auth::users::{Role, User};
use crate::backend::error::{ApiError, FieldErrors};
use crate::backend::server::state::AppState;

/// Validate presence of both login fields.
fn validate(request: &LoginRequest) -> Result<(), ApiError> {
    let mut details = FieldErrors::default();

    if request.username.is_empty() {
        details.username = Some("Username is required".to_string());
    }
    if request.password.is_empty() {
        details.password = Some("Password is required".to_string());
    }

    if details.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation("All fields are required", details))
    }
}

/// Look up an identity by username within a role and verify the password.
///
/// Every failure that involves the submitted credentials collapses into
/// `AuthInvalid`; only store and hasher breakage surfaces differently
/// (as 500, with detail kept server-side).
async fn authenticate(
    state: &AppState,
    username: &str,
    password: &str,
    role: Role,
) -> Result<User, ApiError> {
    let user = state
        .store
        .find_by_username_and_role(username, role)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Login failed for unknown {} account: {}", role, username);
            ApiError::AuthInvalid
        })?;

    let valid = state
        .hasher
        .verify(password, &user.password_hash)
        .map_err(|e| {
            tracing::error!("Password verification error: {:?}", e);
            ApiError::infrastructure(e)
        })?;

    if !valid {
        tracing::warn!("Invalid password for {} account: {}", role, username);
        return Err(ApiError::AuthInvalid);
    }

    Ok(user)
}

/// Customer token login handler for POST /api/auth/login.
pub async fn login_user(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    token_login(state, request, Role::User).await
}

/// Admin token login handler for POST /api/admin/login.
pub async fn login_admin(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    token_login(state, request, Role::Admin).await
}

async fn token_login(
    state: AppState,
    request: LoginRequest,
    role: Role,
) -> Result<Json<AuthResponse>, ApiError> {
    tracing::info!("Login request for: {}", request.username);

    validate(&request)?;

    let user = authenticate(&state, &request.username, &request.password, role).await?;

    let token = state.tokens.issue(&user).map_err(|e| {
        tracing::error!("Failed to create token: {:?}", e);
        ApiError::infrastructure(e)
    })?;

    tracing::info!("User logged in successfully: {} ({})", user.username, user.role);

    Ok(Json(AuthResponse {
        message: "Authentication successful".to_string(),
        token,
        user: UserSummary {
            username: user.username,
            role: user.role,
        },
    }))
}

/// Admin cookie login handler for POST /api/admin/auth.
///
/// Same credential flow as `login_admin`, but the token travels back in
/// an HTTP-only, SameSite=Strict cookie and is absent from the body, so
/// dashboard scripts never see it.
pub async fn admin_cookie_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<(HeaderMap, Json<CookieAuthResponse>), ApiError> {
    tracing::info!("Admin cookie login request for: {}", request.username);

    validate(&request)?;

    let user = authenticate(&state, &request.username, &request.password, Role::Admin).await?;

    let token = state.tokens.issue(&user).map_err(|e| {
        tracing::error!("Failed to create token: {:?}", e);
        ApiError::infrastructure(e)
    })?;

    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, token_cookie(&token));

    tracing::info!("Admin logged in successfully: {}", user.username);

    Ok((
        headers,
        Json(CookieAuthResponse {
            message: "Authentication successful".to_string(),
            user: UserSummary {
                username: user.username,
                role: user.role,
            },
        }),
    ))
}
