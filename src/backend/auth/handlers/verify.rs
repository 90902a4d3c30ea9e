/**
 * Admin Verification Handler
 *
 * The dashboard calls this after loading to decide whether to render
 * admin controls. The route sits behind the token-proof middleware, so
 * reaching the handler already means the token verified; all that is
 * left is the role check.
 */

use axum::{http::StatusCode, response::Json};

use crate::backend::auth::handlers::types::VerifyAdminResponse;
use crate::backend::auth::users::Role;
use crate::backend::middleware::auth::AuthUser;

/// Admin verification handler for GET /api/admin/verify.
///
/// Returns `{"isAdmin": true}` with 200 for an admin token and
/// `{"isAdmin": false}` with 403 for any other verified token.
pub async fn verify_admin(AuthUser(user): AuthUser) -> (StatusCode, Json<VerifyAdminResponse>) {
    if user.role == Role::Admin {
        (StatusCode::OK, Json(VerifyAdminResponse { is_admin: true }))
    } else {
        tracing::warn!("Non-admin token on admin verification: {}", user.username);
        (
            StatusCode::FORBIDDEN,
            Json(VerifyAdminResponse { is_admin: false }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::middleware::auth::TokenIdentity;
    use uuid::Uuid;

    fn identity(role: Role) -> AuthUser {
        AuthUser(TokenIdentity {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            role,
        })
    }

    #[tokio::test]
    async fn test_admin_token_verifies() {
        let (status, Json(response)) = verify_admin(identity(Role::Admin)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(response.is_admin);
    }

    #[tokio::test]
    async fn test_user_token_is_forbidden() {
        let (status, Json(response)) = verify_admin(identity(Role::User)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(!response.is_admin);
    }
}
