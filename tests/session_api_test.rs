//! Session API integration tests
//!
//! The stateful login path: session cookies, regeneration on login, and
//! idempotent logout.

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use common::*;

async fn login_session(app: &axum::Router, email: &str, password: &str) -> axum::http::Response<axum::body::Body> {
    send(
        app,
        "POST",
        "/api/auth/session",
        &[],
        Some(serde_json::json!({ "email": email, "password": password })),
    )
    .await
}

#[tokio::test]
async fn test_session_login_sets_cookie() {
    let (app, _) = test_app();
    register(&app, "/api/auth/register", "alice", "a@x.com", "Abc12345!").await;

    let response = login_session(&app, "a@x.com", "Abc12345!").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(cookie_from(&response, "sessionId").is_some());
    let body = json_body(response).await;
    assert_eq!(body["message"], "Logged in successfully");
    assert_eq!(body["user"]["email"], "a@x.com");
}

#[tokio::test]
async fn test_session_login_failures_are_indistinguishable() {
    let (app, _) = test_app();
    register(&app, "/api/auth/register", "alice", "a@x.com", "Abc12345!").await;

    let wrong_password = login_session(&app, "a@x.com", "wrong").await;
    let unknown_email = login_session(&app, "nobody@x.com", "Abc12345!").await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(wrong_password).await, json_body(unknown_email).await);
}

#[tokio::test]
async fn test_profile_requires_session() {
    let (app, _) = test_app();
    register(&app, "/api/auth/register", "alice", "a@x.com", "Abc12345!").await;

    // No cookie.
    let response = send(&app, "GET", "/api/auth/profile", &[], None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // With a session.
    let login = login_session(&app, "a@x.com", "Abc12345!").await;
    let session_id = cookie_from(&login, "sessionId").unwrap();

    let response = send(
        &app,
        "GET",
        "/api/auth/profile",
        &[("cookie", &format!("sessionId={}", session_id))],
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "a@x.com");
    assert_eq!(body["role"], "user");
}

#[tokio::test]
async fn test_login_invalidates_previous_session() {
    let (app, _) = test_app();
    register(&app, "/api/auth/register", "alice", "a@x.com", "Abc12345!").await;

    let first = login_session(&app, "a@x.com", "Abc12345!").await;
    let first_id = cookie_from(&first, "sessionId").unwrap();

    // Log in again from the same browser context (old cookie attached).
    let second = send(
        &app,
        "POST",
        "/api/auth/session",
        &[("cookie", &format!("sessionId={}", first_id))],
        Some(serde_json::json!({ "email": "a@x.com", "password": "Abc12345!" })),
    )
    .await;
    let second_id = cookie_from(&second, "sessionId").unwrap();
    assert_ne!(first_id, second_id);

    // The pre-login id is dead; the new one works.
    let old = send(
        &app,
        "GET",
        "/api/auth/profile",
        &[("cookie", &format!("sessionId={}", first_id))],
        None,
    )
    .await;
    assert_eq!(old.status(), StatusCode::UNAUTHORIZED);

    let new = send(
        &app,
        "GET",
        "/api/auth/profile",
        &[("cookie", &format!("sessionId={}", second_id))],
        None,
    )
    .await;
    assert_eq!(new.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_logout_destroys_session_and_is_idempotent() {
    let (app, _) = test_app();
    register(&app, "/api/auth/register", "alice", "a@x.com", "Abc12345!").await;

    let login = login_session(&app, "a@x.com", "Abc12345!").await;
    let session_id = cookie_from(&login, "sessionId").unwrap();
    let cookie = format!("sessionId={}", session_id);

    let response = send(&app, "POST", "/api/auth/logout", &[("cookie", &cookie)], None).await;
    assert_eq!(response.status(), StatusCode::OK);
    // Both credential cookies are expired on the way out.
    assert_eq!(cookie_from(&response, "sessionId").as_deref(), Some("deleted"));
    assert_eq!(cookie_from(&response, "token").as_deref(), Some("deleted"));

    // The session no longer authenticates.
    let profile = send(
        &app,
        "GET",
        "/api/auth/profile",
        &[("cookie", &cookie)],
        None,
    )
    .await;
    assert_eq!(profile.status(), StatusCode::UNAUTHORIZED);

    // Logging out again still succeeds.
    let again = send(&app, "POST", "/api/auth/logout", &[("cookie", &cookie)], None).await;
    assert_eq!(again.status(), StatusCode::OK);

    // And with no credentials at all.
    let bare = send(&app, "POST", "/api/auth/logout", &[], None).await;
    assert_eq!(bare.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_proofs_do_not_interoperate() {
    let (app, _) = test_app();
    register(&app, "/api/auth/register", "alice", "a@x.com", "Abc12345!").await;

    // A valid token does not open the session-proof route.
    let token = login_token(&app, "/api/auth/login", "alice", "Abc12345!").await;
    let response = send(
        &app,
        "GET",
        "/api/auth/profile",
        &[("authorization", &bearer(&token))],
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // A valid session does not open a token-proof route.
    let login = login_session(&app, "a@x.com", "Abc12345!").await;
    let session_id = cookie_from(&login, "sessionId").unwrap();
    let response = send(
        &app,
        "GET",
        "/api/admin/verify",
        &[("cookie", &format!("sessionId={}", session_id))],
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
