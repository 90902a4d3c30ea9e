//! Shared helpers for the integration tests.
//!
//! Tests drive the full router (middleware included) through
//! `tower::ServiceExt::oneshot` against in-memory stores, so no database
//! or network is involved.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use tower::ServiceExt;

use bookstore::backend::routes::router::create_router;
use bookstore::backend::server::state::AppState;

/// Signing secret used by every test server.
pub const TEST_SECRET: &str = "test-signing-secret";

/// Minimum bcrypt cost; keeps the suite fast.
pub const TEST_BCRYPT_COST: u32 = 4;

/// Build a router over fresh in-memory stores.
///
/// The state is returned alongside so tests can reach the stores and the
/// token service directly (e.g. to mint an expired token).
pub fn test_app() -> (Router, AppState) {
    let state = AppState::in_memory(TEST_SECRET, TEST_BCRYPT_COST);
    let app = create_router(state.clone());
    (app, state)
}

/// Send one request through the router.
///
/// `headers` are extra request headers (authorization, cookie, ...);
/// `body`, when present, is sent as JSON.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    headers: &[(&str, &str)],
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

/// Read a response body as JSON.
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Extract a named cookie's value from the response's Set-Cookie headers.
pub fn cookie_from(response: &Response<Body>, name: &str) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookie| {
            let pair = cookie.split(';').next()?;
            let (cookie_name, cookie_value) = pair.split_once('=')?;
            (cookie_name == name).then(|| cookie_value.to_string())
        })
}

/// Register an account through the given registration endpoint.
pub async fn register(
    app: &Router,
    uri: &str,
    username: &str,
    email: &str,
    password: &str,
) -> Response<Body> {
    send(
        app,
        "POST",
        uri,
        &[],
        Some(serde_json::json!({
            "username": username,
            "email": email,
            "password": password,
        })),
    )
    .await
}

/// Log in through the given token-login endpoint and return the JWT.
pub async fn login_token(app: &Router, uri: &str, username: &str, password: &str) -> String {
    let response = send(
        app,
        "POST",
        uri,
        &[],
        Some(serde_json::json!({
            "username": username,
            "password": password,
        })),
    )
    .await;
    let body = json_body(response).await;
    body["token"].as_str().expect("login returned no token").to_string()
}

/// Register a customer and return a valid token for them.
pub async fn user_token(app: &Router, username: &str, email: &str) -> String {
    register(app, "/api/auth/register", username, email, "Abc12345!").await;
    login_token(app, "/api/auth/login", username, "Abc12345!").await
}

/// Register an admin and return a valid token for them.
pub async fn admin_token(app: &Router, username: &str, email: &str) -> String {
    register(app, "/api/admin/register", username, email, "Abc12345!").await;
    login_token(app, "/api/admin/login", username, "Abc12345!").await
}

/// Format a bearer header value.
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
