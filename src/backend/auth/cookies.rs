/**
 * Cookie Handling
 *
 * Cookie names and helpers shared by the authentication middleware and
 * the login/logout handlers. Both credential cookies are HTTP-only and
 * SameSite=Strict; the `Secure` attribute is left to the TLS-terminating
 * deployment in front of this server.
 */

use axum::http::{HeaderMap, HeaderValue};

/// Cookie carrying the session id for the session-based login path.
pub const SESSION_COOKIE: &str = "sessionId";

/// Cookie carrying the JWT for the admin cookie-token login path.
pub const TOKEN_COOKIE: &str = "token";

use crate::backend::auth::sessions::SESSION_TTL_SECS;
use crate::backend::auth::tokens::TOKEN_TTL_SECS;

/// Extract a named cookie value from request headers.
pub fn parse_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let cookie = headers.get("cookie").or_else(|| headers.get("Cookie"))?;
    let s = cookie.to_str().ok()?;
    for part in s.split(';') {
        let p = part.trim();
        if let Some(eq) = p.find('=') {
            let (k, v) = p.split_at(eq);
            if k == name {
                return Some(v[1..].to_string());
            }
        }
    }
    None
}

/// Build the Set-Cookie value installing a session id.
pub fn session_cookie(session_id: &str) -> HeaderValue {
    HeaderValue::from_str(&format!(
        "{}={}; HttpOnly; SameSite=Strict; Path=/; Max-Age={}",
        SESSION_COOKIE, session_id, SESSION_TTL_SECS
    ))
    .expect("session id contains no invalid header characters")
}

/// Build the Set-Cookie value installing a bearer token.
pub fn token_cookie(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!(
        "{}={}; HttpOnly; SameSite=Strict; Path=/; Max-Age={}",
        TOKEN_COOKIE, token, TOKEN_TTL_SECS
    ))
    .expect("JWT contains no invalid header characters")
}

/// Build the Set-Cookie value expiring a named credential cookie.
pub fn clear_cookie(name: &str) -> HeaderValue {
    HeaderValue::from_str(&format!(
        "{}=deleted; Expires=Thu, 01 Jan 1970 00:00:00 GMT; HttpOnly; SameSite=Strict; Path=/",
        name
    ))
    .expect("cookie name contains no invalid header characters")
}
