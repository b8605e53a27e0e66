//! The `token` session cookie.
//!
//! Reading walks every `Cookie` header, since HTTP/2 clients may split
//! cookies across several. Writing produces a `Set-Cookie` value with
//! `HttpOnly; Path=/; SameSite=Lax`, plus `Secure` when configured.

use axum::http::header::{InvalidHeaderValue, COOKIE};
use axum::http::{HeaderMap, HeaderValue};

use crate::config::ServerConfig;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "token";

/// Extract the session token from the request's `Cookie` headers.
///
/// Returns `None` when the cookie is absent or empty.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

/// Build the `Set-Cookie` value that stores `token` for the session lifetime.
pub fn session_cookie(token: &str, config: &ServerConfig) -> Result<HeaderValue, InvalidHeaderValue> {
    build(token, config.jwt.expiry_secs(), config.cookie_secure)
}

/// Build the `Set-Cookie` value that removes the session cookie.
pub fn clear_session_cookie(config: &ServerConfig) -> HeaderValue {
    // An empty value is always a valid header value.
    build("", 0, config.cookie_secure).unwrap_or_else(|_| HeaderValue::from_static(""))
}

fn build(value: &str, max_age: i64, secure: bool) -> Result<HeaderValue, InvalidHeaderValue> {
    let mut cookie =
        format!("{SESSION_COOKIE}={value}; HttpOnly; Path=/; SameSite=Lax; Max-Age={max_age}");
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
}
