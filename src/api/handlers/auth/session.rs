//! Session cookie plumbing plus the profile and logout endpoints.

use axum::{
    extract::Extension,
    http::{
        header::{InvalidHeaderValue, AUTHORIZATION, COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue, StatusCode,
    },
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::error;

use super::{principal::require_auth, state::AuthState, types::ProfileResponse};

pub(super) const SESSION_COOKIE_NAME: &str = "token";

#[utoipa::path(
    get,
    path = "/api/profile",
    responses(
        (status = 200, description = "Decoded session claims", body = ProfileResponse),
        (status = 401, description = "Missing or invalid session token")
    ),
    tag = "auth"
)]
pub async fn profile(headers: HeaderMap, auth_state: Extension<Arc<AuthState>>) -> impl IntoResponse {
    match require_auth(&headers, &auth_state) {
        Ok(claims) => {
            let response = ProfileResponse {
                id: claims.sub.to_string(),
                username: claims.username,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => err.into_response(),
    }
}

#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 204, description = "Session cleared")
    ),
    tag = "auth"
)]
pub async fn logout() -> impl IntoResponse {
    // Logout is client-side: signed tokens cannot be revoked, so all there is
    // to do is clear the cookie. Always succeeds, token or not.
    let mut response_headers = HeaderMap::new();
    match clear_session_cookie() {
        Ok(cookie) => {
            response_headers.insert(SET_COOKIE, cookie);
        }
        Err(err) => {
            error!("Failed to build clear-cookie header: {err}");
        }
    }
    (StatusCode::NO_CONTENT, response_headers)
}

/// Build the `HttpOnly` cookie carrying a freshly issued session token.
pub(super) fn session_cookie(token: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    // Secure: browsers only send the cookie back over TLS.
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; Secure; SameSite=Lax"
    ))
}

fn clear_session_cookie() -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE_NAME}=; Path=/; HttpOnly; Secure; SameSite=Lax; Max-Age=0"
    ))
}

/// Pull the session token from the request, cookie first, bearer as fallback.
pub(super) fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = extract_bearer_token(headers) {
        return Some(token);
    }
    let header = headers.get(COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        let trimmed = pair.trim();
        let mut parts = trimmed.splitn(2, '=');
        let key = parts.next()?.trim();
        let val = parts.next()?.trim();
        if key == SESSION_COOKIE_NAME {
            return Some(val.to_string());
        }
    }
    None
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let token = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
