//! Authenticated principal extraction.
//!
//! Flow Overview: read the session token from the request, verify its
//! signature, and hand the decoded claims to the handler. Verification
//! failures always map to a typed rejection, never a panic or a 500.

use axum::http::HeaderMap;
use tracing::debug;

use super::{session::extract_session_token, state::AuthState};
use crate::{
    api::{error::ApiError, handlers::now_unix_seconds},
    token::{self, SessionClaims},
};

/// Resolve the request's session token into claims.
///
/// Missing token and unverifiable token are distinct errors (logs care),
/// though both render as the same 401.
///
/// # Errors
/// Returns [`ApiError::Unauthenticated`] when no token is present and
/// [`ApiError::InvalidToken`] when one is present but fails verification.
pub fn require_auth(headers: &HeaderMap, state: &AuthState) -> Result<SessionClaims, ApiError> {
    let Some(raw) = extract_session_token(headers) else {
        return Err(ApiError::Unauthenticated);
    };

    token::verify_hs256(&raw, state.secret(), now_unix_seconds()).map_err(|err| {
        debug!("Session token rejected: {err}");
        ApiError::InvalidToken
    })
}
