use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, error, instrument};

use super::{
    password::verify_password,
    session::session_cookie,
    state::AuthState,
    storage::lookup_user_by_username,
    types::{LoginRequest, UserResponse},
};
use crate::{
    api::{error::ApiError, handlers::now_unix_seconds},
    token::{self, SessionClaims},
};

#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful; session cookie set", body = UserResponse),
        (status = 400, description = "Wrong credentials"),
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn login(
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<LoginRequest>>,
) -> impl IntoResponse {
    let Some(Json(request)) = payload else {
        return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response();
    };

    // Unknown username and wrong password take the same exit.
    let user = match lookup_user_by_username(&pool, &request.username).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            debug!("Login for unknown username");
            return ApiError::InvalidCredentials.into_response();
        }
        Err(err) => return ApiError::Internal(err).into_response(),
    };

    if !verify_password(&request.password, &user.password_hash) {
        debug!("Password mismatch for {}", user.username);
        return ApiError::InvalidCredentials.into_response();
    }

    let iat = now_unix_seconds();
    let claims = SessionClaims {
        sub: user.id,
        // Username is frozen into the claims here; a later rename only shows
        // up after the next login.
        username: user.username.clone(),
        iat,
        exp: Some(iat + auth_state.config().session_ttl_seconds()),
    };

    let token = match token::sign_hs256(auth_state.secret(), &claims) {
        Ok(token) => token,
        Err(err) => {
            error!("Failed to sign session token: {err}");
            return ApiError::Internal(err.into()).into_response();
        }
    };

    let mut headers = HeaderMap::new();
    match session_cookie(&token) {
        Ok(cookie) => {
            headers.insert(SET_COOKIE, cookie);
        }
        Err(err) => {
            error!("Failed to build session cookie: {err}");
            return ApiError::Internal(err.into()).into_response();
        }
    }

    let response = UserResponse {
        id: user.id.to_string(),
        username: user.username,
    };
    (StatusCode::OK, headers, Json(response)).into_response()
}
