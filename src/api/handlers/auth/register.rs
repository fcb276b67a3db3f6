use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use sqlx::PgPool;
use tracing::{debug, instrument};

use super::{
    password::hash_password,
    storage::{insert_user, InsertOutcome},
    types::{RegisterRequest, UserResponse},
};
use crate::api::{error::ApiError, handlers::valid_username};

#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Invalid payload or username already taken"),
    ),
    tag = "auth"
)]
#[instrument(skip_all)]
pub async fn register(
    pool: Extension<PgPool>,
    payload: Option<Json<RegisterRequest>>,
) -> impl IntoResponse {
    let Some(Json(request)) = payload else {
        return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response();
    };

    if !valid_username(&request.username) {
        return (StatusCode::BAD_REQUEST, "Invalid username".to_string()).into_response();
    }

    if request.password.is_empty() {
        return (StatusCode::BAD_REQUEST, "Invalid password".to_string()).into_response();
    }

    // The plaintext never goes further than this call.
    let password_hash = match hash_password(&request.password) {
        Ok(hash) => hash,
        Err(err) => return ApiError::Internal(err).into_response(),
    };

    match insert_user(&pool, &request.username, &password_hash).await {
        Ok(InsertOutcome::Created(user_id)) => {
            debug!("Account created: {}", request.username);
            let response = UserResponse {
                id: user_id.to_string(),
                username: request.username,
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Ok(InsertOutcome::Conflict) => ApiError::DuplicateUsername.into_response(),
        Err(err) => ApiError::Internal(err).into_response(),
    }
}
