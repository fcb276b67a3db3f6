//! Post authoring and public reads.
//!
//! Reads (list, fetch) are public. Create and update require a session, and
//! update is further gated on authorship: the identity in the claims must be
//! the account that created the post.

use axum::{
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, error, instrument};
use uuid::Uuid;

use super::auth::{principal::require_auth, state::AuthState};
use crate::{api::error::ApiError, token::SessionClaims};

mod storage;
mod types;

pub use types::{CreatePostRequest, PostAuthor, PostResponse, UpdatePostRequest};

use storage::{fetch_post, fetch_post_author, insert_post, list_posts as list_rows, update_post as update_row, NewPost};

/// How many posts the list endpoint returns at most.
#[derive(Clone, Copy, Debug)]
pub struct PostsConfig {
    list_limit: i64,
}

impl PostsConfig {
    #[must_use]
    pub fn new(list_limit: i64) -> Self {
        Self { list_limit }
    }

    pub(crate) fn list_limit(self) -> i64 {
        self.list_limit
    }
}

/// Authorship gate for mutations.
///
/// Compares the identifier values, never their serialized forms.
pub(crate) fn can_mutate(identity: &SessionClaims, post_author: Uuid) -> bool {
    identity.sub == post_author
}

#[utoipa::path(
    get,
    path = "/api/post",
    responses(
        (status = 200, description = "Newest posts, author username joined", body = [PostResponse]),
    ),
    tag = "posts"
)]
pub async fn list_posts(
    pool: Extension<PgPool>,
    posts_config: Extension<PostsConfig>,
) -> impl IntoResponse {
    match list_rows(&pool, posts_config.list_limit()).await {
        Ok(rows) => {
            let posts: Vec<PostResponse> = rows.into_iter().map(PostResponse::from).collect();
            (StatusCode::OK, Json(posts)).into_response()
        }
        Err(err) => {
            error!("Failed to list posts: {err}");
            ApiError::Internal(err).into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/post/{id}",
    params(("id" = String, Path, description = "Post id")),
    responses(
        (status = 200, description = "Single post, author username joined", body = PostResponse),
        (status = 404, description = "Unknown post id"),
    ),
    tag = "posts"
)]
pub async fn get_post(Path(id): Path<String>, pool: Extension<PgPool>) -> impl IntoResponse {
    let Ok(post_id) = Uuid::parse_str(id.trim()) else {
        return ApiError::NotFound.into_response();
    };

    match fetch_post(&pool, post_id).await {
        Ok(Some(row)) => (StatusCode::OK, Json(PostResponse::from(row))).into_response(),
        Ok(None) => ApiError::NotFound.into_response(),
        Err(err) => {
            error!("Failed to fetch post: {err}");
            ApiError::Internal(err).into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/post",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = PostResponse),
        (status = 401, description = "Missing or invalid session token"),
        (status = 404, description = "Store failure"),
    ),
    tag = "posts"
)]
#[instrument(skip_all)]
pub async fn create_post(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<CreatePostRequest>>,
) -> impl IntoResponse {
    let claims = match require_auth(&headers, &auth_state) {
        Ok(claims) => claims,
        Err(err) => return err.into_response(),
    };

    let Some(Json(request)) = payload else {
        return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response();
    };

    let new_post = NewPost {
        title: request.title,
        summary: request.summary,
        content: request.content,
        cover: request.cover,
    };

    match insert_post(&pool, claims.sub, &claims.username, &new_post).await {
        Ok(row) => {
            debug!("Post created by {}", claims.username);
            (StatusCode::CREATED, Json(PostResponse::from(row))).into_response()
        }
        Err(err) => {
            // Store failures on the post routes surface as 404.
            error!("Failed to create post: {err}");
            ApiError::NotFound.into_response()
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/post",
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Post updated", body = PostResponse),
        (status = 400, description = "Authenticated but not the author"),
        (status = 401, description = "Missing or invalid session token"),
        (status = 404, description = "Unknown post id or store failure"),
    ),
    tag = "posts"
)]
#[instrument(skip_all)]
pub async fn update_post(
    headers: HeaderMap,
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<UpdatePostRequest>>,
) -> impl IntoResponse {
    let claims = match require_auth(&headers, &auth_state) {
        Ok(claims) => claims,
        Err(err) => return err.into_response(),
    };

    let Some(Json(request)) = payload else {
        return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response();
    };

    let Ok(post_id) = Uuid::parse_str(request.id.trim()) else {
        return ApiError::NotFound.into_response();
    };

    // Authorship check happens before any write; a non-author attempt leaves
    // the stored post untouched.
    let author_id = match fetch_post_author(&pool, post_id).await {
        Ok(Some(author_id)) => author_id,
        Ok(None) => return ApiError::NotFound.into_response(),
        Err(err) => {
            error!("Failed to fetch post author: {err}");
            return ApiError::NotFound.into_response();
        }
    };

    if !can_mutate(&claims, author_id) {
        debug!("Update rejected: {} is not the author", claims.username);
        return ApiError::NotAuthor.into_response();
    }

    let update = NewPost {
        title: request.title,
        summary: request.summary,
        content: request.content,
        cover: request.cover,
    };

    match update_row(&pool, post_id, &update).await {
        Ok(Some(row)) => (StatusCode::OK, Json(PostResponse::from(row))).into_response(),
        Ok(None) => ApiError::NotFound.into_response(),
        Err(err) => {
            error!("Failed to update post: {err}");
            ApiError::NotFound.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::now_unix_seconds;

    fn claims_for(sub: Uuid) -> SessionClaims {
        SessionClaims {
            sub,
            username: "alice".to_string(),
            iat: now_unix_seconds(),
            exp: None,
        }
    }

    #[test]
    fn can_mutate_requires_identifier_equality() {
        let author = Uuid::from_u128(1);
        let other = Uuid::from_u128(2);
        assert!(can_mutate(&claims_for(author), author));
        assert!(!can_mutate(&claims_for(other), author));
    }

    #[test]
    fn can_mutate_is_value_equality_not_string_equality() {
        // Same uuid through different constructions still matches.
        let author = Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").expect("valid uuid");
        let roundtripped = Uuid::parse_str(&author.to_string()).expect("valid uuid");
        assert!(can_mutate(&claims_for(roundtripped), author));
    }

    #[test]
    fn posts_config_holds_limit() {
        assert_eq!(PostsConfig::new(20).list_limit(), 20);
    }
}
