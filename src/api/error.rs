//! Typed error taxonomy for the HTTP boundary.
//!
//! Handlers return these instead of raw status codes so every failure has a
//! single, deliberate mapping. Authentication and authorization failures
//! reveal only the minimal fact needed; in particular an unknown username and
//! a wrong password are indistinguishable to the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("username already taken")]
    DuplicateUsername,
    #[error("wrong credentials")]
    InvalidCredentials,
    #[error("missing session token")]
    Unauthenticated,
    #[error("invalid session token")]
    InvalidToken,
    #[error("post not found")]
    NotFound,
    #[error("you are not the author")]
    NotAuthor,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::DuplicateUsername | Self::InvalidCredentials | Self::NotAuthor => {
                StatusCode::BAD_REQUEST
            }
            // Both token failures surface identically; the variants stay
            // distinct so logs can tell "no token" from "bad token".
            Self::Unauthenticated | Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Internal(err) => {
                error!("Internal error: {err:#}");
                "internal error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
