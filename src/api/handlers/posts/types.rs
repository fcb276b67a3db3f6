//! Request/response types for post endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::storage::PostRecord;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct CreatePostRequest {
    pub title: String,
    pub summary: String,
    pub content: String,
    /// Reference to an uploaded asset; may be absent.
    pub cover: Option<String>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct UpdatePostRequest {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub cover: Option<String>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct PostAuthor {
    pub id: String,
    pub username: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct PostResponse {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    pub author: PostAuthor,
    pub created_at: String,
    pub updated_at: String,
}

impl From<PostRecord> for PostResponse {
    fn from(record: PostRecord) -> Self {
        Self {
            id: record.id.to_string(),
            title: record.title,
            summary: record.summary,
            content: record.content,
            cover: record.cover,
            author: PostAuthor {
                id: record.author_id.to_string(),
                username: record.author_username,
            },
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn create_request_accepts_missing_cover() {
        let request: CreatePostRequest =
            serde_json::from_str(r#"{"title":"T","summary":"S","content":"C"}"#)
                .expect("cover should be optional");
        assert_eq!(request.title, "T");
        assert!(request.cover.is_none());
    }

    #[test]
    fn response_from_record_carries_author() {
        let record = PostRecord {
            id: Uuid::from_u128(1),
            title: "T".to_string(),
            summary: "S".to_string(),
            content: "C".to_string(),
            cover: None,
            author_id: Uuid::from_u128(2),
            author_username: "alice".to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-02T00:00:00Z".to_string(),
        };
        let response = PostResponse::from(record);
        assert_eq!(response.author.username, "alice");
        assert_eq!(response.author.id, Uuid::from_u128(2).to_string());
        assert_eq!(response.created_at, "2024-01-01T00:00:00Z");
    }

    #[test]
    fn absent_cover_is_omitted_from_json() {
        let response = PostResponse {
            id: Uuid::nil().to_string(),
            title: "T".to_string(),
            summary: "S".to_string(),
            content: "C".to_string(),
            cover: None,
            author: PostAuthor {
                id: Uuid::nil().to_string(),
                username: "alice".to_string(),
            },
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
        };
        let value = serde_json::to_value(&response).expect("serializable");
        assert!(value.get("cover").is_none());
    }
}
