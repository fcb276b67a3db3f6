//! Database helpers for posts.
//!
//! Author usernames are joined at read time, not stored on the post row.

use anyhow::{Context, Result};
use sqlx::{PgPool, Row};
use tracing::Instrument;
use uuid::Uuid;

/// Content fields accepted from the client; everything else is assigned by
/// the store or fixed at creation.
pub(super) struct NewPost {
    pub(super) title: String,
    pub(super) summary: String,
    pub(super) content: String,
    pub(super) cover: Option<String>,
}

/// A post row enriched with its author's username.
pub(super) struct PostRecord {
    pub(super) id: Uuid,
    pub(super) title: String,
    pub(super) summary: String,
    pub(super) content: String,
    pub(super) cover: Option<String>,
    pub(super) author_id: Uuid,
    pub(super) author_username: String,
    pub(super) created_at: String,
    pub(super) updated_at: String,
}

fn record_from_row(row: &sqlx::postgres::PgRow) -> PostRecord {
    PostRecord {
        id: row.get("id"),
        title: row.get("title"),
        summary: row.get("summary"),
        content: row.get("content"),
        cover: row.get("cover"),
        author_id: row.get("author_id"),
        author_username: row.get("author_username"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

pub(super) async fn insert_post(
    pool: &PgPool,
    author_id: Uuid,
    author_username: &str,
    post: &NewPost,
) -> Result<PostRecord> {
    let query = r#"
        INSERT INTO posts (title, summary, content, cover, author_id)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING
            id,
            title,
            summary,
            content,
            cover,
            author_id,
            to_char(created_at AT TIME ZONE 'utc', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS created_at,
            to_char(updated_at AT TIME ZONE 'utc', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS updated_at
    "#;
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(&post.title)
        .bind(&post.summary)
        .bind(&post.content)
        .bind(&post.cover)
        .bind(author_id)
        .fetch_one(pool)
        .instrument(span)
        .await
        .context("failed to insert post")?;

    // The author is the caller; no join needed for a name we already have.
    Ok(PostRecord {
        id: row.get("id"),
        title: row.get("title"),
        summary: row.get("summary"),
        content: row.get("content"),
        cover: row.get("cover"),
        author_id: row.get("author_id"),
        author_username: author_username.to_string(),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

pub(super) async fn list_posts(pool: &PgPool, limit: i64) -> Result<Vec<PostRecord>> {
    let query = r#"
        SELECT
            posts.id,
            posts.title,
            posts.summary,
            posts.content,
            posts.cover,
            posts.author_id,
            users.username AS author_username,
            to_char(posts.created_at AT TIME ZONE 'utc', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS created_at,
            to_char(posts.updated_at AT TIME ZONE 'utc', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS updated_at
        FROM posts
        JOIN users ON users.id = posts.author_id
        ORDER BY posts.created_at DESC
        LIMIT $1
    "#;
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let rows = sqlx::query(query)
        .bind(limit)
        .fetch_all(pool)
        .instrument(span)
        .await
        .context("failed to list posts")?;

    Ok(rows.iter().map(record_from_row).collect())
}

pub(super) async fn fetch_post(pool: &PgPool, id: Uuid) -> Result<Option<PostRecord>> {
    let query = r#"
        SELECT
            posts.id,
            posts.title,
            posts.summary,
            posts.content,
            posts.cover,
            posts.author_id,
            users.username AS author_username,
            to_char(posts.created_at AT TIME ZONE 'utc', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS created_at,
            to_char(posts.updated_at AT TIME ZONE 'utc', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS updated_at
        FROM posts
        JOIN users ON users.id = posts.author_id
        WHERE posts.id = $1
        LIMIT 1
    "#;
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(id)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to fetch post")?;

    Ok(row.map(|row| record_from_row(&row)))
}

/// Only the author reference, for the pre-update authorship check.
pub(super) async fn fetch_post_author(pool: &PgPool, id: Uuid) -> Result<Option<Uuid>> {
    let query = "SELECT author_id FROM posts WHERE id = $1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(id)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to fetch post author")?;

    Ok(row.map(|row| row.get("author_id")))
}

/// Replace the content fields; `id`, `author_id`, and `created_at` are never
/// touched by updates.
pub(super) async fn update_post(
    pool: &PgPool,
    id: Uuid,
    post: &NewPost,
) -> Result<Option<PostRecord>> {
    let query = r#"
        UPDATE posts
        SET title = $2,
            summary = $3,
            content = $4,
            cover = $5,
            updated_at = now()
        FROM users
        WHERE posts.id = $1
          AND users.id = posts.author_id
        RETURNING
            posts.id,
            posts.title,
            posts.summary,
            posts.content,
            posts.cover,
            posts.author_id,
            users.username AS author_username,
            to_char(posts.created_at AT TIME ZONE 'utc', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS created_at,
            to_char(posts.updated_at AT TIME ZONE 'utc', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS updated_at
    "#;
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "UPDATE",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(id)
        .bind(&post.title)
        .bind(&post.summary)
        .bind(&post.content)
        .bind(&post.cover)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to update post")?;

    Ok(row.map(|row| record_from_row(&row)))
}

#[cfg(test)]
mod tests {
    use super::{NewPost, PostRecord};
    use uuid::Uuid;

    #[test]
    fn new_post_allows_absent_cover() {
        let post = NewPost {
            title: "T".to_string(),
            summary: "S".to_string(),
            content: "C".to_string(),
            cover: None,
        };
        assert!(post.cover.is_none());
    }

    #[test]
    fn post_record_holds_values() {
        let record = PostRecord {
            id: Uuid::nil(),
            title: "T".to_string(),
            summary: "S".to_string(),
            content: "C".to_string(),
            cover: Some("uploads/cover.png".to_string()),
            author_id: Uuid::nil(),
            author_username: "alice".to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
        };
        assert_eq!(record.author_username, "alice");
        assert_eq!(record.cover.as_deref(), Some("uploads/cover.png"));
    }
}
