//! Database helpers for accounts.

use anyhow::{Context, Result};
use sqlx::{PgPool, Row};
use tracing::Instrument;
use uuid::Uuid;

/// Outcome when attempting to create a new account.
#[derive(Debug)]
pub(super) enum InsertOutcome {
    Created(Uuid),
    Conflict,
}

/// Stored account fields needed by login.
pub(super) struct UserRecord {
    pub(super) id: Uuid,
    pub(super) username: String,
    pub(super) password_hash: String,
}

pub(super) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

/// Insert a new account; the unique constraint on `username` is the
/// authority on duplicates, there is no separate existence check to race.
pub(super) async fn insert_user(
    pool: &PgPool,
    username: &str,
    password_hash: &str,
) -> Result<InsertOutcome> {
    let query = r"
        INSERT INTO users (username, password_hash)
        VALUES ($1, $2)
        RETURNING id
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(username)
        .bind(password_hash)
        .fetch_one(pool)
        .instrument(span)
        .await;

    match row {
        Ok(row) => Ok(InsertOutcome::Created(row.get("id"))),
        Err(err) if is_unique_violation(&err) => Ok(InsertOutcome::Conflict),
        Err(err) => Err(err).context("failed to insert user"),
    }
}

/// Look up an account by username (used by login).
pub(super) async fn lookup_user_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<UserRecord>> {
    let query = "SELECT id, username, password_hash FROM users WHERE username = $1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(username)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to lookup user")?;

    Ok(row.map(|row| UserRecord {
        id: row.get("id"),
        username: row.get("username"),
        password_hash: row.get("password_hash"),
    }))
}
