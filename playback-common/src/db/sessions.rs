//! Server-side session rows
//!
//! Each login mints an opaque uuid token stored here; the cookie carries
//! only the token. Expiry is checked in SQL so stale rows are never
//! returned even before a purge runs.

use crate::config::SESSION_TTL_SECS;
use crate::db::users::User;
use crate::Result;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// An authenticated session
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub expires_at: i64,
}

/// Mint a session for a user and persist it
pub async fn create_session(pool: &SqlitePool, user: &User) -> Result<Session> {
    let session = Session {
        token: Uuid::new_v4().to_string(),
        user_id: user.user_id,
        username: user.username.clone(),
        email: user.email.clone(),
        expires_at: chrono::Utc::now().timestamp() + SESSION_TTL_SECS,
    };

    sqlx::query(
        r#"
        INSERT INTO sessions (token, user_id, username, email, expires_at)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&session.token)
    .bind(session.user_id)
    .bind(&session.username)
    .bind(&session.email)
    .bind(session.expires_at)
    .execute(pool)
    .await?;

    Ok(session)
}

/// Load a live session by token; expired rows are ignored
pub async fn find_session(pool: &SqlitePool, token: &str) -> Result<Option<Session>> {
    let now = chrono::Utc::now().timestamp();

    let row = sqlx::query(
        r#"
        SELECT token, user_id, username, email, expires_at
        FROM sessions
        WHERE token = ? AND expires_at > ?
        "#,
    )
    .bind(token)
    .bind(now)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| Session {
        token: row.get("token"),
        user_id: row.get("user_id"),
        username: row.get("username"),
        email: row.get("email"),
        expires_at: row.get("expires_at"),
    }))
}

/// Remove a session (logout)
pub async fn delete_session(pool: &SqlitePool, token: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await?;

    Ok(())
}

/// Drop all expired rows, returning how many were removed
pub async fn purge_expired(pool: &SqlitePool) -> Result<u64> {
    let now = chrono::Utc::now().timestamp();

    let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
        .bind(now)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}
