//! Comment rows
//!
//! Comments attach to a song and optionally to a parent comment (replies).
//! Deletion is owner-only and happens in a single guarded statement.

use crate::Result;
use chrono::NaiveDateTime;
use sqlx::{Row, SqlitePool};

/// A comment on a song, joined with its author's username
#[derive(Debug, Clone)]
pub struct SongComment {
    pub comment_id: i64,
    pub content: String,
    pub created_at: NaiveDateTime,
    pub user_id: i64,
    pub username: String,
    pub parent_id: Option<i64>,
}

/// A user's comment joined with the cached song it was left on
#[derive(Debug, Clone)]
pub struct UserComment {
    pub content: String,
    pub created_at: NaiveDateTime,
    pub song_id: String,
    pub song_name: String,
    pub song_url: String,
    pub kind: String,
}

/// Insert a comment and return its id
pub async fn insert_comment(
    pool: &SqlitePool,
    user_id: i64,
    song_id: &str,
    content: &str,
    parent_id: Option<i64>,
) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO comments (content, user_id, song_id, parent_id)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(content)
    .bind(user_id)
    .bind(song_id)
    .bind(parent_id)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// All comments on a song, oldest first
pub async fn comments_for_song(pool: &SqlitePool, song_id: &str) -> Result<Vec<SongComment>> {
    let rows = sqlx::query(
        r#"
        SELECT c.comment_id, c.content, c.created_at, c.user_id, u.username, c.parent_id
        FROM comments c
        JOIN users u ON u.user_id = c.user_id
        WHERE c.song_id = ?
        ORDER BY c.created_at ASC, c.comment_id ASC
        "#,
    )
    .bind(song_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| SongComment {
            comment_id: row.get("comment_id"),
            content: row.get("content"),
            created_at: row.get("created_at"),
            user_id: row.get("user_id"),
            username: row.get("username"),
            parent_id: row.get("parent_id"),
        })
        .collect())
}

/// Delete a comment the caller owns
///
/// Returns false when the comment does not exist or belongs to someone else.
pub async fn delete_comment(pool: &SqlitePool, comment_id: i64, user_id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM comments WHERE comment_id = ? AND user_id = ?")
        .bind(comment_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// All comments a user has written, newest first, joined with the song cache
pub async fn comments_by_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<UserComment>> {
    let rows = sqlx::query(
        r#"
        SELECT c.content, c.created_at, c.song_id, s.name, s.image_url, s.kind
        FROM comments c
        JOIN songs s ON s.song_id = c.song_id
        WHERE c.user_id = ?
        ORDER BY c.created_at DESC, c.comment_id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| UserComment {
            content: row.get("content"),
            created_at: row.get("created_at"),
            song_id: row.get("song_id"),
            song_name: row.get("name"),
            song_url: row.get("image_url"),
            kind: row.get("kind"),
        })
        .collect())
}
