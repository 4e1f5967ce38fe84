//! Mood/vibe tag rows
//!
//! A user holds at most one tag per song. The (user_id, song_id) primary
//! key enforces this; re-tagging replaces the previous label in place.

use crate::Result;
use sqlx::{Row, SqlitePool};

/// Per-label tally for one song
#[derive(Debug, Clone)]
pub struct TagCount {
    pub label: String,
    pub count: i64,
}

/// A user's tag joined with the cached song it points at
#[derive(Debug, Clone)]
pub struct UserTag {
    pub label: String,
    pub song_id: String,
    pub song_name: String,
    pub song_url: String,
    pub kind: String,
}

/// Set the caller's tag for a song, replacing any previous label
pub async fn upsert_tag(
    pool: &SqlitePool,
    user_id: i64,
    song_id: &str,
    label: &str,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO tags (user_id, song_id, label)
        VALUES (?, ?, ?)
        ON CONFLICT(user_id, song_id) DO UPDATE SET
            label = excluded.label,
            created_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(user_id)
    .bind(song_id)
    .bind(label)
    .execute(pool)
    .await?;

    Ok(())
}

/// Tag tallies for one song, most popular first
pub async fn counts_for_song(pool: &SqlitePool, song_id: &str) -> Result<Vec<TagCount>> {
    let rows = sqlx::query(
        r#"
        SELECT label, COUNT(*) AS n
        FROM tags
        WHERE song_id = ?
        GROUP BY label
        ORDER BY n DESC, label ASC
        "#,
    )
    .bind(song_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| TagCount {
            label: row.get("label"),
            count: row.get("n"),
        })
        .collect())
}

/// The label one user holds for one song, if any
pub async fn user_tag_for_song(
    pool: &SqlitePool,
    user_id: i64,
    song_id: &str,
) -> Result<Option<String>> {
    let label = sqlx::query_scalar("SELECT label FROM tags WHERE user_id = ? AND song_id = ?")
        .bind(user_id)
        .bind(song_id)
        .fetch_optional(pool)
        .await?;

    Ok(label)
}

/// All tags a user has placed, newest first, joined with the song cache
pub async fn tags_by_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<UserTag>> {
    let rows = sqlx::query(
        r#"
        SELECT t.label, t.song_id, s.name, s.image_url, s.kind
        FROM tags t
        JOIN songs s ON s.song_id = t.song_id
        WHERE t.user_id = ?
        ORDER BY t.created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| UserTag {
            label: row.get("label"),
            song_id: row.get("song_id"),
            song_name: row.get("name"),
            song_url: row.get("image_url"),
            kind: row.get("kind"),
        })
        .collect())
}
