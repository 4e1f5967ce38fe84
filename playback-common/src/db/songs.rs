//! Catalog entity cache
//!
//! Every search result (artist, album, or track) is recorded here so that
//! tags, comments, and activity pages can resolve a song_id to a display
//! name and artwork without another catalog round-trip.

use crate::Result;
use sqlx::{Row, SqlitePool};

/// Cached catalog entity
#[derive(Debug, Clone)]
pub struct SongRecord {
    pub song_id: String,
    pub name: String,
    pub kind: String,
    pub image_url: String,
}

/// Record a catalog entity if not already present
///
/// Rows are write-once: a later sighting of the same id never mutates the
/// cached name or artwork.
pub async fn upsert_song(pool: &SqlitePool, song: &SongRecord) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO songs (song_id, name, kind, image_url)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(song_id) DO NOTHING
        "#,
    )
    .bind(&song.song_id)
    .bind(&song.name)
    .bind(&song.kind)
    .bind(&song.image_url)
    .execute(pool)
    .await?;

    Ok(())
}

/// Load a cached entity by catalog id
pub async fn get_song(pool: &SqlitePool, song_id: &str) -> Result<Option<SongRecord>> {
    let row = sqlx::query(
        r#"
        SELECT song_id, name, kind, image_url
        FROM songs
        WHERE song_id = ?
        "#,
    )
    .bind(song_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| SongRecord {
        song_id: row.get("song_id"),
        name: row.get("name"),
        kind: row.get("kind"),
        image_url: row.get("image_url"),
    }))
}
