//! Catalog search endpoints
//!
//! Both endpoints opportunistically record every result in the song cache
//! so later tags/comments can resolve ids without another catalog call.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use playback_common::db::songs::{self, SongRecord};

use crate::catalog::{MediaKind, SearchItem};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Quick search returns a short list for the as-you-type dropdown
const QUICK_SEARCH_LIMIT: u32 = 5;

/// Broad search returns a longer list per kind
const BROAD_SEARCH_LIMIT: u32 = 10;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub search: String,
    /// artist, album, or track
    #[serde(default = "default_kind")]
    pub kind: String,
}

fn default_kind() -> String {
    "artist".to_string()
}

/// Broad search response: ten results of each kind
#[derive(Debug, Serialize)]
pub struct BroadSearchResponse {
    pub artists: Vec<SearchItem>,
    pub albums: Vec<SearchItem>,
    pub tracks: Vec<SearchItem>,
}

/// Record search sightings in the song cache
///
/// Tracks are cached with their album artwork, other kinds with their own.
async fn record_sightings(db: &SqlitePool, items: &[SearchItem]) -> ApiResult<()> {
    for item in items {
        songs::upsert_song(
            db,
            &SongRecord {
                song_id: item.id.clone(),
                name: item.name.clone(),
                kind: item.kind.as_str().to_string(),
                image_url: item.cache_image().to_string(),
            },
        )
        .await?;
    }

    Ok(())
}

/// POST /api/search
///
/// Five most relevant results of one kind, for the search bar dropdown.
pub async fn search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> ApiResult<Json<Vec<SearchItem>>> {
    if request.search.trim().is_empty() {
        return Err(ApiError::BadRequest("Search value is required".to_string()));
    }

    let kind: MediaKind = request
        .kind
        .parse()
        .map_err(ApiError::BadRequest)?;

    let items = state
        .catalog
        .search(&request.search, kind, QUICK_SEARCH_LIMIT)
        .await?;

    record_sightings(&state.db, &items).await?;

    Ok(Json(items))
}

/// GET /api/search/broad/{query}
///
/// Ten results of every kind at once, for when the dropdown was not enough.
/// The three catalog searches run concurrently.
pub async fn broad_search(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> ApiResult<Json<BroadSearchResponse>> {
    if query.trim().is_empty() {
        return Err(ApiError::BadRequest("Search value is required".to_string()));
    }

    let (artists, albums, tracks) = tokio::join!(
        state
            .catalog
            .search(&query, MediaKind::Artist, BROAD_SEARCH_LIMIT),
        state
            .catalog
            .search(&query, MediaKind::Album, BROAD_SEARCH_LIMIT),
        state
            .catalog
            .search(&query, MediaKind::Track, BROAD_SEARCH_LIMIT),
    );
    let (artists, albums, tracks) = (artists?, albums?, tracks?);

    record_sightings(&state.db, &artists).await?;
    record_sightings(&state.db, &albums).await?;
    record_sightings(&state.db, &tracks).await?;

    Ok(Json(BroadSearchResponse {
        artists,
        albums,
        tracks,
    }))
}
