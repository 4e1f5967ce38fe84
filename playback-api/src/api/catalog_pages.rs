//! Artist, album, and track detail endpoints
//!
//! Thin proxies over the catalog client; the flattening itself lives in
//! the catalog view models.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::catalog::{AlbumDetail, ArtistDetail, TrackDetail};
use crate::error::ApiResult;
use crate::AppState;

/// GET /api/artists/{id}
pub async fn get_artist(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ArtistDetail>> {
    let detail = state.catalog.artist(&id).await?;
    Ok(Json(detail))
}

/// GET /api/albums/{id}
pub async fn get_album(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<AlbumDetail>> {
    let detail = state.catalog.album(&id).await?;
    Ok(Json(detail))
}

/// GET /api/tracks/{id}
pub async fn get_track(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<TrackDetail>> {
    let detail = state.catalog.track(&id).await?;
    Ok(Json(detail))
}
