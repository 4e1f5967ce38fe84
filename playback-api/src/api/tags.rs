//! Mood/vibe tag endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use playback_common::db::tags;

use crate::error::{ApiError, ApiResult};
use crate::session::{CurrentUser, OptionalUser};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTagRequest {
    #[serde(default)]
    pub song_id: String,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct TagCountBody {
    pub label: String,
    pub count: i64,
}

/// Tag summary for one song: per-label tallies plus the caller's own label
#[derive(Debug, Serialize)]
pub struct TagSummary {
    pub counts: Vec<TagCountBody>,
    pub mine: Option<String>,
}

/// POST /api/tags
///
/// Sets the caller's tag on a song; a second tag on the same song replaces
/// the first. Requires a session.
pub async fn create_tag(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<CreateTagRequest>,
) -> ApiResult<Json<serde_json::Value>> {
    if request.song_id.is_empty() {
        return Err(ApiError::BadRequest("song_id is required".to_string()));
    }

    let label = request.label.trim();
    if label.is_empty() {
        return Err(ApiError::BadRequest("Tag label is required".to_string()));
    }

    tags::upsert_tag(&state.db, user.user_id, &request.song_id, label).await?;

    tracing::debug!(username = %user.username, song_id = %request.song_id, label, "Tag set");

    Ok(Json(json!({"message": "Tag created"})))
}

/// GET /api/songs/{id}/tags
///
/// Tallies per label plus `mine`, the caller's current label for this song
/// (null when anonymous or untagged).
pub async fn song_tags(
    State(state): State<AppState>,
    Path(song_id): Path<String>,
    OptionalUser(user): OptionalUser,
) -> ApiResult<Json<TagSummary>> {
    let counts = tags::counts_for_song(&state.db, &song_id).await?;

    let mine = match &user {
        Some(user) => tags::user_tag_for_song(&state.db, user.user_id, &song_id).await?,
        None => None,
    };

    Ok(Json(TagSummary {
        counts: counts
            .into_iter()
            .map(|c| TagCountBody {
                label: c.label,
                count: c.count,
            })
            .collect(),
        mine,
    }))
}
