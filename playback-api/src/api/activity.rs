//! User activity endpoint: everything a user has tagged and commented

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use playback_common::db::{comments, tags, users};

use crate::api::DATE_DISPLAY_FORMAT;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ActivityTag {
    pub label: String,
    pub song_id: String,
    pub song_name: String,
    pub song_url: String,
    pub kind: String,
}

#[derive(Debug, Serialize)]
pub struct ActivityComment {
    pub content: String,
    pub date: String,
    pub song_id: String,
    pub song_name: String,
    pub song_url: String,
    pub kind: String,
}

#[derive(Debug, Serialize)]
pub struct ActivityResponse {
    pub tags: Vec<ActivityTag>,
    pub comments: Vec<ActivityComment>,
}

/// GET /api/users/{username}/activity
///
/// Public profile data: the user's tags and comments, each joined with the
/// cached song so the page can render names and artwork directly.
pub async fn user_activity(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<ActivityResponse>> {
    let user_id = users::id_for_username(&state.db, &username)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Unknown user: {}", username)))?;

    let tags = tags::tags_by_user(&state.db, user_id).await?;
    let comments = comments::comments_by_user(&state.db, user_id).await?;

    Ok(Json(ActivityResponse {
        tags: tags
            .into_iter()
            .map(|t| ActivityTag {
                label: t.label,
                song_id: t.song_id,
                song_name: t.song_name,
                song_url: t.song_url,
                kind: t.kind,
            })
            .collect(),
        comments: comments
            .into_iter()
            .map(|c| ActivityComment {
                content: c.content,
                date: c.created_at.format(DATE_DISPLAY_FORMAT).to_string(),
                song_id: c.song_id,
                song_name: c.song_name,
                song_url: c.song_url,
                kind: c.kind,
            })
            .collect(),
    }))
}
