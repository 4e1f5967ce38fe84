//! Comment endpoints
//!
//! Comments are threaded via parent_id and deletable only by their author.
//! The listing carries a participation gate: the full thread is returned
//! only once the requesting user has commented on the song themselves.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use playback_common::db::comments;

use crate::api::DATE_DISPLAY_FORMAT;
use crate::error::{ApiError, ApiResult};
use crate::session::{CurrentUser, OptionalUser};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    #[serde(default)]
    pub song_id: String,
    #[serde(default)]
    pub content: String,
    pub parent_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CommentBody {
    pub id: i64,
    pub content: String,
    pub date: String,
    pub username: String,
    pub parent_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SongCommentsResponse {
    /// Whether the requesting user has commented on this song
    pub posted: bool,
    pub comments: Vec<CommentBody>,
}

/// POST /api/comments
///
/// Requires a session; empty content is rejected before touching the
/// database.
pub async fn create_comment(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<CreateCommentRequest>,
) -> ApiResult<(StatusCode, Json<serde_json::Value>)> {
    if request.content.trim().is_empty() {
        return Err(ApiError::BadRequest("Please enter text".to_string()));
    }

    if request.song_id.is_empty() {
        return Err(ApiError::BadRequest("song_id is required".to_string()));
    }

    let id = comments::insert_comment(
        &state.db,
        user.user_id,
        &request.song_id,
        request.content.trim(),
        request.parent_id,
    )
    .await?;

    tracing::debug!(username = %user.username, song_id = %request.song_id, id, "Comment created");

    Ok((StatusCode::CREATED, Json(json!({"id": id}))))
}

/// GET /api/songs/{id}/comments
///
/// The thread is only revealed to users who have commented on the song;
/// everyone else gets `posted = false` and an empty list.
pub async fn song_comments(
    State(state): State<AppState>,
    Path(song_id): Path<String>,
    OptionalUser(user): OptionalUser,
) -> ApiResult<Json<SongCommentsResponse>> {
    let rows = comments::comments_for_song(&state.db, &song_id).await?;

    let posted = match &user {
        Some(user) => rows.iter().any(|c| c.user_id == user.user_id),
        None => false,
    };

    let comments = if posted {
        rows.into_iter()
            .map(|c| CommentBody {
                id: c.comment_id,
                content: c.content,
                date: c.created_at.format(DATE_DISPLAY_FORMAT).to_string(),
                username: c.username,
                parent_id: c.parent_id,
            })
            .collect()
    } else {
        Vec::new()
    };

    Ok(Json(SongCommentsResponse { posted, comments }))
}

/// DELETE /api/comments/{id}
///
/// Author-only; a comment that is missing or someone else's is a 404
/// either way.
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(comment_id): Path<i64>,
    user: CurrentUser,
) -> ApiResult<Json<serde_json::Value>> {
    let deleted = comments::delete_comment(&state.db, comment_id, user.user_id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Comment not found".to_string()));
    }

    tracing::debug!(username = %user.username, comment_id, "Comment deleted");

    Ok(Json(json!({"message": "Comment deleted"})))
}
