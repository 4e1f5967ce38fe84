//! Cookie-session extraction
//!
//! The session cookie carries an opaque token; the matching row in the
//! sessions table is the source of truth. Handlers declare their auth
//! requirement through the extractor they take: [`CurrentUser`] rejects
//! with 401, [`OptionalUser`] admits anonymous requests.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use playback_common::config::{SESSION_COOKIE, SESSION_TTL_SECS};
use playback_common::db::sessions;

use crate::error::ApiError;
use crate::AppState;

/// The authenticated user behind a request
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    /// Token backing this session, needed for logout
    pub token: String,
}

/// Like [`CurrentUser`], but `None` instead of 401 for anonymous requests
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<CurrentUser>);

/// Pull the session token out of the Cookie header, if present
fn session_token(parts: &Parts) -> Option<String> {
    let header = parts.headers.get(header::COOKIE)?.to_str().ok()?;

    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == SESSION_COOKIE && !value.is_empty() {
            Some(value.to_string())
        } else {
            None
        }
    })
}

/// Resolve the request's session against the database
async fn load_user(parts: &Parts, state: &AppState) -> Result<Option<CurrentUser>, ApiError> {
    let Some(token) = session_token(parts) else {
        return Ok(None);
    };

    let session = sessions::find_session(&state.db, &token).await?;

    Ok(session.map(|s| CurrentUser {
        user_id: s.user_id,
        username: s.username,
        email: s.email,
        token: s.token,
    }))
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        load_user(parts, state)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Must be logged in".to_string()))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for OptionalUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(OptionalUser(load_user(parts, state).await?))
    }
}

/// Set-Cookie value establishing a session
///
/// SameSite=None + Secure because the frontend is served from a different
/// origin; HttpOnly keeps the token away from scripts.
pub fn session_cookie(token: &str) -> String {
    format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=None; Secure",
        SESSION_COOKIE, token, SESSION_TTL_SECS
    )
}

/// Set-Cookie value clearing the session cookie
pub fn clear_session_cookie() -> String {
    format!(
        "{}=; Path=/; Max-Age=0; HttpOnly; SameSite=None; Secure",
        SESSION_COOKIE
    )
}
