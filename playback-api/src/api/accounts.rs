//! Account and session endpoints: signup, login, logout, session check

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use playback_common::auth::{generate_salt, hash_password, verify_password};
use playback_common::db::users::User;
use playback_common::db::{sessions, users};

use crate::error::{ApiError, ApiResult};
use crate::session::{clear_session_cookie, session_cookie, OptionalUser};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Session check response; `session_set` is the username or empty
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_set: String,
}

/// POST /api/signup
///
/// Creates an account and logs the new user straight in (session cookie on
/// the 201 response). Duplicate email/username each get a field-specific
/// 409 so the form can point at the offending field.
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> ApiResult<impl IntoResponse> {
    if request.email.is_empty() || request.username.is_empty() || request.password.is_empty() {
        return Err(ApiError::BadRequest("All fields are required".to_string()));
    }

    if !request.email.contains('@') {
        return Err(ApiError::BadRequest("Invalid email format".to_string()));
    }

    if users::email_exists(&state.db, &request.email).await? {
        return Err(ApiError::Conflict("Email already exists".to_string()));
    }

    if users::username_exists(&state.db, &request.username).await? {
        return Err(ApiError::Conflict("Username already taken".to_string()));
    }

    let salt = generate_salt();
    let hash = hash_password(&request.password, &salt);

    let user_id =
        users::insert_user(&state.db, &request.username, &request.email, &hash, &salt).await?;

    tracing::info!(username = %request.username, user_id, "New user signed up");

    let user = User {
        user_id,
        username: request.username,
        email: request.email,
        password_hash: hash,
        password_salt: salt,
        bio: "No Bio".to_string(),
    };
    let session = sessions::create_session(&state.db, &user).await?;

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, session_cookie(&session.token))],
        Json(json!({"message": "User signed up successfully"})),
    ))
}

/// POST /api/login
///
/// One non-committal 401 covers both unknown email and wrong password.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    if request.email.is_empty() || request.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }

    let user = users::find_by_email(&state.db, &request.email).await?;

    let user = match user {
        Some(user)
            if verify_password(&request.password, &user.password_salt, &user.password_hash) =>
        {
            user
        }
        _ => {
            return Err(ApiError::Unauthorized(
                "Password or email does not match".to_string(),
            ))
        }
    };

    let session = sessions::create_session(&state.db, &user).await?;

    tracing::info!(username = %user.username, "User logged in");

    Ok((
        [(header::SET_COOKIE, session_cookie(&session.token))],
        Json(json!({"message": "Login successful"})),
    ))
}

/// POST /api/logout
///
/// Deletes the server-side session row and expires the cookie. Succeeds
/// even without a session.
pub async fn logout(
    State(state): State<AppState>,
    OptionalUser(user): OptionalUser,
) -> ApiResult<impl IntoResponse> {
    if let Some(user) = user {
        sessions::delete_session(&state.db, &user.token).await?;
        tracing::info!(username = %user.username, "User logged out");
    }

    Ok((
        [(header::SET_COOKIE, clear_session_cookie())],
        Json(json!({"message": "Logged out successfully"})),
    ))
}

/// GET /api/session
///
/// Never errors: anonymous callers get an empty username.
pub async fn session_check(OptionalUser(user): OptionalUser) -> Json<SessionResponse> {
    Json(SessionResponse {
        session_set: user.map(|u| u.username).unwrap_or_default(),
    })
}
