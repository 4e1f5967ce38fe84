//! Integration tests for playback-api endpoints
//!
//! Covers account signup/login/logout, session checks, tag upserts and
//! summaries, comment threads (including the participation gate), the
//! activity page, and the health endpoint. Catalog-backed endpoints are
//! exercised at the unit level in the catalog module; nothing here talks
//! to the network.

use axum::{
    body::Body,
    http::{header, HeaderValue, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::util::ServiceExt; // for `oneshot` method

use playback_api::{build_router, AppState, CatalogClient};
use playback_common::config::CatalogCredentials;
use playback_common::db::songs::{self, SongRecord};

/// Test helper: in-memory database + router with a dummy catalog client
///
/// The catalog client never issues a request unless a catalog endpoint is
/// hit, so dummy credentials are safe here.
async fn setup() -> (Router, SqlitePool) {
    // A single connection keeps every request on the same in-memory database
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");
    playback_common::db::init_schema(&pool)
        .await
        .expect("Failed to apply schema");

    let catalog = CatalogClient::new(CatalogCredentials {
        client_id: "test-client".to_string(),
        client_secret: "test-secret".to_string(),
    })
    .expect("Failed to create catalog client");

    let state = AppState::new(pool.clone(), catalog);
    let app = build_router(state, HeaderValue::from_static("http://localhost:5173"));

    (app, pool)
}

/// Test helper: JSON request with optional session cookie
fn json_request(method: &str, uri: &str, body: &Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    builder.body(Body::from(body.to_string())).unwrap()
}

/// Test helper: bodyless request with optional session cookie
fn bare_request(method: &str, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    builder.body(Body::empty()).unwrap()
}

/// Test helper: extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Test helper: pull `name=value` out of the Set-Cookie header
fn cookie_pair(response: &axum::response::Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .expect("Set-Cookie header missing")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

/// Test helper: sign up a user and return their session cookie
async fn signup(app: &Router, username: &str) -> String {
    let body = json!({
        "email": format!("{username}@example.com"),
        "username": username,
        "password": "hunter2",
    });
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/signup", &body, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    cookie_pair(&response)
}

/// Test helper: seed a song-cache row so joins have something to hit
async fn seed_song(pool: &SqlitePool, id: &str, name: &str) {
    songs::upsert_song(
        pool,
        &SongRecord {
            song_id: id.to_string(),
            name: name.to_string(),
            kind: "track".to_string(),
            image_url: "https://img/cover".to_string(),
        },
    )
    .await
    .unwrap();
}

// =============================================================================
// Health Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _pool) = setup().await;

    let response = app
        .oneshot(bare_request("GET", "/health", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "playback-api");
    assert!(body["version"].is_string());
}

// =============================================================================
// Signup Tests
// =============================================================================

#[tokio::test]
async fn test_signup_sets_session_cookie() {
    let (app, _pool) = setup().await;

    let cookie = signup(&app, "ryan").await;
    assert!(cookie.starts_with("playback_session="));

    let response = app
        .oneshot(bare_request("GET", "/api/session", Some(&cookie)))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["session_set"], "ryan");
}

#[tokio::test]
async fn test_signup_missing_fields_rejected() {
    let (app, _pool) = setup().await;

    let body = json!({"email": "a@example.com", "username": "", "password": "pw"});
    let response = app
        .oneshot(json_request("POST", "/api/signup", &body, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["message"], "All fields are required");
}

#[tokio::test]
async fn test_signup_invalid_email_rejected() {
    let (app, _pool) = setup().await;

    let body = json!({"email": "not-an-email", "username": "ryan", "password": "pw"});
    let response = app
        .oneshot(json_request("POST", "/api/signup", &body, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signup_duplicate_email_conflicts() {
    let (app, _pool) = setup().await;
    signup(&app, "ryan").await;

    let body = json!({"email": "ryan@example.com", "username": "ryan2", "password": "pw"});
    let response = app
        .oneshot(json_request("POST", "/api/signup", &body, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["message"], "Email already exists");
}

#[tokio::test]
async fn test_signup_duplicate_username_conflicts() {
    let (app, _pool) = setup().await;
    signup(&app, "ryan").await;

    let body = json!({"email": "other@example.com", "username": "ryan", "password": "pw"});
    let response = app
        .oneshot(json_request("POST", "/api/signup", &body, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["message"], "Username already taken");
}

// =============================================================================
// Login / Logout / Session Tests
// =============================================================================

#[tokio::test]
async fn test_login_with_correct_credentials() {
    let (app, _pool) = setup().await;
    signup(&app, "ryan").await;

    let body = json!({"email": "ryan@example.com", "password": "hunter2"});
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/login", &body, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = cookie_pair(&response);

    let response = app
        .oneshot(bare_request("GET", "/api/session", Some(&cookie)))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["session_set"], "ryan");
}

#[tokio::test]
async fn test_login_with_wrong_password_rejected() {
    let (app, _pool) = setup().await;
    signup(&app, "ryan").await;

    let body = json!({"email": "ryan@example.com", "password": "wrong"});
    let response = app
        .oneshot(json_request("POST", "/api/login", &body, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_with_unknown_email_rejected() {
    let (app, _pool) = setup().await;

    let body = json!({"email": "nobody@example.com", "password": "pw"});
    let response = app
        .oneshot(json_request("POST", "/api/login", &body, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_ends_session() {
    let (app, _pool) = setup().await;
    let cookie = signup(&app, "ryan").await;

    let response = app
        .clone()
        .oneshot(bare_request("POST", "/api/logout", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The old token no longer resolves to a session
    let response = app
        .oneshot(bare_request("GET", "/api/session", Some(&cookie)))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["session_set"], "");
}

#[tokio::test]
async fn test_session_check_anonymous() {
    let (app, _pool) = setup().await;

    let response = app
        .oneshot(bare_request("GET", "/api/session", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["session_set"], "");
}

// =============================================================================
// Tag Tests
// =============================================================================

#[tokio::test]
async fn test_create_tag_requires_session() {
    let (app, _pool) = setup().await;

    let body = json!({"song_id": "song-1", "label": "chill"});
    let response = app
        .oneshot(json_request("POST", "/api/tags", &body, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_tag_summary_counts_and_mine() {
    let (app, pool) = setup().await;
    seed_song(&pool, "song-1", "Test Song").await;

    let ryan = signup(&app, "ryan").await;
    let gaetano = signup(&app, "gaetano").await;

    for (cookie, label) in [(ryan.as_str(), "chill"), (gaetano.as_str(), "chill")] {
        let body = json!({"song_id": "song-1", "label": label});
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/tags", &body, Some(cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    // Ryan re-tags; his previous label is replaced, not added
    let body = json!({"song_id": "song-1", "label": "hype"});
    app.clone()
        .oneshot(json_request("POST", "/api/tags", &body, Some(&ryan)))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(bare_request("GET", "/api/songs/song-1/tags", Some(&ryan)))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;

    assert_eq!(body["mine"], "hype");
    let counts = body["counts"].as_array().unwrap();
    assert_eq!(counts.len(), 2);
    // One "chill" (gaetano) and one "hype" (ryan)
    assert!(counts
        .iter()
        .all(|c| c["count"] == 1 && (c["label"] == "chill" || c["label"] == "hype")));

    // Anonymous callers see counts but no "mine"
    let response = app
        .oneshot(bare_request("GET", "/api/songs/song-1/tags", None))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert!(body["mine"].is_null());
}

#[tokio::test]
async fn test_create_tag_empty_label_rejected() {
    let (app, _pool) = setup().await;
    let cookie = signup(&app, "ryan").await;

    let body = json!({"song_id": "song-1", "label": "   "});
    let response = app
        .oneshot(json_request("POST", "/api/tags", &body, Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Comment Tests
// =============================================================================

#[tokio::test]
async fn test_create_comment_requires_session() {
    let (app, _pool) = setup().await;

    let body = json!({"song_id": "song-1", "content": "hello"});
    let response = app
        .oneshot(json_request("POST", "/api/comments", &body, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_comment_empty_content_rejected() {
    let (app, _pool) = setup().await;
    let cookie = signup(&app, "ryan").await;

    let body = json!({"song_id": "song-1", "content": "  "});
    let response = app
        .oneshot(json_request("POST", "/api/comments", &body, Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["message"], "Please enter text");
}

#[tokio::test]
async fn test_comment_thread_participation_gate() {
    let (app, _pool) = setup().await;
    let ryan = signup(&app, "ryan").await;
    let gaetano = signup(&app, "gaetano").await;

    let body = json!({"song_id": "song-1", "content": "first!"});
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/comments", &body, Some(&ryan)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let first_id = extract_json(response.into_body()).await["id"]
        .as_i64()
        .unwrap();

    // The author sees the thread
    let response = app
        .clone()
        .oneshot(bare_request("GET", "/api/songs/song-1/comments", Some(&ryan)))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["posted"], true);
    assert_eq!(body["comments"].as_array().unwrap().len(), 1);
    assert_eq!(body["comments"][0]["username"], "ryan");
    assert!(body["comments"][0]["date"].is_string());

    // A user who has not commented does not
    let response = app
        .clone()
        .oneshot(bare_request(
            "GET",
            "/api/songs/song-1/comments",
            Some(&gaetano),
        ))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["posted"], false);
    assert!(body["comments"].as_array().unwrap().is_empty());

    // Neither do anonymous callers
    let response = app
        .clone()
        .oneshot(bare_request("GET", "/api/songs/song-1/comments", None))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["posted"], false);

    // Once gaetano replies, the thread opens up for him too
    let body = json!({"song_id": "song-1", "content": "welcome", "parent_id": first_id});
    app.clone()
        .oneshot(json_request("POST", "/api/comments", &body, Some(&gaetano)))
        .await
        .unwrap();

    let response = app
        .oneshot(bare_request(
            "GET",
            "/api/songs/song-1/comments",
            Some(&gaetano),
        ))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["posted"], true);
    let comments = body["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[1]["parent_id"], first_id);
}

#[tokio::test]
async fn test_delete_comment_owner_only() {
    let (app, _pool) = setup().await;
    let ryan = signup(&app, "ryan").await;
    let gaetano = signup(&app, "gaetano").await;

    let body = json!({"song_id": "song-1", "content": "mine"});
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/comments", &body, Some(&ryan)))
        .await
        .unwrap();
    let id = extract_json(response.into_body()).await["id"]
        .as_i64()
        .unwrap();

    // Someone else cannot delete it
    let response = app
        .clone()
        .oneshot(bare_request(
            "DELETE",
            &format!("/api/comments/{id}"),
            Some(&gaetano),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The author can
    let response = app
        .oneshot(bare_request(
            "DELETE",
            &format!("/api/comments/{id}"),
            Some(&ryan),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// =============================================================================
// Activity Tests
// =============================================================================

#[tokio::test]
async fn test_activity_unknown_user_not_found() {
    let (app, _pool) = setup().await;

    let response = app
        .oneshot(bare_request("GET", "/api/users/nobody/activity", None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_activity_lists_tags_and_comments() {
    let (app, pool) = setup().await;
    seed_song(&pool, "song-1", "Test Song").await;
    let cookie = signup(&app, "ryan").await;

    let body = json!({"song_id": "song-1", "label": "chill"});
    app.clone()
        .oneshot(json_request("POST", "/api/tags", &body, Some(&cookie)))
        .await
        .unwrap();

    let body = json!({"song_id": "song-1", "content": "love this"});
    app.clone()
        .oneshot(json_request("POST", "/api/comments", &body, Some(&cookie)))
        .await
        .unwrap();

    let response = app
        .oneshot(bare_request("GET", "/api/users/ryan/activity", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;

    let tags = body["tags"].as_array().unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0]["label"], "chill");
    assert_eq!(tags[0]["song_name"], "Test Song");
    assert_eq!(tags[0]["kind"], "track");

    let comments = body["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["content"], "love this");
    assert_eq!(comments[0]["song_url"], "https://img/cover");
    assert!(comments[0]["date"].is_string());
}
