//! playback-api library - PlayBack backend service
//!
//! HTTP API for the PlayBack music-discussion platform: catalog search and
//! detail proxying, mood/vibe tags, comments, and cookie-session accounts.

use axum::http::{header, HeaderValue, Method};
use axum::routing::{delete, get, post};
use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod session;

pub use catalog::CatalogClient;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Music-catalog API client
    pub catalog: CatalogClient,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, catalog: CatalogClient) -> Self {
        Self { db, catalog }
    }
}

/// Build application router
///
/// `frontend_origin` is the single origin allowed to send credentialed
/// requests; cookie auth rules out a wildcard here.
pub fn build_router(state: AppState, frontend_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(frontend_origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        // Accounts & sessions
        .route("/api/signup", post(api::accounts::signup))
        .route("/api/login", post(api::accounts::login))
        .route("/api/logout", post(api::accounts::logout))
        .route("/api/session", get(api::accounts::session_check))
        // Catalog search & detail
        .route("/api/search", post(api::search::search))
        .route("/api/search/broad/:query", get(api::search::broad_search))
        .route("/api/artists/:id", get(api::catalog_pages::get_artist))
        .route("/api/albums/:id", get(api::catalog_pages::get_album))
        .route("/api/tracks/:id", get(api::catalog_pages::get_track))
        // Tags
        .route("/api/tags", post(api::tags::create_tag))
        .route("/api/songs/:id/tags", get(api::tags::song_tags))
        // Comments
        .route("/api/comments", post(api::comments::create_comment))
        .route("/api/comments/:id", delete(api::comments::delete_comment))
        .route("/api/songs/:id/comments", get(api::comments::song_comments))
        // Activity
        .route("/api/users/:username/activity", get(api::activity::user_activity))
        .merge(api::health::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
