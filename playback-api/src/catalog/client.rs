//! Catalog API client
//!
//! Wraps the external music-catalog REST API: client-credentials token
//! acquisition with in-process caching, search, and per-entity detail
//! fetches.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use playback_common::config::CatalogCredentials;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Mutex;

use super::models::{
    AlbumDetail, AlbumObject, ArtistDetail, ArtistObject, MediaKind, SearchItem, SearchResponse,
    TokenResponse, TopTracksResponse, TrackDetail, TrackObject,
};

const CATALOG_API_BASE: &str = "https://api.spotify.com/v1";
const CATALOG_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Refresh the cached token this long before it actually expires
const TOKEN_REFRESH_MARGIN_SECS: u64 = 60;

/// Catalog client errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Token acquisition failed: {0}")]
    AuthFailed(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Cached bearer token with its refresh deadline
struct CachedToken {
    access_token: String,
    refresh_at: Instant,
}

/// Music-catalog API client
///
/// Cheap to clone; clones share the HTTP connection pool and the token
/// cache.
#[derive(Clone)]
pub struct CatalogClient {
    http_client: reqwest::Client,
    credentials: CatalogCredentials,
    token: Arc<Mutex<Option<CachedToken>>>,
}

impl CatalogClient {
    pub fn new(credentials: CatalogCredentials) -> Result<Self, CatalogError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            credentials,
            token: Arc::new(Mutex::new(None)),
        })
    }

    /// Get a bearer token, reusing the cached one while it is fresh
    ///
    /// Client-credentials grant: POST the token endpoint with Basic auth
    /// over base64(client_id:client_secret). Concurrent callers share one
    /// refresh because the cache lock is held across the request.
    async fn bearer_token(&self) -> Result<String, CatalogError> {
        let mut cached = self.token.lock().await;

        if let Some(token) = cached.as_ref() {
            if Instant::now() < token.refresh_at {
                return Ok(token.access_token.clone());
            }
        }

        tracing::debug!("Requesting new catalog access token");

        let basic = BASE64.encode(format!(
            "{}:{}",
            self.credentials.client_id, self.credentials.client_secret
        ));

        let response = self
            .http_client
            .post(CATALOG_TOKEN_URL)
            .header("Authorization", format!("Basic {}", basic))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::AuthFailed(format!("{}: {}", status, body)));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::AuthFailed(e.to_string()))?;

        let refresh_in = token.expires_in.saturating_sub(TOKEN_REFRESH_MARGIN_SECS);
        let access_token = token.access_token.clone();
        *cached = Some(CachedToken {
            access_token: token.access_token,
            refresh_at: Instant::now() + Duration::from_secs(refresh_in),
        });

        tracing::info!(expires_in = token.expires_in, "Obtained catalog access token");

        Ok(access_token)
    }

    /// Authenticated GET returning deserialized JSON
    ///
    /// `entity` names the (kind, id) a 404 should be attributed to; list
    /// endpoints pass None and surface 404 as a generic API error.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        entity: Option<(&'static str, &str)>,
    ) -> Result<T, CatalogError> {
        let token = self.bearer_token().await?;

        tracing::debug!(url = %url, "Querying catalog API");

        let response = self
            .http_client
            .get(url)
            .query(query)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        let status = response.status();

        if status == 404 {
            if let Some((kind, id)) = entity {
                return Err(CatalogError::NotFound {
                    kind,
                    id: id.to_string(),
                });
            }
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| CatalogError::Parse(e.to_string()))
    }

    /// Search the catalog for one kind of entity
    ///
    /// An empty result set is an empty vector, not an error.
    pub async fn search(
        &self,
        query: &str,
        kind: MediaKind,
        limit: u32,
    ) -> Result<Vec<SearchItem>, CatalogError> {
        let url = format!("{}/search", CATALOG_API_BASE);
        let limit = limit.to_string();
        let response: SearchResponse = self
            .get_json(
                &url,
                &[("q", query), ("type", kind.as_str()), ("limit", limit.as_str())],
                None,
            )
            .await?;

        let items = match kind {
            MediaKind::Artist => response
                .artists
                .map(|page| page.items.iter().map(SearchItem::from_artist).collect::<Vec<_>>())
                .unwrap_or_default(),
            MediaKind::Album => response
                .albums
                .map(|page| page.items.iter().map(SearchItem::from_album).collect::<Vec<_>>())
                .unwrap_or_default(),
            MediaKind::Track => response
                .tracks
                .map(|page| page.items.iter().map(SearchItem::from_track).collect::<Vec<_>>())
                .unwrap_or_default(),
        };

        tracing::debug!(query = %query, kind = %kind, results = items.len(), "Catalog search complete");

        Ok(items)
    }

    /// Fetch artist detail plus top tracks
    pub async fn artist(&self, id: &str) -> Result<ArtistDetail, CatalogError> {
        let artist_url = format!("{}/artists/{}", CATALOG_API_BASE, id);
        let artist: ArtistObject = self
            .get_json(&artist_url, &[], Some(("Artist", id)))
            .await?;

        let tracks_url = format!("{}/artists/{}/top-tracks", CATALOG_API_BASE, id);
        let top_tracks: TopTracksResponse = self
            .get_json(&tracks_url, &[("market", "US")], Some(("Artist", id)))
            .await?;

        tracing::info!(id = %id, name = %artist.name, "Retrieved artist from catalog");

        Ok(ArtistDetail::from_parts(&artist, &top_tracks.tracks))
    }

    /// Fetch album detail
    pub async fn album(&self, id: &str) -> Result<AlbumDetail, CatalogError> {
        let url = format!("{}/albums/{}", CATALOG_API_BASE, id);
        let album: AlbumObject = self.get_json(&url, &[], Some(("Album", id))).await?;

        tracing::info!(id = %id, name = %album.name, "Retrieved album from catalog");

        Ok(AlbumDetail::from(&album))
    }

    /// Fetch track detail
    pub async fn track(&self, id: &str) -> Result<TrackDetail, CatalogError> {
        let url = format!("{}/tracks/{}", CATALOG_API_BASE, id);
        let track: TrackObject = self.get_json(&url, &[], Some(("Track", id))).await?;

        tracing::info!(id = %id, name = %track.name, "Retrieved track from catalog");

        Ok(TrackDetail::from(&track))
    }
}
