//! Catalog wire format and flattened view models
//!
//! The raw structs mirror the catalog's nested JSON; the view models are
//! the flat shapes the frontend consumes. Missing optional fields (images,
//! genres, release dates) degrade to empty values, never to errors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ========================================
// Media kinds
// ========================================

/// The three searchable entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Artist,
    Album,
    Track,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Artist => "artist",
            MediaKind::Album => "album",
            MediaKind::Track => "track",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "artist" => Ok(MediaKind::Artist),
            "album" => Ok(MediaKind::Album),
            "track" => Ok(MediaKind::Track),
            other => Err(format!("Unknown media kind: {}", other)),
        }
    }
}

// ========================================
// Wire format (deserialized from the catalog)
// ========================================

/// Token endpoint response
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: u64,
}

/// One page of search results for a single kind
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Top-level search response; only the requested kind is populated
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub artists: Option<Page<ArtistObject>>,
    pub albums: Option<Page<AlbumObject>>,
    pub tracks: Option<Page<TrackObject>>,
}

/// Artwork in one of several sizes, largest first
#[derive(Debug, Clone, Deserialize)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Followers {
    pub total: u64,
}

/// Minimal artist reference embedded in albums and tracks
#[derive(Debug, Clone, Deserialize)]
pub struct ArtistRef {
    pub id: Option<String>,
    pub name: String,
}

/// Full artist entity
#[derive(Debug, Clone, Deserialize)]
pub struct ArtistObject {
    pub id: String,
    pub name: String,
    pub images: Option<Vec<Image>>,
    pub genres: Option<Vec<String>>,
    pub followers: Option<Followers>,
}

/// Minimal track reference embedded in album track listings
#[derive(Debug, Clone, Deserialize)]
pub struct TrackRef {
    pub id: Option<String>,
    pub name: String,
}

/// Full album entity
#[derive(Debug, Clone, Deserialize)]
pub struct AlbumObject {
    pub id: String,
    pub name: String,
    pub album_type: Option<String>,
    pub total_tracks: Option<u32>,
    pub images: Option<Vec<Image>>,
    pub release_date: Option<String>,
    pub artists: Option<Vec<ArtistRef>>,
    pub tracks: Option<Page<TrackRef>>,
}

/// Full track entity
#[derive(Debug, Clone, Deserialize)]
pub struct TrackObject {
    pub id: String,
    pub name: String,
    pub album: Option<AlbumObject>,
    pub artists: Option<Vec<ArtistRef>>,
}

/// Top-tracks endpoint response
#[derive(Debug, Clone, Deserialize)]
pub struct TopTracksResponse {
    #[serde(default = "Vec::new")]
    pub tracks: Vec<TrackObject>,
}

/// Smallest artwork variant (images are ordered largest first)
fn smallest_image(images: &Option<Vec<Image>>) -> String {
    images
        .as_ref()
        .and_then(|imgs| imgs.last())
        .map(|img| img.url.clone())
        .unwrap_or_default()
}

/// Largest artwork variant, used on detail pages
fn largest_image(images: &Option<Vec<Image>>) -> String {
    images
        .as_ref()
        .and_then(|imgs| imgs.first())
        .map(|img| img.url.clone())
        .unwrap_or_default()
}

fn artist_names(artists: &Option<Vec<ArtistRef>>) -> Vec<String> {
    artists
        .as_ref()
        .map(|refs| refs.iter().map(|a| a.name.clone()).collect())
        .unwrap_or_default()
}

fn named_refs(artists: &Option<Vec<ArtistRef>>) -> Vec<NamedRef> {
    artists
        .as_ref()
        .map(|refs| {
            refs.iter()
                .map(|a| NamedRef {
                    name: a.name.clone(),
                    id: a.id.clone().unwrap_or_default(),
                })
                .collect()
        })
        .unwrap_or_default()
}

// ========================================
// View models (served to the frontend)
// ========================================

/// Flattened search result row
#[derive(Debug, Clone, Serialize)]
pub struct SearchItem {
    pub id: String,
    pub name: String,
    pub kind: MediaKind,
    /// Smallest artwork of the entity itself (empty for bare tracks)
    pub image: String,
    pub artists: Vec<String>,
    /// Smallest artwork of a track's album (empty for other kinds)
    pub album_image: String,
}

impl SearchItem {
    pub fn from_artist(artist: &ArtistObject) -> Self {
        Self {
            id: artist.id.clone(),
            name: artist.name.clone(),
            kind: MediaKind::Artist,
            image: smallest_image(&artist.images),
            artists: Vec::new(),
            album_image: String::new(),
        }
    }

    pub fn from_album(album: &AlbumObject) -> Self {
        Self {
            id: album.id.clone(),
            name: album.name.clone(),
            kind: MediaKind::Album,
            image: smallest_image(&album.images),
            artists: artist_names(&album.artists),
            album_image: String::new(),
        }
    }

    pub fn from_track(track: &TrackObject) -> Self {
        Self {
            id: track.id.clone(),
            name: track.name.clone(),
            kind: MediaKind::Track,
            image: String::new(),
            artists: artist_names(&track.artists),
            album_image: smallest_image(
                &track.album.as_ref().and_then(|album| album.images.clone()),
            ),
        }
    }

    /// Artwork recorded in the song cache: a track shows its album art,
    /// other kinds their own
    pub fn cache_image(&self) -> &str {
        match self.kind {
            MediaKind::Track => &self.album_image,
            _ => &self.image,
        }
    }
}

/// Name + id pair for embedded references
#[derive(Debug, Clone, Serialize)]
pub struct NamedRef {
    pub name: String,
    pub id: String,
}

/// One of an artist's top tracks
#[derive(Debug, Clone, Serialize)]
pub struct TopTrack {
    pub name: String,
    pub id: String,
    pub image: String,
    pub album_id: String,
}

/// Artist detail page payload
#[derive(Debug, Clone, Serialize)]
pub struct ArtistDetail {
    pub name: String,
    pub followers: u64,
    pub image: String,
    pub genres: Vec<String>,
    pub top_tracks: Vec<TopTrack>,
}

impl ArtistDetail {
    pub fn from_parts(artist: &ArtistObject, top_tracks: &[TrackObject]) -> Self {
        Self {
            name: artist.name.clone(),
            followers: artist.followers.as_ref().map(|f| f.total).unwrap_or(0),
            image: largest_image(&artist.images),
            genres: artist.genres.clone().unwrap_or_default(),
            top_tracks: top_tracks
                .iter()
                .map(|track| TopTrack {
                    name: track.name.clone(),
                    id: track.id.clone(),
                    image: largest_image(
                        &track.album.as_ref().and_then(|album| album.images.clone()),
                    ),
                    album_id: track
                        .album
                        .as_ref()
                        .map(|album| album.id.clone())
                        .unwrap_or_default(),
                })
                .collect(),
        }
    }
}

/// Album detail page payload
#[derive(Debug, Clone, Serialize)]
pub struct AlbumDetail {
    pub name: String,
    pub album_type: String,
    pub total_tracks: u32,
    pub image: String,
    pub release_date: String,
    pub artists: Vec<NamedRef>,
    pub tracks: Vec<NamedRef>,
}

impl From<&AlbumObject> for AlbumDetail {
    fn from(album: &AlbumObject) -> Self {
        Self {
            name: album.name.clone(),
            album_type: album.album_type.clone().unwrap_or_default(),
            total_tracks: album.total_tracks.unwrap_or(0),
            image: largest_image(&album.images),
            release_date: album.release_date.clone().unwrap_or_default(),
            artists: named_refs(&album.artists),
            tracks: album
                .tracks
                .as_ref()
                .map(|page| {
                    page.items
                        .iter()
                        .map(|track| NamedRef {
                            name: track.name.clone(),
                            id: track.id.clone().unwrap_or_default(),
                        })
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}

/// Track detail page payload
#[derive(Debug, Clone, Serialize)]
pub struct TrackDetail {
    pub name: String,
    pub album_type: String,
    pub album_name: String,
    pub album_id: String,
    pub image: String,
    pub release_date: String,
    pub artists: Vec<NamedRef>,
}

impl From<&TrackObject> for TrackDetail {
    fn from(track: &TrackObject) -> Self {
        let album = track.album.as_ref();
        Self {
            name: track.name.clone(),
            album_type: album
                .and_then(|a| a.album_type.clone())
                .unwrap_or_default(),
            album_name: album.map(|a| a.name.clone()).unwrap_or_default(),
            album_id: album.map(|a| a.id.clone()).unwrap_or_default(),
            image: largest_image(&album.and_then(|a| a.images.clone())),
            release_date: album
                .and_then(|a| a.release_date.clone())
                .unwrap_or_default(),
            artists: named_refs(&track.artists),
        }
    }
}
