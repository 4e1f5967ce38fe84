//! Music-catalog API integration
//!
//! Token acquisition, search, and per-entity detail fetches against the
//! external catalog, plus the flattened view models the handlers serve.

pub mod client;
pub mod models;

pub use client::{CatalogClient, CatalogError};
pub use models::{AlbumDetail, ArtistDetail, MediaKind, SearchItem, TrackDetail};
