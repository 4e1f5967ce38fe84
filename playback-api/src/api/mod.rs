//! HTTP API handlers for playback-api

pub mod accounts;
pub mod activity;
pub mod catalog_pages;
pub mod comments;
pub mod health;
pub mod search;
pub mod tags;

/// Display format for comment/activity dates, e.g. "Aug-05-26 03PM"
pub(crate) const DATE_DISPLAY_FORMAT: &str = "%b-%d-%y %I%p";
