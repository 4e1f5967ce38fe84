//! Database access for PlayBack
//!
//! One module per table. All SQL lives here; handlers never build queries.

pub mod comments;
pub mod init;
pub mod sessions;
pub mod songs;
pub mod tags;
pub mod users;

pub use init::{init_database, init_schema};
