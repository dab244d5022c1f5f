//! Core library for a small personal music catalog: artists, albums, tracks
//! and per-user playlists in an embedded SQLite database, with bcrypt-backed
//! accounts.
//!
//! The layers, leaves first: `db` (one function per query), `auth`
//! (registration and login), `session` (who is signed in, what is selected)
//! and `catalog` (display-ready listings and filtering on top of `db`).
pub mod auth;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod session;

pub use auth::{BcryptHasher, PasswordHasher};
pub use catalog::{filter_listing, filter_names, format_duration, Catalog, Listing};
pub use config::Config;
pub use error::{CatalogError, Result};
pub use models::{Album, Artist, CatalogSummary, Playlist, Track, User};
pub use session::Session;
