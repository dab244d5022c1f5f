//! Display-oriented facade over the repository.
//!
//! Reads come back as `(entities, display_names)` pairs so a list widget can
//! render the names while keeping the entities for selection. Mutations return
//! `Result` and expect the caller to re-fetch afterwards. Filtering is done in
//! memory on the fetched names.

use log::info;
use rusqlite::Connection;

use crate::auth::{self, BcryptHasher, PasswordHasher};
use crate::config::Config;
use crate::db;
use crate::db::guards::{required_id, required_text};
use crate::error::{CatalogError, Result};
use crate::models::{Album, Artist, CatalogSummary, Playlist, Track, User};
use crate::session::Session;

/// Entities paired index-for-index with their display strings.
pub type Listing<T> = (Vec<T>, Vec<String>);

/// Format a duration in seconds as `m:ss`. Minutes are not wrapped into hours.
pub fn format_duration(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Case-insensitive substring match; a blank query matches everything.
pub fn matches_query(name: &str, query: &str) -> bool {
    let query = query.trim();
    query.is_empty() || name.to_lowercase().contains(&query.to_lowercase())
}

/// Keep the names that contain `query`, ignoring case.
pub fn filter_names<S: AsRef<str>>(names: &[S], query: &str) -> Vec<String> {
    names
        .iter()
        .map(|name| name.as_ref())
        .filter(|name| matches_query(name, query))
        .map(str::to_string)
        .collect()
}

/// Filter a listing by its display names, keeping entities aligned.
pub fn filter_listing<T>(listing: Listing<T>, query: &str) -> Listing<T> {
    let (items, names) = listing;
    items
        .into_iter()
        .zip(names)
        .filter(|(_, name)| matches_query(name, query))
        .unzip()
}

fn listing<T>(items: Vec<T>, display: impl Fn(&T) -> String) -> Listing<T> {
    let names = items.iter().map(display).collect();
    (items, names)
}

/// `Ok(true)` when a lookup failed only because the row is gone.
fn is_gone<T>(lookup: Result<T>) -> Result<bool> {
    match lookup {
        Ok(_) => Ok(false),
        Err(err) if err.is_not_found() => Ok(true),
        Err(err) => Err(err),
    }
}

/// One open catalog database plus the hasher used for its accounts.
pub struct Catalog<H = BcryptHasher> {
    conn: Connection,
    hasher: H,
}

impl Catalog<BcryptHasher> {
    /// Open the database named by `config`, creating it on first run.
    pub fn open(config: &Config) -> Result<Self> {
        let conn = db::open_catalog(&config.db_path)?;
        Ok(Self::new(conn, BcryptHasher::new(config.bcrypt_cost)))
    }
}

impl<H: PasswordHasher> Catalog<H> {
    /// Wrap an already-prepared connection. The schema must exist; see
    /// [`db::ensure_schema`].
    pub fn new(conn: Connection, hasher: H) -> Self {
        Self { conn, hasher }
    }

    /// Borrow the underlying connection for queries the facade does not cover.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Live row counts per table.
    pub fn summary(&self) -> Result<CatalogSummary> {
        db::fetch_summary(&self.conn)
    }

    // Accounts

    /// Create an account. Does not sign it in.
    pub fn register(&self, username: &str, password: &str) -> Result<User> {
        auth::register(&self.conn, &self.hasher, username, password)
    }

    /// Authenticate and, only on success, put the user into `session`.
    pub fn sign_in(&self, session: &mut Session, username: &str, password: &str) -> Result<()> {
        let user = auth::authenticate(&self.conn, &self.hasher, username, password)?;
        info!("user {} signed in", user.username);
        session.sign_in(user);
        Ok(())
    }

    // Artists

    /// All artists with their names, alphabetical.
    pub fn artists(&self) -> Result<Listing<Artist>> {
        Ok(listing(db::fetch_artists(&self.conn)?, Artist::display_name))
    }

    pub fn add_artist(&self, name: &str) -> Result<Artist> {
        db::create_artist(&self.conn, name)
    }

    pub fn rename_artist(&self, id: i64, name: &str) -> Result<()> {
        db::update_artist(&self.conn, id, name)
    }

    /// Delete an artist and everything filed under it, then drop any
    /// selection that pointed at a removed track.
    pub fn delete_artist(&mut self, session: &mut Session, id: i64) -> Result<()> {
        db::delete_artist(&mut self.conn, id)?;
        self.prune_selection(session)
    }

    // Albums

    /// All albums, displayed as `Title (Year)`.
    pub fn albums(&self) -> Result<Listing<Album>> {
        Ok(listing(db::fetch_albums(&self.conn)?, Album::display_name))
    }

    /// One artist's albums in release order.
    pub fn albums_by_artist(&self, artist_id: i64) -> Result<Listing<Album>> {
        Ok(listing(
            db::fetch_albums_for_artist(&self.conn, artist_id)?,
            Album::display_name,
        ))
    }

    pub fn add_album(&self, title: &str, artist_id: i64, year: i32) -> Result<Album> {
        db::create_album(&self.conn, title, artist_id, year)
    }

    /// Change every editable album field at once.
    pub fn update_album(&self, id: i64, title: &str, artist_id: i64, year: i32) -> Result<()> {
        db::update_album(&self.conn, id, title, artist_id, year)
    }

    /// Delete an album with its tracks and their playlist entries.
    pub fn delete_album(&mut self, session: &mut Session, id: i64) -> Result<()> {
        db::delete_album(&mut self.conn, id)?;
        self.prune_selection(session)
    }

    // Tracks

    /// All tracks, displayed as `Title (m:ss)`.
    pub fn tracks(&self) -> Result<Listing<Track>> {
        Ok(listing(db::fetch_tracks(&self.conn)?, Track::display_name))
    }

    pub fn tracks_on_album(&self, album_id: i64) -> Result<Listing<Track>> {
        Ok(listing(
            db::fetch_tracks_for_album(&self.conn, album_id)?,
            Track::display_name,
        ))
    }

    /// Add a track; `duration` is in seconds.
    pub fn add_track(&self, title: &str, album_id: i64, duration: i64) -> Result<Track> {
        db::create_track(&self.conn, title, album_id, duration)
    }

    pub fn update_track(&self, id: i64, title: &str, album_id: i64, duration: i64) -> Result<()> {
        db::update_track(&self.conn, id, title, album_id, duration)
    }

    /// Delete a track, its playlist entries and, if it was selected, the
    /// track selection.
    pub fn delete_track(&mut self, session: &mut Session, id: i64) -> Result<()> {
        db::delete_track(&mut self.conn, id)?;
        self.prune_selection(session)
    }

    // Playlists

    /// The signed-in user's playlists.
    pub fn playlists(&self, session: &Session) -> Result<Listing<Playlist>> {
        let user = session.current_user()?;
        Ok(listing(
            db::fetch_playlists(&self.conn, user.id)?,
            Playlist::display_name,
        ))
    }

    /// New empty playlist owned by the signed-in user.
    pub fn create_playlist(&self, session: &Session, title: &str) -> Result<Playlist> {
        let user = session.current_user()?;
        db::create_playlist(&self.conn, title, user.id)
    }

    pub fn rename_playlist(&self, session: &Session, id: i64, title: &str) -> Result<()> {
        let title = required_text(title, "playlist title")?;
        self.owned_playlist(session, id)?;
        db::rename_playlist(&self.conn, id, title)
    }

    /// Delete one of the signed-in user's playlists. The tracks stay.
    pub fn delete_playlist(&mut self, session: &mut Session, id: i64) -> Result<()> {
        self.owned_playlist(session, id)?;
        db::delete_playlist(&mut self.conn, id)?;
        if session.selected_playlist().is_some_and(|p| p.id == id) {
            session.deselect_playlist();
        }
        Ok(())
    }

    /// Tracks in a playlist owned by the signed-in user.
    pub fn playlist_tracks(&self, session: &Session, playlist_id: i64) -> Result<Listing<Track>> {
        self.owned_playlist(session, playlist_id)?;
        Ok(listing(
            db::fetch_tracks_for_playlist(&self.conn, playlist_id)?,
            Track::display_name,
        ))
    }

    /// Tracks of the selected playlist; empty when nothing is selected.
    pub fn selected_playlist_tracks(&self, session: &Session) -> Result<Listing<Track>> {
        match session.selected_playlist() {
            Some(playlist) => self.playlist_tracks(session, playlist.id),
            None => Ok((Vec::new(), Vec::new())),
        }
    }

    /// Tracks that could still be added to the playlist.
    pub fn available_tracks(&self, session: &Session, playlist_id: i64) -> Result<Listing<Track>> {
        self.owned_playlist(session, playlist_id)?;
        Ok(listing(
            db::fetch_tracks_not_in_playlist(&self.conn, playlist_id)?,
            Track::display_name,
        ))
    }

    /// Link a track into one of the signed-in user's playlists.
    pub fn add_track_to_playlist(
        &self,
        session: &Session,
        playlist_id: i64,
        track_id: i64,
    ) -> Result<()> {
        required_id(track_id, "track")?;
        self.owned_playlist(session, playlist_id)?;
        db::add_track_to_playlist(&self.conn, playlist_id, track_id)
    }

    pub fn remove_track_from_playlist(
        &self,
        session: &Session,
        playlist_id: i64,
        track_id: i64,
    ) -> Result<()> {
        required_id(track_id, "track")?;
        self.owned_playlist(session, playlist_id)?;
        db::remove_track_from_playlist(&self.conn, playlist_id, track_id)
    }

    /// Add the selected track to the selected playlist.
    pub fn add_selected_track(&self, session: &Session) -> Result<()> {
        let (playlist, track) = session.selected_pair()?;
        self.add_track_to_playlist(session, playlist.id, track.id)
    }

    /// Remove the selected track from the selected playlist.
    pub fn remove_selected_track(&self, session: &Session) -> Result<()> {
        let (playlist, track) = session.selected_pair()?;
        self.remove_track_from_playlist(session, playlist.id, track.id)
    }

    /// Fetch a playlist and make sure the signed-in user owns it. Someone
    /// else's playlist is reported as missing. An unselected id is rejected
    /// before the lookup.
    fn owned_playlist(&self, session: &Session, id: i64) -> Result<Playlist> {
        let id = required_id(id, "playlist")?;
        let user = session.current_user()?;
        let playlist = db::fetch_playlist(&self.conn, id)?;
        if playlist.user_id == user.id {
            Ok(playlist)
        } else {
            Err(CatalogError::not_found("playlist", id))
        }
    }

    /// Drop selections whose rows disappeared in a cascade.
    fn prune_selection(&self, session: &mut Session) -> Result<()> {
        if let Some(track_id) = session.selected_track().map(|t| t.id) {
            if is_gone(db::fetch_track(&self.conn, track_id))? {
                session.deselect_track();
            }
        }
        if let Some(playlist_id) = session.selected_playlist().map(|p| p.id) {
            if is_gone(db::fetch_playlist(&self.conn, playlist_id))? {
                session.deselect_playlist();
            }
        }
        Ok(())
    }
}
