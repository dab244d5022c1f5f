//! Domain models that mirror the SQLite schema. They stay plain data holders;
//! persistence lives in `db` and display concerns in `catalog`, apart from the
//! small `display_name` helpers every list view relies on.

use std::fmt;

use crate::catalog::format_duration;

/// Signed-in identity. The password hash never leaves the credential store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artist {
    pub id: i64,
    /// Trimmed, never empty.
    pub name: String,
}

impl Artist {
    pub fn display_name(&self) -> String {
        self.name.clone()
    }
}

/// An album belongs to exactly one artist. `year` is kept as a plain integer
/// so albums sort and display without date parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    pub id: i64,
    pub title: String,
    /// Release year, e.g. `1969`.
    pub year: i32,
    /// Owning artist; deleting it removes the album.
    pub artist_id: i64,
}

impl Album {
    /// `Title (Year)`, the form album pickers show.
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.title, self.year)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub id: i64,
    pub title: String,
    pub album_id: i64,
    /// Length in whole seconds.
    pub duration: u32,
}

impl Track {
    /// `Title (m:ss)`. Used both for the full track list and playlist contents.
    pub fn display_name(&self) -> String {
        format!("{} ({})", self.title, format_duration(self.duration))
    }
}

/// A user's named collection of tracks. Membership lives in the
/// `playlist_tracks` join table, not on the struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub id: i64,
    pub title: String,
    /// Owner. Only this user sees or edits the playlist.
    pub user_id: i64,
}

impl Playlist {
    pub fn display_name(&self) -> String {
        self.title.clone()
    }
}

impl fmt::Display for Artist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Album {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl fmt::Display for Playlist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Live row counts, logged at start-up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogSummary {
    pub artists: i64,
    pub albums: i64,
    pub tracks: i64,
    pub playlists: i64,
}

impl fmt::Display for CatalogSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} artists, {} albums, {} tracks, {} playlists",
            self.artists, self.albums, self.tracks, self.playlists
        )
    }
}
