use std::fs;
use std::path::Path;

use log::debug;
use rusqlite::Connection;

use crate::error::Result;

/// Tables, in creation order. Foreign keys are declared without `ON DELETE
/// CASCADE`: the repository removes dependents itself inside a transaction, so
/// a stray delete that skips the cascade fails loudly instead of silently
/// taking rows with it.
const SCHEMA: &[(&str, &str)] = &[
    (
        "users",
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL CHECK (password_hash <> '')
        )",
    ),
    (
        "artists",
        "CREATE TABLE IF NOT EXISTS artists (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            is_deleted INTEGER NOT NULL DEFAULT 0
        )",
    ),
    (
        "albums",
        "CREATE TABLE IF NOT EXISTS albums (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            artist_id INTEGER NOT NULL,
            year INTEGER NOT NULL,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            FOREIGN KEY(artist_id) REFERENCES artists(id)
        )",
    ),
    (
        "tracks",
        "CREATE TABLE IF NOT EXISTS tracks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            album_id INTEGER NOT NULL,
            duration INTEGER NOT NULL CHECK (duration >= 0),
            is_deleted INTEGER NOT NULL DEFAULT 0,
            FOREIGN KEY(album_id) REFERENCES albums(id)
        )",
    ),
    (
        "playlists",
        "CREATE TABLE IF NOT EXISTS playlists (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            user_id INTEGER NOT NULL,
            is_deleted INTEGER NOT NULL DEFAULT 0,
            FOREIGN KEY(user_id) REFERENCES users(id)
        )",
    ),
    (
        "playlist_tracks",
        "CREATE TABLE IF NOT EXISTS playlist_tracks (
            playlist_id INTEGER NOT NULL,
            track_id INTEGER NOT NULL,
            PRIMARY KEY (playlist_id, track_id),
            FOREIGN KEY(playlist_id) REFERENCES playlists(id),
            FOREIGN KEY(track_id) REFERENCES tracks(id)
        )",
    ),
];

/// Open (creating if needed) the catalog database at `path` and make sure the
/// schema exists. The parent directory is created on first use.
pub fn open_catalog(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let conn = Connection::open(path)?;
    ensure_schema(&conn)?;
    debug!("opened catalog database at {}", path.display());
    Ok(conn)
}

/// Fresh in-memory catalog. Handy for tests and throwaway sessions.
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    ensure_schema(&conn)?;
    Ok(conn)
}

/// Turn on foreign key enforcement and create any missing tables. Safe to run
/// against an existing database.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON")?;

    for (table, ddl) in SCHEMA {
        conn.execute(ddl, [])?;
        debug!("ensured table {table}");
    }

    Ok(())
}
