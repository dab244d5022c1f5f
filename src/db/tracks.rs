use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{CatalogError, Result};
use crate::models::Track;

use super::guards::{duration_seconds, ensure_live, map_missing_parent, required_id, required_text};

pub(crate) fn track_from_row(row: &Row<'_>) -> rusqlite::Result<Track> {
    Ok(Track {
        id: row.get(0)?,
        title: row.get(1)?,
        album_id: row.get(2)?,
        duration: row.get(3)?,
    })
}

/// Every live track ordered by title.
pub fn fetch_tracks(conn: &Connection) -> Result<Vec<Track>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, album_id, duration FROM tracks
         WHERE is_deleted = 0
         ORDER BY title COLLATE NOCASE, id",
    )?;

    let tracks = stmt
        .query_map([], track_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(tracks)
}

/// Tracks on one album, by title.
pub fn fetch_tracks_for_album(conn: &Connection, album_id: i64) -> Result<Vec<Track>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, album_id, duration FROM tracks
         WHERE album_id = ?1 AND is_deleted = 0
         ORDER BY title COLLATE NOCASE, id",
    )?;

    let tracks = stmt
        .query_map([album_id], track_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(tracks)
}

pub fn fetch_track(conn: &Connection, id: i64) -> Result<Track> {
    conn.query_row(
        "SELECT id, title, album_id, duration FROM tracks WHERE id = ?1 AND is_deleted = 0",
        params![id],
        track_from_row,
    )
    .optional()?
    .ok_or_else(|| CatalogError::not_found("track", id))
}

/// Insert a track on an existing album. `duration` is in seconds; negative
/// values are rejected before touching the database.
pub fn create_track(conn: &Connection, title: &str, album_id: i64, duration: i64) -> Result<Track> {
    let title = required_text(title, "track title")?;
    let album_id = required_id(album_id, "album")?;
    let duration = duration_seconds(duration)?;
    ensure_live(conn, "albums", "album", album_id)?;

    conn.execute(
        "INSERT INTO tracks (title, album_id, duration) VALUES (?1, ?2, ?3)",
        params![title, album_id, duration],
    )
    .map_err(|err| map_missing_parent(err, "album", album_id))?;

    let track = Track {
        id: conn.last_insert_rowid(),
        title: title.to_string(),
        album_id,
        duration,
    };
    debug!("created track {} ({}) on album {}", track.id, track.title, album_id);
    Ok(track)
}

/// Overwrite title, album and duration with the same checks as
/// [`create_track`].
pub fn update_track(
    conn: &Connection,
    id: i64,
    title: &str,
    album_id: i64,
    duration: i64,
) -> Result<()> {
    let title = required_text(title, "track title")?;
    let album_id = required_id(album_id, "album")?;
    let duration = duration_seconds(duration)?;
    ensure_live(conn, "albums", "album", album_id)?;

    let updated = conn
        .execute(
            "UPDATE tracks SET title = ?1, album_id = ?2, duration = ?3
             WHERE id = ?4 AND is_deleted = 0",
            params![title, album_id, duration, id],
        )
        .map_err(|err| map_missing_parent(err, "album", album_id))?;

    if updated == 0 {
        Err(CatalogError::not_found("track", id))
    } else {
        debug!("updated track {id}");
        Ok(())
    }
}

/// Remove a track and every playlist entry that references it.
pub fn delete_track(conn: &mut Connection, id: i64) -> Result<()> {
    let tx = conn.transaction()?;

    let links = tx.execute("DELETE FROM playlist_tracks WHERE track_id = ?1", params![id])?;
    let deleted = tx.execute("DELETE FROM tracks WHERE id = ?1", params![id])?;

    if deleted == 0 {
        return Err(CatalogError::not_found("track", id));
    }

    tx.commit()?;
    info!("deleted track {id} and {links} playlist entries");
    Ok(())
}
