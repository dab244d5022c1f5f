use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{CatalogError, Result};
use crate::models::Artist;

use super::guards::required_text;

fn artist_from_row(row: &Row<'_>) -> rusqlite::Result<Artist> {
    Ok(Artist {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

/// Every live artist, ordered by name so the list reads alphabetically
/// regardless of capitalisation.
pub fn fetch_artists(conn: &Connection) -> Result<Vec<Artist>> {
    let mut stmt = conn.prepare(
        "SELECT id, name FROM artists
         WHERE is_deleted = 0
         ORDER BY name COLLATE NOCASE, id",
    )?;

    let artists = stmt
        .query_map([], artist_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(artists)
}

/// One live artist by id.
pub fn fetch_artist(conn: &Connection, id: i64) -> Result<Artist> {
    conn.query_row(
        "SELECT id, name FROM artists WHERE id = ?1 AND is_deleted = 0",
        params![id],
        artist_from_row,
    )
    .optional()?
    .ok_or_else(|| CatalogError::not_found("artist", id))
}

/// Insert a new artist and hand back the hydrated row.
pub fn create_artist(conn: &Connection, name: &str) -> Result<Artist> {
    let name = required_text(name, "artist name")?;

    conn.execute("INSERT INTO artists (name) VALUES (?1)", params![name])?;

    let artist = Artist {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
    };
    debug!("created artist {} ({})", artist.id, artist.name);
    Ok(artist)
}

/// Rename an artist. Albums keep pointing at the same id, so nothing else
/// needs touching.
pub fn update_artist(conn: &Connection, id: i64, name: &str) -> Result<()> {
    let name = required_text(name, "artist name")?;

    let updated = conn.execute(
        "UPDATE artists SET name = ?1 WHERE id = ?2 AND is_deleted = 0",
        params![name, id],
    )?;

    if updated == 0 {
        Err(CatalogError::not_found("artist", id))
    } else {
        debug!("renamed artist {id} to {name}");
        Ok(())
    }
}

/// Remove an artist together with its albums, their tracks and any playlist
/// entries pointing at those tracks. All four statements share one
/// transaction; an early return drops it and rolls everything back.
pub fn delete_artist(conn: &mut Connection, id: i64) -> Result<()> {
    let tx = conn.transaction()?;

    let links = tx.execute(
        "DELETE FROM playlist_tracks WHERE track_id IN (
             SELECT t.id FROM tracks t
             JOIN albums a ON t.album_id = a.id
             WHERE a.artist_id = ?1
         )",
        params![id],
    )?;
    let tracks = tx.execute(
        "DELETE FROM tracks WHERE album_id IN (SELECT id FROM albums WHERE artist_id = ?1)",
        params![id],
    )?;
    let albums = tx.execute("DELETE FROM albums WHERE artist_id = ?1", params![id])?;
    let deleted = tx.execute("DELETE FROM artists WHERE id = ?1", params![id])?;

    if deleted == 0 {
        return Err(CatalogError::not_found("artist", id));
    }

    tx.commit()?;
    info!(
        "deleted artist {id} with {albums} albums, {tracks} tracks, {links} playlist entries"
    );
    Ok(())
}
