use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{constraint_kind, CatalogError, Constraint, Result};
use crate::models::{Playlist, Track};

use super::guards::{ensure_live, map_missing_parent, required_id, required_text};
use super::tracks::track_from_row;

fn playlist_from_row(row: &Row<'_>) -> rusqlite::Result<Playlist> {
    Ok(Playlist {
        id: row.get(0)?,
        title: row.get(1)?,
        user_id: row.get(2)?,
    })
}

/// Playlists owned by `user_id`, ordered by title.
pub fn fetch_playlists(conn: &Connection, user_id: i64) -> Result<Vec<Playlist>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, user_id FROM playlists
         WHERE user_id = ?1 AND is_deleted = 0
         ORDER BY title COLLATE NOCASE, id",
    )?;

    let playlists = stmt
        .query_map([user_id], playlist_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(playlists)
}

/// Look up one live playlist regardless of owner; ownership is checked by
/// the catalog facade.
pub fn fetch_playlist(conn: &Connection, id: i64) -> Result<Playlist> {
    conn.query_row(
        "SELECT id, title, user_id FROM playlists WHERE id = ?1 AND is_deleted = 0",
        params![id],
        playlist_from_row,
    )
    .optional()?
    .ok_or_else(|| CatalogError::not_found("playlist", id))
}

/// Insert an empty playlist for `user_id`. An unknown user surfaces as
/// `NotFound` through the foreign key.
pub fn create_playlist(conn: &Connection, title: &str, user_id: i64) -> Result<Playlist> {
    let title = required_text(title, "playlist title")?;
    let user_id = required_id(user_id, "user")?;

    conn.execute(
        "INSERT INTO playlists (title, user_id) VALUES (?1, ?2)",
        params![title, user_id],
    )
    .map_err(|err| map_missing_parent(err, "user", user_id))?;

    let playlist = Playlist {
        id: conn.last_insert_rowid(),
        title: title.to_string(),
        user_id,
    };
    debug!("created playlist {} ({}) for user {}", playlist.id, playlist.title, user_id);
    Ok(playlist)
}

/// Change a playlist's title.
pub fn rename_playlist(conn: &Connection, id: i64, title: &str) -> Result<()> {
    let title = required_text(title, "playlist title")?;

    let updated = conn.execute(
        "UPDATE playlists SET title = ?1 WHERE id = ?2 AND is_deleted = 0",
        params![title, id],
    )?;

    if updated == 0 {
        Err(CatalogError::not_found("playlist", id))
    } else {
        debug!("renamed playlist {id} to {title}");
        Ok(())
    }
}

/// Drop a playlist and its membership rows together.
pub fn delete_playlist(conn: &mut Connection, id: i64) -> Result<()> {
    let tx = conn.transaction()?;

    let links = tx.execute("DELETE FROM playlist_tracks WHERE playlist_id = ?1", params![id])?;
    let deleted = tx.execute("DELETE FROM playlists WHERE id = ?1", params![id])?;

    if deleted == 0 {
        return Err(CatalogError::not_found("playlist", id));
    }

    tx.commit()?;
    info!("deleted playlist {id} and {links} entries");
    Ok(())
}

/// Tracks in a playlist, ordered by title (playlists carry no manual order).
pub fn fetch_tracks_for_playlist(conn: &Connection, playlist_id: i64) -> Result<Vec<Track>> {
    let mut stmt = conn.prepare(
        "SELECT t.id, t.title, t.album_id, t.duration
         FROM tracks t
         INNER JOIN playlist_tracks pt ON pt.track_id = t.id
         WHERE pt.playlist_id = ?1 AND t.is_deleted = 0
         ORDER BY t.title COLLATE NOCASE, t.id",
    )?;

    let tracks = stmt
        .query_map([playlist_id], track_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(tracks)
}

/// Live tracks that are not yet in the playlist, for the "add track" picker.
pub fn fetch_tracks_not_in_playlist(conn: &Connection, playlist_id: i64) -> Result<Vec<Track>> {
    let mut stmt = conn.prepare(
        "SELECT t.id, t.title, t.album_id, t.duration
         FROM tracks t
         WHERE t.is_deleted = 0
           AND NOT EXISTS (
               SELECT 1 FROM playlist_tracks pt
               WHERE pt.track_id = t.id AND pt.playlist_id = ?1
           )
         ORDER BY t.title COLLATE NOCASE, t.id",
    )?;

    let tracks = stmt
        .query_map([playlist_id], track_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(tracks)
}

/// Link a track to a playlist. A pair that is already linked is reported as
/// `Duplicate` rather than ignored, so add followed by remove always restores
/// the previous contents.
pub fn add_track_to_playlist(conn: &Connection, playlist_id: i64, track_id: i64) -> Result<()> {
    let playlist_id = required_id(playlist_id, "playlist")?;
    let track_id = required_id(track_id, "track")?;
    ensure_live(conn, "playlists", "playlist", playlist_id)?;
    ensure_live(conn, "tracks", "track", track_id)?;

    conn.execute(
        "INSERT INTO playlist_tracks (playlist_id, track_id) VALUES (?1, ?2)",
        params![playlist_id, track_id],
    )
    .map_err(|err| match constraint_kind(&err) {
        Some(Constraint::Unique) => {
            CatalogError::Duplicate("track is already in this playlist".to_string())
        }
        _ => err.into(),
    })?;

    debug!("added track {track_id} to playlist {playlist_id}");
    Ok(())
}

/// Unlink a track from a playlist; `NotFound` if the pair was never linked.
pub fn remove_track_from_playlist(
    conn: &Connection,
    playlist_id: i64,
    track_id: i64,
) -> Result<()> {
    let playlist_id = required_id(playlist_id, "playlist")?;
    let track_id = required_id(track_id, "track")?;

    let deleted = conn.execute(
        "DELETE FROM playlist_tracks WHERE playlist_id = ?1 AND track_id = ?2",
        params![playlist_id, track_id],
    )?;

    if deleted == 0 {
        Err(CatalogError::not_found(
            "playlist entry",
            format!("{playlist_id}/{track_id}"),
        ))
    } else {
        debug!("removed track {track_id} from playlist {playlist_id}");
        Ok(())
    }
}
