use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{CatalogError, Result};
use crate::models::Album;

use super::guards::{ensure_live, map_missing_parent, required_id, required_text};

fn album_from_row(row: &Row<'_>) -> rusqlite::Result<Album> {
    Ok(Album {
        id: row.get(0)?,
        title: row.get(1)?,
        year: row.get(2)?,
        artist_id: row.get(3)?,
    })
}

/// All live albums ordered by title.
pub fn fetch_albums(conn: &Connection) -> Result<Vec<Album>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, year, artist_id FROM albums
         WHERE is_deleted = 0
         ORDER BY title COLLATE NOCASE, id",
    )?;

    let albums = stmt
        .query_map([], album_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(albums)
}

/// Albums credited to one artist, oldest first.
pub fn fetch_albums_for_artist(conn: &Connection, artist_id: i64) -> Result<Vec<Album>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, year, artist_id FROM albums
         WHERE artist_id = ?1 AND is_deleted = 0
         ORDER BY year, title COLLATE NOCASE, id",
    )?;

    let albums = stmt
        .query_map([artist_id], album_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(albums)
}

/// One live album by id.
pub fn fetch_album(conn: &Connection, id: i64) -> Result<Album> {
    conn.query_row(
        "SELECT id, title, year, artist_id FROM albums WHERE id = ?1 AND is_deleted = 0",
        params![id],
        album_from_row,
    )
    .optional()?
    .ok_or_else(|| CatalogError::not_found("album", id))
}

/// Insert an album under an existing artist.
pub fn create_album(conn: &Connection, title: &str, artist_id: i64, year: i32) -> Result<Album> {
    let title = required_text(title, "album title")?;
    let artist_id = required_id(artist_id, "artist")?;
    ensure_live(conn, "artists", "artist", artist_id)?;

    conn.execute(
        "INSERT INTO albums (title, artist_id, year) VALUES (?1, ?2, ?3)",
        params![title, artist_id, year],
    )
    .map_err(|err| map_missing_parent(err, "artist", artist_id))?;

    let album = Album {
        id: conn.last_insert_rowid(),
        title: title.to_string(),
        year,
        artist_id,
    };
    debug!("created album {} ({}) for artist {}", album.id, album.title, artist_id);
    Ok(album)
}

/// Overwrite title, year and artist. Moving an album to a soft-deleted or
/// unknown artist fails with `NotFound` and leaves the row as it was.
pub fn update_album(
    conn: &Connection,
    id: i64,
    title: &str,
    artist_id: i64,
    year: i32,
) -> Result<()> {
    let title = required_text(title, "album title")?;
    let artist_id = required_id(artist_id, "artist")?;
    ensure_live(conn, "artists", "artist", artist_id)?;

    let updated = conn
        .execute(
            "UPDATE albums SET title = ?1, artist_id = ?2, year = ?3
             WHERE id = ?4 AND is_deleted = 0",
            params![title, artist_id, year, id],
        )
        .map_err(|err| map_missing_parent(err, "artist", artist_id))?;

    if updated == 0 {
        Err(CatalogError::not_found("album", id))
    } else {
        debug!("updated album {id}");
        Ok(())
    }
}

/// Remove an album, its tracks and the playlist entries for those tracks in a
/// single transaction.
pub fn delete_album(conn: &mut Connection, id: i64) -> Result<()> {
    let tx = conn.transaction()?;

    let links = tx.execute(
        "DELETE FROM playlist_tracks
         WHERE track_id IN (SELECT id FROM tracks WHERE album_id = ?1)",
        params![id],
    )?;
    let tracks = tx.execute("DELETE FROM tracks WHERE album_id = ?1", params![id])?;
    let deleted = tx.execute("DELETE FROM albums WHERE id = ?1", params![id])?;

    if deleted == 0 {
        return Err(CatalogError::not_found("album", id));
    }

    tx.commit()?;
    info!("deleted album {id} with {tracks} tracks, {links} playlist entries");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_artist, open_in_memory};

    #[test]
    fn create_album_requires_selected_artist() {
        let conn = open_in_memory().unwrap();
        let err = create_album(&conn, "Nevermind", 0, 1991).unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
    }

    #[test]
    fn create_album_rejects_unknown_artist() {
        let conn = open_in_memory().unwrap();
        let err = create_album(&conn, "Nevermind", 12, 1991).unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { entity: "artist", .. }));
        assert!(fetch_albums(&conn).unwrap().is_empty());
    }

    #[test]
    fn albums_for_artist_are_scoped() {
        let conn = open_in_memory().unwrap();
        let nirvana = create_artist(&conn, "Nirvana").unwrap();
        let pixies = create_artist(&conn, "Pixies").unwrap();
        let in_utero = create_album(&conn, "In Utero", nirvana.id, 1993).unwrap();
        let bleach = create_album(&conn, "Bleach", nirvana.id, 1989).unwrap();
        create_album(&conn, "Doolittle", pixies.id, 1989).unwrap();

        let albums = fetch_albums_for_artist(&conn, nirvana.id).unwrap();
        assert_eq!(albums, vec![bleach, in_utero]);
    }

    #[test]
    fn update_album_moves_it_between_artists() {
        let conn = open_in_memory().unwrap();
        let first = create_artist(&conn, "First").unwrap();
        let second = create_artist(&conn, "Second").unwrap();
        let album = create_album(&conn, "Draft", first.id, 2000).unwrap();

        update_album(&conn, album.id, "Final", second.id, 2001).unwrap();

        let stored = fetch_album(&conn, album.id).unwrap();
        assert_eq!(stored.title, "Final");
        assert_eq!(stored.artist_id, second.id);
        assert_eq!(stored.year, 2001);
    }
}
