use rusqlite::Connection;

use crate::error::Result;
use crate::models::CatalogSummary;

/// Count live rows in each catalog table in one round trip.
pub fn fetch_summary(conn: &Connection) -> Result<CatalogSummary> {
    let summary = conn.query_row(
        "SELECT
             (SELECT COUNT(*) FROM artists WHERE is_deleted = 0),
             (SELECT COUNT(*) FROM albums WHERE is_deleted = 0),
             (SELECT COUNT(*) FROM tracks WHERE is_deleted = 0),
             (SELECT COUNT(*) FROM playlists WHERE is_deleted = 0)",
        [],
        |row| {
            Ok(CatalogSummary {
                artists: row.get(0)?,
                albums: row.get(1)?,
                tracks: row.get(2)?,
                playlists: row.get(3)?,
            })
        },
    )?;

    Ok(summary)
}
