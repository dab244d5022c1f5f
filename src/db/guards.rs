//! Input checks shared by the create/update helpers. Everything here runs
//! before the statement it protects, so a rejected call never touches the
//! database beyond the existence lookups.

use rusqlite::{params, Connection};

use crate::error::{constraint_kind, CatalogError, Constraint, Result};

/// Trim `value` and reject it when nothing is left.
pub(crate) fn required_text<'a>(value: &'a str, field: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(CatalogError::validation(format!("{field} must not be empty")))
    } else {
        Ok(trimmed)
    }
}

/// Foreign keys coming from the UI are zero when nothing was picked.
pub(crate) fn required_id(id: i64, field: &str) -> Result<i64> {
    if id <= 0 {
        Err(CatalogError::validation(format!("{field} must be selected")))
    } else {
        Ok(id)
    }
}

pub(crate) fn duration_seconds(duration: i64) -> Result<u32> {
    if duration < 0 {
        return Err(CatalogError::validation("duration must not be negative"));
    }
    u32::try_from(duration).map_err(|_| CatalogError::validation("duration is too long"))
}

/// Fail with `NotFound` unless `table` holds a live (not soft-deleted) row
/// with this id. `table` is always one of our own constants.
pub(crate) fn ensure_live(
    conn: &Connection,
    table: &'static str,
    entity: &'static str,
    id: i64,
) -> Result<()> {
    let sql = format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?1 AND is_deleted = 0)");
    let found: bool = conn.query_row(&sql, params![id], |row| row.get(0))?;
    if found {
        Ok(())
    } else {
        Err(CatalogError::not_found(entity, id))
    }
}

/// Map a foreign-key violation raised by an insert to `NotFound` for the
/// referenced entity; anything else passes through as a persistence error.
pub(crate) fn map_missing_parent(
    err: rusqlite::Error,
    entity: &'static str,
    id: i64,
) -> CatalogError {
    match constraint_kind(&err) {
        Some(Constraint::ForeignKey) => CatalogError::not_found(entity, id),
        _ => err.into(),
    }
}
