use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{constraint_kind, CatalogError, Constraint, Result};
use crate::models::User;

/// Persist a user with an already-computed password hash. A taken username
/// surfaces as `Duplicate` and leaves the existing row untouched.
pub fn insert_user(conn: &Connection, username: &str, password_hash: &str) -> Result<User> {
    conn.execute(
        "INSERT INTO users (username, password_hash) VALUES (?1, ?2)",
        params![username, password_hash],
    )
    .map_err(|err| match constraint_kind(&err) {
        Some(Constraint::Unique) => {
            CatalogError::Duplicate(format!("username {username} is already taken"))
        }
        _ => err.into(),
    })?;

    let user = User {
        id: conn.last_insert_rowid(),
        username: username.to_string(),
    };
    debug!("inserted user {} ({})", user.id, user.username);
    Ok(user)
}

/// Look up a user and their stored hash by username.
pub fn fetch_credentials(conn: &Connection, username: &str) -> Result<Option<(User, String)>> {
    let row = conn
        .query_row(
            "SELECT id, username, password_hash FROM users WHERE username = ?1",
            params![username],
            |row| {
                Ok((
                    User {
                        id: row.get(0)?,
                        username: row.get(1)?,
                    },
                    row.get(2)?,
                ))
            },
        )
        .optional()?;

    Ok(row)
}
