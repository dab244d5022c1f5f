//! Credential store: registration and login over the `users` table.
//!
//! Hashing sits behind [`PasswordHasher`] so the bcrypt cost can be tuned from
//! configuration and dropped to the minimum in tests.

use log::{info, warn};
use rusqlite::Connection;

use crate::db::{fetch_credentials, insert_user};
use crate::error::{CatalogError, Result};
use crate::models::User;

/// Salted one-way password hashing.
pub trait PasswordHasher {
    fn hash(&self, password: &str) -> Result<String>;
    fn verify(&self, password: &str, hash: &str) -> Result<bool>;
}

#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, password: &str) -> Result<String> {
        bcrypt::hash(password, self.cost).map_err(CatalogError::from)
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        bcrypt::verify(password, hash).map_err(CatalogError::from)
    }
}

/// Create an account. Blank credentials (empty or whitespace only) are rejected
/// before hashing; a taken username fails with `Duplicate` without altering
/// the existing account. The password itself is hashed exactly as given.
pub fn register(
    conn: &Connection,
    hasher: &impl PasswordHasher,
    username: &str,
    password: &str,
) -> Result<User> {
    let username = username.trim();
    if username.is_empty() || password.trim().is_empty() {
        return Err(CatalogError::validation(
            "username and password must not be empty",
        ));
    }

    let hash = hasher.hash(password)?;
    let user = insert_user(conn, username, &hash)?;
    info!("registered user {}", user.username);
    Ok(user)
}

/// Check a username/password pair and return the matching identity.
pub fn authenticate(
    conn: &Connection,
    hasher: &impl PasswordHasher,
    username: &str,
    password: &str,
) -> Result<User> {
    let username = username.trim();
    let Some((user, hash)) = fetch_credentials(conn, username)? else {
        warn!("sign-in for unknown user {username}");
        return Err(CatalogError::not_found("user", username));
    };

    if !hasher.verify(password, &hash)? {
        warn!("wrong password for user {username}");
        return Err(CatalogError::WrongPassword);
    }

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;

    fn hasher() -> BcryptHasher {
        BcryptHasher::new(4)
    }

    #[test]
    fn register_then_authenticate() {
        let conn = open_in_memory().unwrap();
        let registered = register(&conn, &hasher(), "alice", "s3cret").unwrap();
        let signed_in = authenticate(&conn, &hasher(), "alice", "s3cret").unwrap();
        assert_eq!(registered, signed_in);
    }

    #[test]
    fn stored_hash_is_not_the_password() {
        let conn = open_in_memory().unwrap();
        register(&conn, &hasher(), "alice", "s3cret").unwrap();
        let (_, hash) = fetch_credentials(&conn, "alice").unwrap().unwrap();
        assert_ne!(hash, "s3cret");
        assert!(!hash.is_empty());
    }

    #[test]
    fn empty_credentials_are_rejected() {
        let conn = open_in_memory().unwrap();
        assert!(matches!(
            register(&conn, &hasher(), "", "pw"),
            Err(CatalogError::Validation(_))
        ));
        assert!(matches!(
            register(&conn, &hasher(), "bob", ""),
            Err(CatalogError::Validation(_))
        ));
    }

    #[test]
    fn whitespace_password_is_rejected() {
        let conn = open_in_memory().unwrap();
        assert!(matches!(
            register(&conn, &hasher(), "bob", "   "),
            Err(CatalogError::Validation(_))
        ));
        assert!(fetch_credentials(&conn, "bob").unwrap().is_none());
    }

    #[test]
    fn surrounding_spaces_in_password_are_significant() {
        let conn = open_in_memory().unwrap();
        register(&conn, &hasher(), "carol", " padded ").unwrap();
        assert!(authenticate(&conn, &hasher(), "carol", " padded ").is_ok());
        assert!(matches!(
            authenticate(&conn, &hasher(), "carol", "padded"),
            Err(CatalogError::WrongPassword)
        ));
    }

    #[test]
    fn unknown_user_is_not_found() {
        let conn = open_in_memory().unwrap();
        let err = authenticate(&conn, &hasher(), "ghost", "pw").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn wrong_password_is_rejected() {
        let conn = open_in_memory().unwrap();
        register(&conn, &hasher(), "alice", "s3cret").unwrap();
        let err = authenticate(&conn, &hasher(), "alice", "guess").unwrap_err();
        assert!(matches!(err, CatalogError::WrongPassword));
    }
}
