//! Error taxonomy shared by the repository, credential store and catalog
//! facade. Callers get one enum so a presentation layer can turn any failure
//! into a message without caring which layer produced it.

use rusqlite::ffi;
use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// A required field was empty or out of range. Raised before any I/O.
    #[error("{0}")]
    Validation(String),

    /// The referenced entity (or credential) does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A uniqueness rule was violated (username, playlist membership).
    #[error("{0}")]
    Duplicate(String),

    /// The password did not match the stored hash.
    #[error("wrong password")]
    WrongPassword,

    /// An operation needed a signed-in user but the session is empty.
    #[error("no user is signed in")]
    NotSignedIn,

    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    /// Underlying SQLite failure.
    #[error("database error: {0}")]
    Persistence(#[from] rusqlite::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Which SQLite constraint an error tripped, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Constraint {
    Unique,
    ForeignKey,
}

/// Classify a SQLite error by its extended result code so callers can turn
/// constraint failures into domain errors.
pub(crate) fn constraint_kind(err: &rusqlite::Error) -> Option<Constraint> {
    match err {
        rusqlite::Error::SqliteFailure(failure, _) => match failure.extended_code {
            ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                Some(Constraint::Unique)
            }
            ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Some(Constraint::ForeignKey),
            _ => None,
        },
        _ => None,
    }
}
