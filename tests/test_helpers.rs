//! Shared fixtures for the integration tests.
//!
//! Each test gets a real SQLite file inside a temporary directory so the
//! schema, foreign keys and transactions behave as they do in production.
#![allow(dead_code)]

use log::LevelFilter;
use music_catalog::{Album, Artist, Catalog, Config, Session, Track};
use rusqlite::Connection;
use tempfile::TempDir;

/// Catalog plus session, cleaned up on drop.
pub struct TestCatalog {
    pub catalog: Catalog,
    pub session: Session,
    _temp_dir: TempDir,
}

impl TestCatalog {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = Config {
            db_path: temp_dir.path().join("data").join("catalog.sqlite"),
            bcrypt_cost: 4,
            log_level: LevelFilter::Off,
        };
        let catalog = Catalog::open(&config).expect("Failed to open catalog");

        Self {
            catalog,
            session: Session::new(),
            _temp_dir: temp_dir,
        }
    }

    /// Fresh catalog with `username` registered and signed in.
    pub fn signed_in(username: &str) -> Self {
        let mut test = Self::new();
        test.catalog
            .register(username, "password")
            .expect("Failed to register user");
        test.catalog
            .sign_in(&mut test.session, username, "password")
            .expect("Failed to sign in");
        test
    }

    pub fn conn(&self) -> &Connection {
        self.catalog.connection()
    }

    /// Flag a row the way an external tool would, leaving it physically in
    /// place.
    pub fn soft_delete(&self, table: &str, id: i64) {
        let updated = self
            .conn()
            .execute(&format!("UPDATE {table} SET is_deleted = 1 WHERE id = ?1"), [id])
            .expect("Failed to soft-delete row");
        assert_eq!(updated, 1, "no row {id} in {table}");
    }

    /// Number of rows in `table`, soft-deleted ones included.
    pub fn count(&self, table: &str) -> i64 {
        self.conn()
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })
            .expect("Failed to count rows")
    }
}

/// Two artists, each with one album of two tracks.
pub struct Seed {
    pub beatles: Artist,
    pub lennon: Artist,
    pub abbey_road: Album,
    pub imagine_album: Album,
    pub come_together: Track,
    pub something: Track,
    pub imagine: Track,
    pub jealous_guy: Track,
}

pub fn seed(catalog: &Catalog) -> Seed {
    let beatles = catalog.add_artist("The Beatles").expect("artist");
    let lennon = catalog.add_artist("John Lennon").expect("artist");
    let abbey_road = catalog.add_album("Abbey Road", beatles.id, 1969).expect("album");
    let imagine_album = catalog.add_album("Imagine", lennon.id, 1971).expect("album");

    Seed {
        come_together: catalog
            .add_track("Come Together", abbey_road.id, 259)
            .expect("track"),
        something: catalog.add_track("Something", abbey_road.id, 182).expect("track"),
        imagine: catalog.add_track("Imagine", imagine_album.id, 183).expect("track"),
        jealous_guy: catalog
            .add_track("Jealous Guy", imagine_album.id, 254)
            .expect("track"),
        beatles,
        lennon,
        abbey_road,
        imagine_album,
    }
}
