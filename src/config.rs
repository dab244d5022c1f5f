//! Runtime configuration read from the environment.

use std::env;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use directories::BaseDirs;
use log::LevelFilter;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".music-catalog";
/// SQLite file name stored inside the application data directory.
const DB_FILE_NAME: &str = "catalog.sqlite";

pub const DB_PATH_VAR: &str = "MUSIC_CATALOG_DB";
pub const BCRYPT_COST_VAR: &str = "MUSIC_CATALOG_BCRYPT_COST";
pub const LOG_LEVEL_VAR: &str = "MUSIC_CATALOG_LOG";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_path: PathBuf,
    pub bcrypt_cost: u32,
    pub log_level: LevelFilter,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable source. Unset or blank
    /// variables fall back to defaults; malformed ones are errors.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let db_path = match var(DB_PATH_VAR) {
            Some(path) => PathBuf::from(path),
            None => default_db_path()?,
        };

        let bcrypt_cost = match var(BCRYPT_COST_VAR) {
            Some(raw) => parse_cost(&raw)?,
            None => bcrypt::DEFAULT_COST,
        };

        let log_level = match var(LOG_LEVEL_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<LevelFilter>()
                .with_context(|| format!("invalid {LOG_LEVEL_VAR} value {raw:?}"))?,
            None => LevelFilter::Info,
        };

        Ok(Self {
            db_path,
            bcrypt_cost,
            log_level,
        })
    }
}

fn parse_cost(raw: &str) -> Result<u32> {
    let cost: u32 = raw
        .trim()
        .parse()
        .with_context(|| format!("invalid {BCRYPT_COST_VAR} value {raw:?}"))?;
    if !(4..=31).contains(&cost) {
        bail!("{BCRYPT_COST_VAR} must be between 4 and 31, got {cost}");
    }
    Ok(cost)
}

/// Resolve the default database location inside the user's home.
fn default_db_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(DB_FILE_NAME))
}
