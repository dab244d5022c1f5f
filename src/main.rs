//! Bootstrap binary: read configuration from the environment, open (or
//! create) the catalog database and report what it holds. Front ends embed
//! the library directly.
use anyhow::{Context, Result};
use log::info;
use music_catalog::{Catalog, Config};

fn main() -> Result<()> {
    let config = Config::from_env().context("failed to load configuration")?;

    let mut clog = colog::default_builder();
    clog.filter(None, config.log_level);
    clog.init();

    let catalog = Catalog::open(&config)
        .with_context(|| format!("failed to open catalog at {}", config.db_path.display()))?;
    let summary = catalog.summary().context("failed to read catalog summary")?;

    info!("catalog {}: {summary}", config.db_path.display());
    Ok(())
}
