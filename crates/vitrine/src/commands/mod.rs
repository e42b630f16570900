//! CLI command implementations.

pub mod build;
pub mod init;
pub mod list;
pub mod show;

use anyhow::{Context, Result};
use vitrine_catalog::{load_catalog, Registry};

use crate::config::ConfigFile;

/// Load the catalog directory named by the config into a fresh registry.
pub fn load_registry(config: &ConfigFile) -> Result<Registry> {
    let dir = config.catalog_dir();
    let specs = load_catalog(&dir).context("Failed to load catalog")?;

    let mut registry = Registry::new();
    registry
        .register_all(specs)
        .context("Failed to populate registry")?;

    Ok(registry)
}
