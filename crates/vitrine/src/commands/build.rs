//! Static catalog build command.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use vitrine_catalog::{Composer, Resolver};
use vitrine_static::{BuildConfig, StaticBuilder};

use crate::config::load_config;

/// Run the build command.
pub async fn run(config_path: &Path, output: Option<PathBuf>, minify: Option<bool>) -> Result<()> {
    tracing::info!("Building component catalog...");

    let file_config = load_config(config_path)?;
    let registry = super::load_registry(&file_config)?;

    let config = BuildConfig {
        output_dir: output.unwrap_or_else(|| PathBuf::from(&file_config.build.output)),
        minify: minify.unwrap_or(file_config.build.minify),
        base_url: file_config.build.base_url.clone(),
        title: file_config.build.title.clone(),
    };
    let composer = Composer::new(Resolver::new(file_config.serializer.to_options()));

    let result = StaticBuilder::new(config, Arc::new(registry), composer)
        .build()
        .await?;

    tracing::info!(
        "Built {} pages with {} examples in {}ms",
        result.pages,
        result.examples,
        result.duration_ms
    );
    if result.failed_examples > 0 {
        tracing::warn!(
            "{} examples failed; see the failure notices on their pages",
            result.failed_examples
        );
    }

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
