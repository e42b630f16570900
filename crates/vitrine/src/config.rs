//! vitrine.toml configuration.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use vitrine_jsx::{Indent, SerializeOptions};

/// Configuration file structure (vitrine.toml).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub build: BuildSettings,
    #[serde(default)]
    pub serializer: SerializerSettings,
}

#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_catalog_dir")]
    pub dir: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            dir: default_catalog_dir(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BuildSettings {
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_true")]
    pub minify: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            output: default_output(),
            title: default_title(),
            base_url: default_base_url(),
            minify: true,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SerializerSettings {
    /// Spaces per nesting level
    #[serde(default = "default_indent")]
    pub indent: u8,
    /// Indent with tabs instead of spaces
    #[serde(default)]
    pub tabs: bool,
    #[serde(default = "default_true")]
    pub short_boolean_syntax: bool,
    #[serde(default)]
    pub ignore_props: Vec<String>,
}

impl Default for SerializerSettings {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            tabs: false,
            short_boolean_syntax: true,
            ignore_props: Vec::new(),
        }
    }
}

impl SerializerSettings {
    pub fn to_options(&self) -> SerializeOptions {
        SerializeOptions {
            indent: if self.tabs {
                Indent::Tab
            } else {
                Indent::Spaces(self.indent)
            },
            short_boolean_syntax: self.short_boolean_syntax,
            ignore_props: self.ignore_props.clone(),
        }
    }
}

impl ConfigFile {
    pub fn catalog_dir(&self) -> PathBuf {
        PathBuf::from(&self.catalog.dir)
    }
}

fn default_catalog_dir() -> String {
    "catalog".to_string()
}
fn default_output() -> String {
    "dist".to_string()
}
fn default_title() -> String {
    "Components".to_string()
}
fn default_base_url() -> String {
    "/".to_string()
}
fn default_indent() -> u8 {
    2
}
fn default_true() -> bool {
    true
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}
