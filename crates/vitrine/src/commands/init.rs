//! Scaffold a component catalog in a project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing vitrine...");
    scaffold(config_path, Path::new("catalog"), yes)?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'vitrine build' to generate the catalog site.");

    Ok(())
}

fn scaffold(config_path: &Path, catalog_dir: &Path, yes: bool) -> Result<()> {
    if !config_path.exists() || yes {
        fs::write(config_path, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        tracing::info!("Created {}", config_path.display());
    }

    // Check if the catalog already exists
    if catalog_dir.exists() {
        if !yes {
            tracing::warn!(
                "{} already exists. Use --yes to overwrite.",
                catalog_dir.display()
            );
            return Ok(());
        }
    } else {
        fs::create_dir_all(catalog_dir).context("Failed to create catalog directory")?;
    }

    let button_path = catalog_dir.join("button.yaml");
    if !button_path.exists() || yes {
        fs::write(&button_path, DEFAULT_BUTTON).context("Failed to write button.yaml")?;
        tracing::info!("Created {}", button_path.display());
    }

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Vitrine Configuration

[catalog]
# Directory containing component files (.yaml, .yml, .toml)
dir = "catalog"

[build]
# Output directory for built site
output = "dist"

# Site title
title = "Components"

# Base URL (for deployment)
base_url = "/"

# Enable CSS minification
minify = true

[serializer]
# Spaces per nesting level in generated code
indent = 2

# Print `disabled` instead of `disabled={true}`
short_boolean_syntax = true

# Props to leave out of generated code
ignore_props = ["key"]
"#;

const DEFAULT_BUTTON: &str = r#"id: button
name: Button
category: ui
description: |
  A clickable button.

  Use `variant` to pick the visual weight.
props:
  - name: variant
    type: enum
    options: [primary, secondary, ghost]
    default: primary
    description: Visual weight
  - name: size
    type: enum
    options: [sm, md, lg]
    default: md
  - name: disabled
    type: boolean
    default: false
  - name: children
    type: node
    required: true
examples:
  - id: primary
    title: Primary
    source: <Button variant="primary">Click me</Button>
  - id: sizes
    title: Sizes
    description: Generated from a render tree.
    render:
      tag: div
      attributes:
        className: row
      children:
        - tag: Button
          attributes:
            size: sm
          children: [Small]
        - tag: Button
          attributes:
            size: lg
          children: [Large]
  - id: disabled
    title: Disabled
    render:
      tag: Button
      attributes:
        disabled: true
      children: [Disabled]
"#;
