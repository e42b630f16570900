//! List registered components.

use std::path::Path;

use anyhow::{Context, Result};
use vitrine_catalog::{Category, ComponentSpec, Registry};

use crate::config::load_config;

/// Run the list command.
pub async fn run(config_path: &Path, category: Option<String>) -> Result<()> {
    let config = load_config(config_path)?;
    let registry = super::load_registry(&config)?;

    let category = category
        .map(|c| c.parse::<Category>())
        .transpose()
        .context("Invalid --category")?;

    for line in listing(&registry, category) {
        println!("{}", line);
    }

    Ok(())
}

fn listing(registry: &Registry, category: Option<Category>) -> Vec<String> {
    let specs = match category {
        Some(category) => registry.list_by_category(category),
        None => registry.all(),
    };

    specs.into_iter().map(format_row).collect()
}

fn format_row(spec: &ComponentSpec) -> String {
    let examples = if spec.has_examples() {
        format!("{} examples", spec.examples().len())
    } else {
        "no examples".to_string()
    };

    format!(
        "{:<20} {:<20} {:<14} {}",
        spec.id(),
        spec.name(),
        spec.category().as_str(),
        examples
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_catalog::ExampleSpec;

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry
            .register_all([
                ComponentSpec::builder("switch", "Switch")
                    .category("inputs")
                    .example(ExampleSpec::new("on", "On").with_source("<Switch checked />"))
                    .build()
                    .unwrap(),
                ComponentSpec::builder("kbd", "Kbd").category("text").build().unwrap(),
            ])
            .unwrap();
        registry
    }

    #[test]
    fn lists_all_in_registration_order() {
        let rows = listing(&registry(), None);

        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("switch"));
        assert!(rows[0].ends_with("1 examples"));
        assert!(rows[1].ends_with("no examples"));
    }

    #[test]
    fn filters_by_category() {
        let rows = listing(&registry(), Some(Category::Text));

        assert_eq!(rows.len(), 1);
        assert!(rows[0].starts_with("kbd"));
    }
}
