//! Print the resolved examples of one component.

use std::path::Path;

use anyhow::{Context, Result};
use vitrine_catalog::{ComponentPage, Composer, ExampleOutcome, Resolver};

use crate::config::load_config;

/// Run the show command.
pub async fn run(config_path: &Path, id: &str) -> Result<()> {
    let config = load_config(config_path)?;
    let registry = super::load_registry(&config)?;

    let spec = registry
        .get(id)
        .with_context(|| format!("Unknown component '{}'", id))?;
    let composer = Composer::new(Resolver::new(config.serializer.to_options()));

    print!("{}", render_page(&composer.compose(spec)));

    Ok(())
}

fn render_page(page: &ComponentPage) -> String {
    let mut out = format!("{} ({})\n", page.name, page.category_label);

    if page.examples.is_empty() {
        out.push_str("\nno examples\n");
    }

    for example in &page.examples {
        out.push_str(&format!("\n// {}: {}\n", example.id, example.title));
        match &example.outcome {
            ExampleOutcome::Resolved { code, .. } => {
                out.push_str(code);
                out.push('\n');
            }
            ExampleOutcome::Failed { error, .. } => {
                out.push_str(&format!("// failed: {}\n", error));
            }
        }
    }

    out
}
