//! Static catalog builder.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;

use vitrine_catalog::{Category, Composer, ComponentPage, Registry};

use crate::assets::AssetPipeline;
use crate::templates::{CatalogSection, ComponentSummary, SiteContext, TemplateEngine};

/// Configuration for building a static catalog.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Output directory
    pub output_dir: PathBuf,

    /// Minify CSS output
    pub minify: bool,

    /// Base URL for the site
    pub base_url: String,

    /// Site title
    pub title: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("dist"),
            minify: true,
            base_url: "/".to_string(),
            title: "Components".to_string(),
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of component pages generated
    pub pages: usize,

    /// Number of examples composed
    pub examples: usize,

    /// Number of examples that failed to resolve
    pub failed_examples: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to serialize catalog: {0}")]
    SerializeError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// JSON export of the composed catalog.
#[derive(Serialize)]
struct CatalogExport<'a> {
    title: &'a str,
    categories: Vec<CategoryCount>,
    components: &'a [ComponentPage],
}

#[derive(Serialize)]
struct CategoryCount {
    category: Category,
    count: usize,
}

/// Static catalog builder.
pub struct StaticBuilder {
    config: BuildConfig,
    registry: Arc<Registry>,
    composer: Composer,
    templates: TemplateEngine,
}

impl StaticBuilder {
    /// Create a new static builder over a populated registry.
    pub fn new(config: BuildConfig, registry: Arc<Registry>, composer: Composer) -> Self {
        Self {
            config,
            registry,
            composer,
            templates: TemplateEngine::new(),
        }
    }

    /// Build the static catalog.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let pages = self.composer.compose_all(&self.registry);
        let site = SiteContext {
            site_title: self.config.title.clone(),
            base_url: self.config.base_url.clone(),
            sections: self.build_sections(&pages),
        };

        // Render and write component pages in parallel
        pages
            .par_iter()
            .map(|page| self.write_component_page(&site, page))
            .collect::<Result<Vec<()>, BuildError>>()?;

        let index = self
            .templates
            .render_index(&site)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;
        fs::write(self.config.output_dir.join("index.html"), index)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        self.write_catalog_json(&pages)?;
        self.generate_assets()?;

        let examples = pages.iter().map(|p| p.examples.len()).sum();
        let failed_examples = pages.iter().map(ComponentPage::failed_count).sum();
        tracing::debug!("Wrote {} component pages", pages.len());

        Ok(BuildResult {
            pages: pages.len(),
            examples,
            failed_examples,
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Group pages by category for navigation and the index.
    fn build_sections(&self, pages: &[ComponentPage]) -> Vec<CatalogSection> {
        self.registry
            .categories()
            .into_iter()
            .map(|(category, _)| CatalogSection {
                id: category.as_str().to_string(),
                title: category.label().to_string(),
                components: pages
                    .iter()
                    .filter(|p| p.category == category)
                    .map(|p| ComponentSummary {
                        id: p.id.clone(),
                        name: p.name.clone(),
                        description: first_sentence(&p.description),
                        path: self.component_url(&p.id),
                        example_count: p.examples.len(),
                        failed_count: p.failed_count(),
                    })
                    .collect(),
            })
            .collect()
    }

    fn component_url(&self, id: &str) -> String {
        format!("{}{}/", self.config.base_url, id)
    }

    fn write_component_page(
        &self,
        site: &SiteContext,
        page: &ComponentPage,
    ) -> Result<(), BuildError> {
        let html = self
            .templates
            .render_component(site, page)
            .map_err(|e| BuildError::TemplateError(e.to_string()))?;

        let dir = self.config.output_dir.join(&page.id);
        fs::create_dir_all(&dir).map_err(|e| BuildError::WriteError(e.to_string()))?;
        fs::write(dir.join("index.html"), html).map_err(|e| BuildError::WriteError(e.to_string()))?;

        tracing::debug!("Wrote page for {}", page.id);
        Ok(())
    }

    fn write_catalog_json(&self, pages: &[ComponentPage]) -> Result<(), BuildError> {
        let export = CatalogExport {
            title: &self.config.title,
            categories: self
                .registry
                .categories()
                .into_iter()
                .map(|(category, count)| CategoryCount { category, count })
                .collect(),
            components: pages,
        };

        let json = serde_json::to_string_pretty(&export)
            .map_err(|e| BuildError::SerializeError(e.to_string()))?;

        fs::write(self.config.output_dir.join("catalog.json"), json)
            .map_err(|e| BuildError::WriteError(e.to_string()))
    }

    fn generate_assets(&self) -> Result<(), BuildError> {
        let assets_dir = self.config.output_dir.join("assets");
        fs::create_dir_all(&assets_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        let css = AssetPipeline::generate_css();
        let css = if self.config.minify {
            AssetPipeline::minify_css(&css).unwrap_or_else(|e| {
                tracing::warn!("Skipping CSS minification: {}", e);
                css.clone()
            })
        } else {
            css
        };

        fs::write(assets_dir.join("main.css"), css).map_err(|e| BuildError::WriteError(e.to_string()))
    }
}

/// First sentence of a description, for index cards.
fn first_sentence(text: &str) -> String {
    let line = text.lines().next().unwrap_or("").trim();
    match line.find(". ") {
        Some(end) => line[..=end].to_string(),
        None => line.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use vitrine_catalog::{ComponentSpec, ExampleSpec, RenderUnit};
    use vitrine_jsx::RenderedNode;

    fn registry() -> Arc<Registry> {
        let mut registry = Registry::new();
        registry
            .register_all([
                ComponentSpec::builder("heading", "Heading")
                    .category("text")
                    .description("Section titles. Six levels.")
                    .example(ExampleSpec::new("h1", "Level one").with_render(
                        RenderUnit::from_node(
                            RenderedNode::new("Heading").attr("level", 1).text("Page Title"),
                        ),
                    ))
                    .build()
                    .unwrap(),
                ComponentSpec::builder("loader", "Loader")
                    .category("feedback")
                    .example(ExampleSpec::new("empty", "Empty"))
                    .build()
                    .unwrap(),
            ])
            .unwrap();
        Arc::new(registry)
    }

    #[tokio::test]
    async fn builds_catalog_site() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        let builder = StaticBuilder::new(
            BuildConfig {
                output_dir: out.clone(),
                ..Default::default()
            },
            registry(),
            Composer::default(),
        );
        let result = builder.build().await.unwrap();

        assert_eq!(result.pages, 2);
        assert_eq!(result.examples, 2);
        assert_eq!(result.failed_examples, 1);
        assert!(out.join("index.html").exists());
        assert!(out.join("heading/index.html").exists());
        assert!(out.join("loader/index.html").exists());
        assert!(out.join("assets/main.css").exists());

        let page = fs::read_to_string(out.join("heading/index.html")).unwrap();
        assert!(page.contains("Page Title"));
    }

    #[tokio::test]
    async fn exports_catalog_json() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist");

        StaticBuilder::new(
            BuildConfig {
                output_dir: out.clone(),
                minify: false,
                ..Default::default()
            },
            registry(),
            Composer::default(),
        )
        .build()
        .await
        .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.join("catalog.json")).unwrap()).unwrap();

        assert_eq!(json["components"][0]["id"], "heading");
        assert_eq!(
            json["components"][0]["examples"][0]["code"],
            "<Heading level={1}>Page Title</Heading>"
        );
        assert_eq!(json["components"][1]["examples"][0]["status"], "failed");
        assert_eq!(json["categories"][0]["category"], "text");
    }

    #[test]
    fn takes_first_sentence() {
        assert_eq!(first_sentence("Section titles. Six levels."), "Section titles.");
        assert_eq!(first_sentence("One line"), "One line");
        assert_eq!(first_sentence(""), "");
    }
}
