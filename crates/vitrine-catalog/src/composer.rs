//! Catalog page composition.
//!
//! Merges a component entry, its resolved examples and its prop table into one payload
//! for the presentation layer. A failing example becomes a visible failed payload and
//! never blocks its siblings or other components.

use pulldown_cmark::{html, Options, Parser};
use rayon::prelude::*;
use serde::Serialize;

use crate::model::{Category, ComponentSpec, ExampleSpec, PropDescriptor};
use crate::registry::Registry;
use crate::resolver::{ResolveError, Resolver, SourceOrigin};

/// Display payload for one component.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentPage {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub category_label: String,
    pub description: String,
    /// Description rendered from Markdown
    pub description_html: String,
    pub props: Vec<PropDescriptor>,
    pub examples: Vec<ExamplePayload>,
}

impl ComponentPage {
    /// Number of examples that failed to resolve.
    pub fn failed_count(&self) -> usize {
        self.examples.iter().filter(|e| e.is_failed()).count()
    }
}

/// Display payload for one example.
#[derive(Debug, Clone, Serialize)]
pub struct ExamplePayload {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(flatten)]
    pub outcome: ExampleOutcome,
}

impl ExamplePayload {
    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, ExampleOutcome::Failed { .. })
    }

    /// Resolved code, if resolution succeeded.
    pub fn code(&self) -> Option<&str> {
        match &self.outcome {
            ExampleOutcome::Resolved { code, .. } => Some(code),
            ExampleOutcome::Failed { .. } => None,
        }
    }
}

/// Result of resolving one example.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExampleOutcome {
    Resolved { code: String, origin: SourceOrigin },
    Failed { kind: FailureKind, error: String },
}

/// Why an example failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Unresolvable,
    RenderFailure,
}

/// Builds display payloads from registry entries.
#[derive(Debug, Clone, Default)]
pub struct Composer {
    resolver: Resolver,
}

impl Composer {
    pub fn new(resolver: Resolver) -> Self {
        Self { resolver }
    }

    /// Compose one component.
    pub fn compose(&self, spec: &ComponentSpec) -> ComponentPage {
        if !spec.has_examples() {
            tracing::debug!("Component {} has no examples", spec.id());
        }

        let examples = spec
            .examples()
            .iter()
            .map(|example| self.compose_example(spec, example))
            .collect();

        ComponentPage {
            id: spec.id().to_string(),
            name: spec.name().to_string(),
            category: spec.category(),
            category_label: spec.category().label().to_string(),
            description: spec.description().to_string(),
            description_html: render_markdown(spec.description()),
            props: spec.props().to_vec(),
            examples,
        }
    }

    /// Compose every registered component, in registration order.
    pub fn compose_all(&self, registry: &Registry) -> Vec<ComponentPage> {
        registry
            .all()
            .par_iter()
            .map(|spec| self.compose(spec))
            .collect()
    }

    fn compose_example(&self, spec: &ComponentSpec, example: &ExampleSpec) -> ExamplePayload {
        let outcome = match self.resolver.resolve(example) {
            Ok(resolved) => ExampleOutcome::Resolved {
                code: resolved.code,
                origin: resolved.origin,
            },
            Err(e) => {
                tracing::warn!("Example {} of {} failed: {}", example.id(), spec.id(), e);
                let kind = match e {
                    ResolveError::Unresolvable { .. } => FailureKind::Unresolvable,
                    ResolveError::RenderFailure { .. } => FailureKind::RenderFailure,
                };
                ExampleOutcome::Failed {
                    kind,
                    error: e.to_string(),
                }
            }
        };

        ExamplePayload {
            id: example.id().to_string(),
            title: example.title().to_string(),
            description: example.description().to_string(),
            outcome,
        }
    }
}

/// Render a Markdown description to HTML.
pub fn render_markdown(source: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(source, options);

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}
