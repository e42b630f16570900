//! Template engine for rendering catalog pages.

use minijinja::{context, Environment};
use serde::Serialize;
use vitrine_catalog::ComponentPage;

/// Components of one category.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogSection {
    /// Category identifier
    pub id: String,
    /// Category heading
    pub title: String,
    /// Components in registration order
    pub components: Vec<ComponentSummary>,
}

/// One component as listed on the index page.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub path: String,
    pub example_count: usize,
    pub failed_count: usize,
}

/// Site-wide values shared by every page.
#[derive(Debug, Clone, Serialize)]
pub struct SiteContext {
    /// Site title
    pub site_title: String,
    /// Base URL
    pub base_url: String,
    /// Catalog sections for navigation
    pub sections: Vec<CatalogSection>,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with default templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template_owned("base.html".to_string(), BASE_TEMPLATE.to_string())
            .expect("Failed to add base template");

        env.add_template_owned("nav.html".to_string(), NAV_TEMPLATE.to_string())
            .expect("Failed to add nav template");

        env.add_template_owned("index.html".to_string(), INDEX_TEMPLATE.to_string())
            .expect("Failed to add index template");

        env.add_template_owned("component.html".to_string(), COMPONENT_TEMPLATE.to_string())
            .expect("Failed to add component template");

        Self { env }
    }

    /// Render the catalog index.
    pub fn render_index(&self, site: &SiteContext) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("index.html")?;

        tmpl.render(context! {
            title => "Components",
            site_title => &site.site_title,
            base_url => &site.base_url,
            sections => &site.sections,
            active => "",
        })
    }

    /// Render one component page.
    pub fn render_component(
        &self,
        site: &SiteContext,
        page: &ComponentPage,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template("component.html")?;

        tmpl.render(context! {
            title => &page.name,
            site_title => &site.site_title,
            base_url => &site.base_url,
            sections => &site.sections,
            active => &page.id,
            page => page,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }} - {{ site_title }}</title>
  <link rel="stylesheet" href="{{ base_url }}assets/main.css">
</head>
<body>
  <div class="layout">
    <nav class="sidebar">
      {% include "nav.html" %}
    </nav>
    <main class="main">
      {% block content %}{% endblock %}
    </main>
  </div>
</body>
</html>"##;

const NAV_TEMPLATE: &str = r##"<div class="nav-header">
  <a href="{{ base_url }}" class="nav-logo">{{ site_title }}</a>
</div>
{% for section in sections %}
<div class="nav-section">
  <h3 class="nav-section-title">{{ section.title }}</h3>
  <ul class="nav-list">
  {% for item in section.components %}
    <li class="nav-item{% if item.id == active %} active{% endif %}">
      <a href="{{ item.path }}">{{ item.name }}</a>
    </li>
  {% endfor %}
  </ul>
</div>
{% endfor %}"##;

const INDEX_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="doc">
  <h1>Components</h1>
  {% for section in sections %}
  <section id="{{ section.id }}">
    <h2>{{ section.title }}</h2>
    <ul class="component-grid">
    {% for item in section.components %}
      <li class="component-card">
        <a href="{{ item.path }}">{{ item.name }}</a>
        <p>{{ item.description }}</p>
        <span class="example-count">{{ item.example_count }} examples</span>
        {% if item.failed_count %}<span class="failed-count">{{ item.failed_count }} failed</span>{% endif %}
      </li>
    {% endfor %}
    </ul>
  </section>
  {% endfor %}
</article>
{% endblock %}"##;

const COMPONENT_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="doc">
  <h1>{{ page.name }}</h1>
  <span class="category">{{ page.category_label }}</span>
  <div class="content">
    {{ page.description_html | safe }}
  </div>

  {% if page.props %}
  <h2 id="props">Props</h2>
  <table class="props">
    <thead>
      <tr><th>Name</th><th>Type</th><th>Default</th><th>Description</th></tr>
    </thead>
    <tbody>
    {% for prop in page.props %}
      <tr>
        <td><code>{{ prop.name }}</code>{% if prop.required %} <span class="required">required</span>{% endif %}</td>
        <td><code>{% if prop.options %}{{ prop.options | join(" | ") }}{% else %}{{ prop.type }}{% endif %}</code></td>
        <td>{% if prop.default %}<code>{{ prop.default }}</code>{% else %}-{% endif %}</td>
        <td>{{ prop.description or "" }}</td>
      </tr>
    {% endfor %}
    </tbody>
  </table>
  {% endif %}

  <h2 id="examples">Examples</h2>
  {% for example in page.examples %}
  <section class="example" id="example-{{ example.id }}">
    <h3>{{ example.title }}</h3>
    {% if example.description %}<p>{{ example.description }}</p>{% endif %}
    {% if example.status == "failed" %}
    <div class="example-failed" role="alert">
      <strong>{{ example.kind }}</strong>
      <pre>{{ example.error }}</pre>
    </div>
    {% else %}
    <pre class="example-code" data-origin="{{ example.origin }}"><code class="language-tsx">{{ example.code }}</code></pre>
    {% endif %}
  </section>
  {% else %}
  <p class="no-examples">No examples.</p>
  {% endfor %}
</article>
{% endblock %}"##;

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_catalog::{Composer, ComponentSpec, ExampleSpec, PropDescriptor, PropType};

    fn site() -> SiteContext {
        SiteContext {
            site_title: "Design System".to_string(),
            base_url: "/".to_string(),
            sections: vec![CatalogSection {
                id: "text".to_string(),
                title: "Text".to_string(),
                components: vec![ComponentSummary {
                    id: "kbd".to_string(),
                    name: "Kbd".to_string(),
                    description: "Keyboard key".to_string(),
                    path: "/kbd/".to_string(),
                    example_count: 2,
                    failed_count: 1,
                }],
            }],
        }
    }

    fn kbd_page() -> ComponentPage {
        let spec = ComponentSpec::builder("kbd", "Kbd")
            .category("text")
            .description("Keyboard key")
            .prop(PropDescriptor::new("size", PropType::Enum).options(["sm", "md"]))
            .example(ExampleSpec::new("basic", "Basic").with_source("<Kbd>Ctrl</Kbd>"))
            .example(ExampleSpec::new("empty", "Empty"))
            .build()
            .unwrap();
        Composer::default().compose(&spec)
    }

    #[test]
    fn renders_index() {
        let html = TemplateEngine::new().render_index(&site()).unwrap();

        assert!(html.contains("<title>Components - Design System</title>"));
        assert!(html.contains(">Kbd</a>"));
        assert!(html.contains("1 failed"));
    }

    #[test]
    fn renders_component_with_escaped_code() {
        let html = TemplateEngine::new()
            .render_component(&site(), &kbd_page())
            .unwrap();

        assert!(html.contains("&lt;Kbd&gt;Ctrl"));
        assert!(!html.contains("<Kbd>"));
        assert!(html.contains("sm | md"));
        assert!(html.contains(r#"class="nav-item active""#));
    }

    #[test]
    fn renders_failed_examples_visibly() {
        let html = TemplateEngine::new()
            .render_component(&site(), &kbd_page())
            .unwrap();

        assert!(html.contains("example-failed"));
        assert!(html.contains("unresolvable"));
    }
}
