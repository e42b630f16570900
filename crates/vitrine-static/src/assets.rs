//! Asset pipeline for the catalog stylesheet.

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the main CSS file.
    pub fn generate_css() -> String {
        DEFAULT_CSS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

const DEFAULT_CSS: &str = r#"/* vitrine catalog theme */

:root {
  --sidebar-width: 260px;
  --content-max-width: 860px;
  --background: #ffffff;
  --foreground: #0f172a;
  --muted: #f1f5f9;
  --muted-foreground: #64748b;
  --border: #e2e8f0;
  --primary: #2563eb;
  --destructive: #dc2626;
  --radius: 0.375rem;
}

* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  font-family: system-ui, -apple-system, sans-serif;
  background: var(--background);
  color: var(--foreground);
  line-height: 1.6;
}

.layout {
  display: grid;
  grid-template-columns: var(--sidebar-width) 1fr;
  min-height: 100vh;
}

.sidebar {
  background: var(--muted);
  border-right: 1px solid var(--border);
  padding: 1.5rem;
  position: sticky;
  top: 0;
  height: 100vh;
  overflow-y: auto;
}

.nav-logo {
  font-weight: 700;
  font-size: 1.25rem;
  color: var(--foreground);
  text-decoration: none;
}

.nav-section-title {
  margin-top: 1.25rem;
  font-size: 0.75rem;
  text-transform: uppercase;
  color: var(--muted-foreground);
}

.nav-list {
  list-style: none;
}

.nav-item a {
  display: block;
  padding: 0.25rem 0.75rem;
  color: var(--muted-foreground);
  text-decoration: none;
  border-radius: var(--radius);
}

.nav-item.active > a {
  background: var(--primary);
  color: var(--background);
}

.main {
  padding: 2rem;
}

.doc {
  max-width: var(--content-max-width);
}

.doc h1 {
  font-size: 2.25rem;
  margin-bottom: 0.5rem;
}

.doc h2 {
  font-size: 1.5rem;
  margin: 2rem 0 1rem;
  padding-bottom: 0.5rem;
  border-bottom: 1px solid var(--border);
}

.category {
  font-size: 0.75rem;
  color: var(--muted-foreground);
}

.component-grid {
  list-style: none;
  display: grid;
  grid-template-columns: repeat(auto-fill, minmax(200px, 1fr));
  gap: 1rem;
}

.component-card {
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 1rem;
}

.failed-count,
.required {
  color: var(--destructive);
  font-size: 0.75rem;
  margin-left: 0.5rem;
}

table.props {
  width: 100%;
  border-collapse: collapse;
}

table.props th,
table.props td {
  text-align: left;
  padding: 0.5rem;
  border-bottom: 1px solid var(--border);
}

pre {
  background: var(--muted);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 1rem;
  overflow-x: auto;
  font-family: ui-monospace, monospace;
  font-size: 0.875rem;
}

.example {
  margin-bottom: 1.5rem;
}

.example-failed {
  border: 1px solid var(--destructive);
  border-radius: var(--radius);
  padding: 1rem;
  color: var(--destructive);
}
"#;
