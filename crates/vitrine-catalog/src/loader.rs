//! Catalog file loading.
//!
//! Reads one component per YAML or TOML file from a catalog directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use vitrine_jsx::RenderedNode;
use walkdir::WalkDir;

use crate::model::{
    ComponentSpec, ExampleSpec, PropDescriptor, PropType, RenderError, RenderUnit,
    ValidationError,
};

/// On-disk format of a catalog file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Yaml,
    Toml,
}

impl FileFormat {
    /// Detect the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Some(Self::Yaml),
            Some("toml") => Some(Self::Toml),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ComponentFile {
    id: String,
    name: String,
    category: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    props: Vec<PropFile>,
    #[serde(default)]
    examples: Vec<ExampleFile>,
}

#[derive(Debug, Deserialize)]
struct PropFile {
    name: String,
    #[serde(rename = "type")]
    prop_type: String,
    #[serde(default)]
    default: Option<DefaultValue>,
    #[serde(default)]
    options: Option<Vec<String>>,
    #[serde(default)]
    required: bool,
    #[serde(default)]
    description: Option<String>,
}

/// A prop default as authored; kept as source text.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DefaultValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl DefaultValue {
    fn into_source(self) -> String {
        match self {
            DefaultValue::Bool(b) => b.to_string(),
            DefaultValue::Integer(n) => n.to_string(),
            DefaultValue::Float(n) => n.to_string(),
            DefaultValue::Text(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ExampleFile {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    source: Option<String>,
    #[serde(default)]
    render: Option<RenderedNode>,
}

/// Load every catalog file under `dir`, sorted by path.
pub fn load_catalog(dir: &Path) -> Result<Vec<ComponentSpec>, LoadError> {
    if !dir.exists() {
        return Err(LoadError::DirectoryNotFound(dir.display().to_string()));
    }

    let mut specs = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(format) = FileFormat::from_path(path) else {
            continue;
        };

        specs.push(load_file(path, format)?);
    }

    tracing::info!("Loaded {} components from {}", specs.len(), dir.display());
    Ok(specs)
}

fn load_file(path: &Path, format: FileFormat) -> Result<ComponentSpec, LoadError> {
    let content = fs::read_to_string(path).map_err(|e| LoadError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    tracing::debug!("Parsing {}", path.display());

    parse_component(&content, format).map_err(|e| match e {
        LoadError::Parse { message, .. } => LoadError::Parse {
            path: path.to_path_buf(),
            message,
        },
        LoadError::Invalid { source, .. } => LoadError::Invalid {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

/// Parse a single component document.
pub fn parse_component(content: &str, format: FileFormat) -> Result<ComponentSpec, LoadError> {
    let file: ComponentFile = match format {
        FileFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
        FileFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
    }
    .map_err(|message| LoadError::Parse {
        path: PathBuf::new(),
        message,
    })?;

    into_spec(file).map_err(|source| LoadError::Invalid {
        path: PathBuf::new(),
        source,
    })
}

fn into_spec(file: ComponentFile) -> Result<ComponentSpec, ValidationError> {
    let required: Vec<String> = file
        .props
        .iter()
        .filter(|p| p.required)
        .map(|p| p.name.clone())
        .collect();

    let mut builder = ComponentSpec::builder(file.id, file.name.clone())
        .category(file.category)
        .description(file.description);

    for prop in file.props {
        let mut descriptor = PropDescriptor::new(prop.name, prop.prop_type.parse::<PropType>()?);
        descriptor.default = prop.default.map(DefaultValue::into_source);
        descriptor.options = prop.options;
        descriptor.required = prop.required;
        descriptor.description = prop.description;
        builder = builder.prop(descriptor);
    }

    for example in file.examples {
        let mut spec = ExampleSpec::new(example.id, example.title)
            .with_description(example.description);
        if let Some(source) = example.source {
            spec = spec.with_source(source);
        }
        if let Some(tree) = example.render {
            spec = spec.with_render(tree_render_unit(&file.name, &required, tree));
        }
        builder = builder.example(spec);
    }

    builder.build()
}

/// Render unit for a declarative tree.
///
/// When the root renders the documented component itself, its required props must be
/// present, the same way a component constructor would reject them.
fn tree_render_unit(component: &str, required: &[String], tree: RenderedNode) -> RenderUnit {
    let component = component.to_string();
    let required = required.to_vec();

    RenderUnit::new(move || {
        if tree.tag == component {
            for prop in &required {
                let present = if prop == "children" {
                    !tree.children.is_empty()
                } else {
                    tree.has_attribute(prop)
                };
                if !present {
                    return Err(RenderError::MissingRequiredProp {
                        component: component.clone(),
                        prop: prop.clone(),
                    });
                }
            }
        }
        Ok(tree.clone())
    })
}

/// Errors that can occur when loading catalog files.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Catalog directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("Failed to read {}: {message}", .path.display())]
    Read { path: PathBuf, message: String },

    #[error("Failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Invalid component in {}: {source}", .path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },
}
