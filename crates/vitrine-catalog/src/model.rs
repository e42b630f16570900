//! Component metadata model.
//!
//! A [`ComponentSpec`] is built once through [`ComponentSpecBuilder`], validated, and is
//! read-only afterwards. Replacing an entry means building a new one.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use vitrine_jsx::RenderedNode;

/// Catalog category of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Ui,
    Layout,
    Forms,
    Inputs,
    Text,
    Feedback,
    Navigation,
    Overlays,
    DataDisplay,
    Charts,
}

impl Category {
    /// Every category, in catalog display order.
    pub const ALL: [Category; 10] = [
        Category::Ui,
        Category::Layout,
        Category::Forms,
        Category::Inputs,
        Category::Text,
        Category::Feedback,
        Category::Navigation,
        Category::Overlays,
        Category::DataDisplay,
        Category::Charts,
    ];

    /// Identifier used in catalog files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Ui => "ui",
            Category::Layout => "layout",
            Category::Forms => "forms",
            Category::Inputs => "inputs",
            Category::Text => "text",
            Category::Feedback => "feedback",
            Category::Navigation => "navigation",
            Category::Overlays => "overlays",
            Category::DataDisplay => "data-display",
            Category::Charts => "charts",
        }
    }

    /// Human-readable heading.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Ui => "UI",
            Category::Layout => "Layout",
            Category::Forms => "Forms",
            Category::Inputs => "Inputs",
            Category::Text => "Text",
            Category::Feedback => "Feedback",
            Category::Navigation => "Navigation",
            Category::Overlays => "Overlays",
            Category::DataDisplay => "Data Display",
            Category::Charts => "Charts",
        }
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| ValidationError::UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared type of a prop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropType {
    String,
    Number,
    Boolean,
    Enum,
    Node,
    Function,
    Object,
    Array,
    Any,
}

impl PropType {
    /// Whether the type takes its values from a fixed option set.
    pub fn is_enumerable(&self) -> bool {
        matches!(self, PropType::Enum)
    }
}

impl FromStr for PropType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "string" => Ok(Self::String),
            "number" => Ok(Self::Number),
            "boolean" | "bool" => Ok(Self::Boolean),
            "enum" | "union" => Ok(Self::Enum),
            "node" | "reactnode" | "element" => Ok(Self::Node),
            "function" | "func" => Ok(Self::Function),
            "object" => Ok(Self::Object),
            "array" => Ok(Self::Array),
            "any" => Ok(Self::Any),
            _ => Err(ValidationError::UnknownPropType(s.to_string())),
        }
    }
}

/// One row of a component's prop table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropDescriptor {
    pub name: String,

    #[serde(rename = "type")]
    pub prop_type: PropType,

    /// Default as it would be written in source (`"md"`, `false`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    /// Allowed values, only for enumerable types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,

    pub required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PropDescriptor {
    pub fn new(name: impl Into<String>, prop_type: PropType) -> Self {
        Self {
            name: name.into(),
            prop_type,
            default: None,
            options: None,
            required: false,
            description: None,
        }
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn options<S: Into<String>>(mut self, options: impl IntoIterator<Item = S>) -> Self {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }
}

/// Errors a render unit can report.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum RenderError {
    #[error("<{component}> is missing required prop `{prop}`")]
    MissingRequiredProp { component: String, prop: String },

    #[error("{0}")]
    Failed(String),
}

type RenderFn = dyn Fn() -> Result<RenderedNode, RenderError> + Send + Sync;

/// Zero-argument unit that renders an example tree on demand.
#[derive(Clone)]
pub struct RenderUnit(Arc<RenderFn>);

impl RenderUnit {
    pub fn new<F>(render: F) -> Self
    where
        F: Fn() -> Result<RenderedNode, RenderError> + Send + Sync + 'static,
    {
        Self(Arc::new(render))
    }

    /// A unit that always yields a copy of `node`.
    pub fn from_node(node: RenderedNode) -> Self {
        Self::new(move || Ok(node.clone()))
    }

    /// Invoke the unit.
    pub fn render(&self) -> Result<RenderedNode, RenderError> {
        (self.0)()
    }
}

impl fmt::Debug for RenderUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RenderUnit(..)")
    }
}

/// One usage example of a component.
///
/// Carries a literal `source`, a `render` unit, or both. When both are present the
/// literal wins. An example with neither is accepted here and reported at resolution.
#[derive(Debug, Clone)]
pub struct ExampleSpec {
    id: String,
    title: String,
    description: String,
    source: Option<String>,
    render: Option<RenderUnit>,
}

impl ExampleSpec {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            source: None,
            render: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_render(mut self, render: RenderUnit) -> Self {
        self.render = Some(render);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn render_unit(&self) -> Option<&RenderUnit> {
        self.render.as_ref()
    }
}

/// Documentation entry for one component.
#[derive(Debug, Clone)]
pub struct ComponentSpec {
    id: String,
    name: String,
    category: Category,
    description: String,
    props: Vec<PropDescriptor>,
    examples: Vec<ExampleSpec>,
}

impl ComponentSpec {
    /// Start building an entry.
    pub fn builder(id: impl Into<String>, name: impl Into<String>) -> ComponentSpecBuilder {
        ComponentSpecBuilder {
            id: id.into(),
            name: name.into(),
            category: None,
            description: String::new(),
            props: Vec::new(),
            examples: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn props(&self) -> &[PropDescriptor] {
        &self.props
    }

    pub fn examples(&self) -> &[ExampleSpec] {
        &self.examples
    }

    /// Whether there is anything to show live.
    pub fn has_examples(&self) -> bool {
        !self.examples.is_empty()
    }
}

/// Builder for [`ComponentSpec`]; validation runs in [`ComponentSpecBuilder::build`].
#[derive(Debug)]
pub struct ComponentSpecBuilder {
    id: String,
    name: String,
    category: Option<String>,
    description: String,
    props: Vec<PropDescriptor>,
    examples: Vec<ExampleSpec>,
}

impl ComponentSpecBuilder {
    /// Category identifier, parsed at build time.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn prop(mut self, prop: PropDescriptor) -> Self {
        self.props.push(prop);
        self
    }

    pub fn example(mut self, example: ExampleSpec) -> Self {
        self.examples.push(example);
        self
    }

    /// Validate and produce the entry.
    pub fn build(self) -> Result<ComponentSpec, ValidationError> {
        static ID_RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("Invalid component id regex")
        });

        if self.id.is_empty() {
            return Err(ValidationError::EmptyId);
        }
        if !ID_RE.is_match(&self.id) {
            return Err(ValidationError::InvalidId(self.id));
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName(self.id));
        }

        let category = self
            .category
            .as_deref()
            .ok_or_else(|| ValidationError::MissingCategory(self.id.clone()))?
            .parse::<Category>()?;

        let mut prop_names = HashSet::new();
        for prop in &self.props {
            validate_prop(&self.id, prop)?;
            if !prop_names.insert(prop.name.as_str()) {
                return Err(ValidationError::DuplicateProp {
                    component: self.id.clone(),
                    prop: prop.name.clone(),
                });
            }
        }

        let mut example_ids = HashSet::new();
        for example in &self.examples {
            if example.id.is_empty() {
                return Err(ValidationError::EmptyExampleId(self.id.clone()));
            }
            if !example_ids.insert(example.id.as_str()) {
                return Err(ValidationError::DuplicateExample {
                    component: self.id.clone(),
                    example: example.id.clone(),
                });
            }
        }

        Ok(ComponentSpec {
            id: self.id,
            name: self.name,
            category,
            description: self.description,
            props: self.props,
            examples: self.examples,
        })
    }
}

fn validate_prop(component: &str, prop: &PropDescriptor) -> Result<(), ValidationError> {
    if prop.name.trim().is_empty() {
        return Err(ValidationError::EmptyPropName(component.to_string()));
    }

    let Some(options) = &prop.options else {
        return Ok(());
    };

    if !prop.prop_type.is_enumerable() {
        return Err(ValidationError::OptionsOnNonEnumerable {
            component: component.to_string(),
            prop: prop.name.clone(),
            prop_type: prop.prop_type,
        });
    }

    if let Some(default) = &prop.default {
        let unquoted = default.trim_matches(|c| c == '"' || c == '\'');
        if !options.iter().any(|o| o == default || o == unquoted) {
            return Err(ValidationError::DefaultNotInOptions {
                component: component.to_string(),
                prop: prop.name.clone(),
                default: default.clone(),
            });
        }
    }

    Ok(())
}

/// Errors raised when a component entry is malformed.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("Component id must not be empty")]
    EmptyId,

    #[error("Component id must be kebab-case: {0}")]
    InvalidId(String),

    #[error("Component {0} has no display name")]
    EmptyName(String),

    #[error("Component {0} has no category")]
    MissingCategory(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown prop type: {0}")]
    UnknownPropType(String),

    #[error("Component {0} has a prop without a name")]
    EmptyPropName(String),

    #[error("Component {component} declares prop `{prop}` twice")]
    DuplicateProp { component: String, prop: String },

    #[error("Prop `{prop}` of {component} has options but type {prop_type:?} is not enumerable")]
    OptionsOnNonEnumerable {
        component: String,
        prop: String,
        prop_type: PropType,
    },

    #[error("Default {default} of prop `{prop}` in {component} is not one of its options")]
    DefaultNotInOptions {
        component: String,
        prop: String,
        default: String,
    },

    #[error("Component {0} has an example without an id")]
    EmptyExampleId(String),

    #[error("Component {component} declares example `{example}` twice")]
    DuplicateExample { component: String, example: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button() -> ComponentSpecBuilder {
        ComponentSpec::builder("button", "Button").category("forms")
    }

    #[test]
    fn builds_valid_component() {
        let spec = button()
            .description("A clickable button.")
            .prop(
                PropDescriptor::new("variant", PropType::Enum)
                    .options(["primary", "secondary"])
                    .default_value("primary"),
            )
            .prop(PropDescriptor::new("children", PropType::Node).required())
            .example(ExampleSpec::new("basic", "Basic").with_source("<Button>Go</Button>"))
            .build()
            .unwrap();

        assert_eq!(spec.id(), "button");
        assert_eq!(spec.category(), Category::Forms);
        assert_eq!(spec.props().len(), 2);
        assert!(spec.has_examples());
    }

    #[test]
    fn rejects_empty_and_malformed_ids() {
        let empty = ComponentSpec::builder("", "Button").category("forms").build();
        assert_eq!(empty.unwrap_err(), ValidationError::EmptyId);

        let camel = ComponentSpec::builder("myButton", "Button")
            .category("forms")
            .build();
        assert!(matches!(camel, Err(ValidationError::InvalidId(_))));
    }

    #[test]
    fn rejects_unknown_category() {
        let result = ComponentSpec::builder("kbd", "Kbd").category("widgets").build();

        assert_eq!(
            result.unwrap_err(),
            ValidationError::UnknownCategory("widgets".to_string())
        );
    }

    #[test]
    fn rejects_options_on_non_enumerable_prop() {
        let result = button()
            .prop(PropDescriptor::new("label", PropType::String).options(["a", "b"]))
            .build();

        assert!(matches!(
            result,
            Err(ValidationError::OptionsOnNonEnumerable { .. })
        ));
    }

    #[test]
    fn rejects_default_outside_options() {
        let result = button()
            .prop(
                PropDescriptor::new("size", PropType::Enum)
                    .options(["sm", "md"])
                    .default_value("xl"),
            )
            .build();

        assert!(matches!(
            result,
            Err(ValidationError::DefaultNotInOptions { .. })
        ));

        let quoted = button()
            .prop(
                PropDescriptor::new("size", PropType::Enum)
                    .options(["sm", "md"])
                    .default_value("\"md\""),
            )
            .build();
        assert!(quoted.is_ok());
    }

    #[test]
    fn rejects_duplicate_props_and_examples() {
        let props = button()
            .prop(PropDescriptor::new("size", PropType::String))
            .prop(PropDescriptor::new("size", PropType::String))
            .build();
        assert!(matches!(props, Err(ValidationError::DuplicateProp { .. })));

        let examples = button()
            .example(ExampleSpec::new("basic", "One").with_source("<Button />"))
            .example(ExampleSpec::new("basic", "Two").with_source("<Button />"))
            .build();
        assert!(matches!(
            examples,
            Err(ValidationError::DuplicateExample { .. })
        ));
    }

    #[test]
    fn empty_examples_are_allowed() {
        let spec = button().build().unwrap();

        assert!(!spec.has_examples());
    }

    #[test]
    fn parses_categories_and_prop_types() {
        assert_eq!("Data-Display".parse::<Category>(), Ok(Category::DataDisplay));
        assert_eq!("bool".parse::<PropType>(), Ok(PropType::Boolean));
        assert!("widget".parse::<PropType>().is_err());
    }

    #[test]
    fn render_unit_yields_fresh_trees() {
        let unit = RenderUnit::from_node(RenderedNode::new("Kbd").text("K"));

        assert_eq!(unit.render().unwrap(), unit.render().unwrap());
    }
}
