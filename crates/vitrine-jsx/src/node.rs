//! Render tree consumed by the serializer.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A node of a rendered component tree.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RenderedNode {
    /// Intrinsic element name ("div") or component reference ("Button")
    pub tag: String,

    /// Attributes in declaration order
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, AttributeValue>,

    /// Children in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Child>,
}

/// A child of a rendered node.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(from = "RawChild", into = "RawChild")]
pub enum Child {
    /// Literal text content
    Text(String),
    /// Nested element
    Node(RenderedNode),
}

/// The value of an attribute.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(from = "RawValue", into = "RawValue")]
pub enum AttributeValue {
    /// Omitted from output entirely
    Absent,
    /// Boolean flag: `disabled`
    Bool(bool),
    /// Numeric literal: `level={1}`
    Number(Number),
    /// String literal: `size="xs"`
    String(String),
    /// Expression printed verbatim: `onClick={handleClick}`
    Expression(String),
    /// Renderable content: `icon={<Icon />}`
    Node(Box<RenderedNode>),
    /// Array literal: `items={["a", "b"]}`
    List(Vec<AttributeValue>),
    /// Object literal: `style={{ color: "red" }}`
    Object(IndexMap<String, AttributeValue>),
}

impl RenderedNode {
    /// Create a node with no attributes and no children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Append an attribute. A repeated name keeps its first position.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Append a child element.
    pub fn child(mut self, node: RenderedNode) -> Self {
        self.children.push(Child::Node(node));
        self
    }

    /// Append a text child.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Child::Text(text.into()));
        self
    }

    /// Whether the attribute is set to anything other than [`AttributeValue::Absent`].
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes
            .get(name)
            .is_some_and(|v| !matches!(v, AttributeValue::Absent))
    }
}

impl AttributeValue {
    /// Create an expression value printed verbatim.
    pub fn expr(source: impl Into<String>) -> Self {
        Self::Expression(source.into())
    }

    /// Create a numeric value from a float. Non-finite floats have no literal and
    /// fall back to the matching global expression.
    pub fn float(value: f64) -> Self {
        match Number::from_f64(value) {
            Some(n) => Self::Number(n),
            None if value.is_nan() => Self::Expression("NaN".to_string()),
            None if value > 0.0 => Self::Expression("Infinity".to_string()),
            None => Self::Expression("-Infinity".to_string()),
        }
    }

    /// Create an object literal from ordered entries.
    pub fn object<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<AttributeValue>,
    {
        Self::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Create an array literal.
    pub fn list<V: Into<AttributeValue>>(values: impl IntoIterator<Item = V>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::float(value)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for AttributeValue {
                fn from(value: $ty) -> Self {
                    Self::Number(Number::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i32, i64, u32, u64, usize);

impl From<RenderedNode> for AttributeValue {
    fn from(value: RenderedNode) -> Self {
        Self::Node(Box::new(value))
    }
}

impl<T: Into<AttributeValue>> From<Option<T>> for AttributeValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// Authoring form of a child. Bare numbers and booleans are text (`children: [3]`).
#[derive(Clone, Deserialize, Serialize)]
#[serde(untagged)]
enum RawChild {
    Text(String),
    Number(Number),
    Bool(bool),
    Node(RenderedNode),
}

impl From<RawChild> for Child {
    fn from(raw: RawChild) -> Self {
        match raw {
            RawChild::Text(s) => Self::Text(s),
            RawChild::Number(n) => Self::Text(n.to_string()),
            RawChild::Bool(b) => Self::Text(b.to_string()),
            RawChild::Node(n) => Self::Node(n),
        }
    }
}

impl From<Child> for RawChild {
    fn from(child: Child) -> Self {
        match child {
            Child::Text(s) => Self::Text(s),
            Child::Node(n) => Self::Node(n),
        }
    }
}

/// Authoring form of an attribute value in catalog files.
///
/// Plain scalars map to their literal kinds, `null` to absent, sequences to lists and
/// single-key maps (`expr`, `node`, `object`) to the remaining kinds.
#[derive(Clone, Deserialize, Serialize)]
#[serde(untagged)]
enum RawValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<AttributeValue>),
    Tagged(TaggedValue),
}

#[derive(Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
enum TaggedValue {
    Expr(String),
    Node(Box<RenderedNode>),
    Object(IndexMap<String, AttributeValue>),
}

impl From<RawValue> for AttributeValue {
    fn from(raw: RawValue) -> Self {
        match raw {
            RawValue::Null => Self::Absent,
            RawValue::Bool(b) => Self::Bool(b),
            RawValue::Number(n) => Self::Number(n),
            RawValue::String(s) => Self::String(s),
            RawValue::List(values) => Self::List(values),
            RawValue::Tagged(TaggedValue::Expr(e)) => Self::Expression(e),
            RawValue::Tagged(TaggedValue::Node(n)) => Self::Node(n),
            RawValue::Tagged(TaggedValue::Object(o)) => Self::Object(o),
        }
    }
}

impl From<AttributeValue> for RawValue {
    fn from(value: AttributeValue) -> Self {
        match value {
            AttributeValue::Absent => Self::Null,
            AttributeValue::Bool(b) => Self::Bool(b),
            AttributeValue::Number(n) => Self::Number(n),
            AttributeValue::String(s) => Self::String(s),
            AttributeValue::List(values) => Self::List(values),
            AttributeValue::Expression(e) => Self::Tagged(TaggedValue::Expr(e)),
            AttributeValue::Node(n) => Self::Tagged(TaggedValue::Node(n)),
            AttributeValue::Object(o) => Self::Tagged(TaggedValue::Object(o)),
        }
    }
}
