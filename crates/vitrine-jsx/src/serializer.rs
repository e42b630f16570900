//! JSX source serializer.
//!
//! Turns a [`RenderedNode`] tree back into the markup an author would have written to
//! produce it. Output is deterministic: attribute and child order come straight from the
//! tree and nothing depends on addresses, time or hashing.
//!
//! Formatting policy:
//! - childless nodes self-close: `<Loader size="xs" />`
//! - a node whose only child is text stays on one line: `<Heading>Title</Heading>`
//! - every other child list puts each child on its own line, one indent unit deeper
//! - text that would not survive a re-parse verbatim is written as a string expression
//!   (`{"a < b"}`); see [`text_needs_expression`]

use std::fmt::Write;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::node::{AttributeValue, Child, RenderedNode};

/// Indentation unit for nested children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// N spaces per level
    Spaces(u8),
    /// One tab per level
    Tab,
}

impl Indent {
    fn write(&self, out: &mut String, depth: usize) {
        let unit = match self {
            Indent::Spaces(n) => " ".repeat(usize::from(*n)),
            Indent::Tab => "\t".to_string(),
        };
        for _ in 0..depth {
            out.push_str(&unit);
        }
    }
}

impl Default for Indent {
    fn default() -> Self {
        Indent::Spaces(2)
    }
}

/// Options controlling serializer output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Indentation unit per nesting level
    pub indent: Indent,

    /// Print `true` flags as bare names (`disabled`) instead of `disabled={true}`
    pub short_boolean_syntax: bool,

    /// Attribute names to leave out of the output (e.g. `key`)
    pub ignore_props: Vec<String>,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            indent: Indent::default(),
            short_boolean_syntax: true,
            ignore_props: Vec::new(),
        }
    }
}

/// Serialize a tree with default options.
pub fn jsx_to_string(node: &RenderedNode) -> String {
    JsxSerializer::default().serialize(node)
}

/// Serializer holding a fixed set of options. Stateless across calls.
#[derive(Debug, Clone, Default)]
pub struct JsxSerializer {
    options: SerializeOptions,
}

impl JsxSerializer {
    /// Create a serializer with the given options.
    pub fn new(options: SerializeOptions) -> Self {
        Self { options }
    }

    /// Serialize a tree to markup.
    pub fn serialize(&self, node: &RenderedNode) -> String {
        let mut out = String::new();
        self.write_node(&mut out, node, 0);
        out
    }

    fn write_node(&self, out: &mut String, node: &RenderedNode, depth: usize) {
        out.push('<');
        out.push_str(&node.tag);

        for (name, value) in &node.attributes {
            if self.options.ignore_props.iter().any(|p| p == name) {
                continue;
            }
            self.write_attribute(out, name, value, depth);
        }

        if node.children.is_empty() {
            out.push_str(" />");
            return;
        }

        out.push('>');

        if let [Child::Text(text)] = node.children.as_slice() {
            write_text(out, text, false);
        } else {
            let mut after_text = false;
            for child in &node.children {
                out.push('\n');
                self.options.indent.write(out, depth + 1);
                match child {
                    Child::Text(text) => {
                        write_text(out, text, after_text);
                        after_text = true;
                    }
                    Child::Node(child) => {
                        self.write_node(out, child, depth + 1);
                        after_text = false;
                    }
                }
            }
            out.push('\n');
            self.options.indent.write(out, depth);
        }

        out.push_str("</");
        out.push_str(&node.tag);
        out.push('>');
    }

    fn write_attribute(&self, out: &mut String, name: &str, value: &AttributeValue, depth: usize) {
        match value {
            AttributeValue::Absent | AttributeValue::Bool(false) => {}
            // `name={}` is not valid markup
            AttributeValue::Expression(expr) if expr.trim().is_empty() => {}
            AttributeValue::Bool(true) => {
                out.push(' ');
                out.push_str(name);
                if !self.options.short_boolean_syntax {
                    out.push_str("={true}");
                }
            }
            AttributeValue::String(s) => {
                let _ = write!(out, " {}=\"{}\"", name, escape_attribute(s));
            }
            AttributeValue::Number(n) => {
                let _ = write!(out, " {}={{{}}}", name, n);
            }
            AttributeValue::Expression(expr) => {
                let _ = write!(out, " {}={{{}}}", name, expr);
            }
            AttributeValue::Node(_) | AttributeValue::List(_) | AttributeValue::Object(_) => {
                out.push(' ');
                out.push_str(name);
                out.push_str("={");
                self.write_value(out, value, depth);
                out.push('}');
            }
        }
    }

    /// Write a value in expression position (inside braces or a composite literal).
    fn write_value(&self, out: &mut String, value: &AttributeValue, depth: usize) {
        match value {
            AttributeValue::Absent => out.push_str("undefined"),
            AttributeValue::Bool(b) => {
                let _ = write!(out, "{}", b);
            }
            AttributeValue::Number(n) => {
                let _ = write!(out, "{}", n);
            }
            AttributeValue::String(s) => out.push_str(&quote_string(s)),
            AttributeValue::Expression(expr) if expr.trim().is_empty() => {
                out.push_str("undefined")
            }
            AttributeValue::Expression(expr) => out.push_str(expr),
            AttributeValue::Node(node) => self.write_node(out, node, depth),
            AttributeValue::List(values) => {
                out.push('[');
                let present = values
                    .iter()
                    .filter(|v| !matches!(v, AttributeValue::Absent));
                for (i, v) in present.enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_value(out, v, depth);
                }
                out.push(']');
            }
            AttributeValue::Object(entries) => self.write_object(out, entries, depth),
        }
    }

    fn write_object(
        &self,
        out: &mut String,
        entries: &IndexMap<String, AttributeValue>,
        depth: usize,
    ) {
        let mut present = entries
            .iter()
            .filter(|(_, v)| !matches!(v, AttributeValue::Absent))
            .peekable();

        if present.peek().is_none() {
            out.push_str("{}");
            return;
        }

        out.push_str("{ ");
        for (i, (key, v)) in present.enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            if is_identifier(key) {
                out.push_str(key);
            } else {
                out.push_str(&quote_string(key));
            }
            out.push_str(": ");
            self.write_value(out, v, depth);
        }
        out.push_str(" }");
    }
}

fn write_text(out: &mut String, text: &str, after_text: bool) {
    if after_text || text_needs_expression(text) {
        out.push('{');
        out.push_str(&quote_string(text));
        out.push('}');
    } else {
        out.push_str(text);
    }
}

/// Whether a text child must be written as a string expression.
///
/// Markup-significant characters (`<`, `>`, `{`, `}`) would change the parse, and
/// line breaks or edge whitespace would be collapsed by JSX whitespace rules. A bare
/// character reference would be decoded on reparse. Empty text has no bare form at all.
pub fn text_needs_expression(text: &str) -> bool {
    text.is_empty()
        || text.starts_with(char::is_whitespace)
        || text.ends_with(char::is_whitespace)
        || text.contains(['<', '>', '{', '}', '\n', '\r'])
        || text
            .match_indices('&')
            .any(|(i, _)| ENTITY_RE.is_match(&text[i..]))
}

static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^&#?[A-Za-z0-9]+;").expect("Invalid entity regex"));

/// Escape a string attribute value for a double-quoted JSX attribute.
///
/// Double quotes become `&quot;`. An ampersand is escaped only where it would otherwise
/// start a character reference, so ordinary text like `a & b` stays readable.
pub fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for (i, c) in value.char_indices() {
        match c {
            '"' => escaped.push_str("&quot;"),
            '&' if ENTITY_RE.is_match(&value[i..]) => escaped.push_str("&amp;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Quote a string as a double-quoted JavaScript string literal.
pub fn quote_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(quoted, "\\u{:04x}", c as u32);
            }
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Whether an object key can be written without quotes.
fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn heading_with_numeric_attribute() {
        let node = RenderedNode::new("Heading")
            .attr("level", 1)
            .text("Page Title");

        assert_eq!(
            jsx_to_string(&node),
            "<Heading level={1}>Page Title</Heading>"
        );
    }

    #[test]
    fn self_closing_loader() {
        let node = RenderedNode::new("Loader")
            .attr("size", "xs")
            .attr("aria-label", "Loading");

        assert_eq!(
            jsx_to_string(&node),
            r#"<Loader size="xs" aria-label="Loading" />"#
        );
    }

    #[test]
    fn bare_node() {
        assert_eq!(jsx_to_string(&RenderedNode::new("hr")), "<hr />");
    }

    #[test]
    fn boolean_attributes() {
        let node = RenderedNode::new("Button")
            .attr("disabled", true)
            .attr("loading", false)
            .text("Save");

        assert_eq!(jsx_to_string(&node), "<Button disabled>Save</Button>");

        let long = JsxSerializer::new(SerializeOptions {
            short_boolean_syntax: false,
            ..Default::default()
        });
        assert_eq!(
            long.serialize(&node),
            "<Button disabled={true}>Save</Button>"
        );
    }

    #[test]
    fn absent_attributes_are_omitted() {
        let node = RenderedNode::new("Input")
            .attr("placeholder", AttributeValue::Absent)
            .attr("name", "email");

        let output = jsx_to_string(&node);

        assert_eq!(output, r#"<Input name="email" />"#);
        assert!(!output.contains("placeholder"));
    }

    #[test]
    fn ignored_props_are_omitted() {
        let node = RenderedNode::new("Badge").attr("key", "b1").attr("color", "red");
        let serializer = JsxSerializer::new(SerializeOptions {
            ignore_props: vec!["key".to_string()],
            ..Default::default()
        });

        assert_eq!(serializer.serialize(&node), r#"<Badge color="red" />"#);
    }

    #[test]
    fn expression_attributes_are_verbatim() {
        let node = RenderedNode::new("Button")
            .attr("onClick", AttributeValue::expr("() => alert(\"hi\")"))
            .text("Greet");

        assert_eq!(
            jsx_to_string(&node),
            "<Button onClick={() => alert(\"hi\")}>Greet</Button>"
        );
    }

    #[test]
    fn float_attributes() {
        let node = RenderedNode::new("Progress").attr("value", 0.75);

        assert_eq!(jsx_to_string(&node), "<Progress value={0.75} />");
    }

    #[test]
    fn escapes_quotes_in_attribute_strings() {
        let node = RenderedNode::new("Tooltip").attr("label", "Say \"hi\"");

        assert_eq!(
            jsx_to_string(&node),
            r#"<Tooltip label="Say &quot;hi&quot;" />"#
        );
    }

    #[test]
    fn escapes_ampersand_only_before_references() {
        assert_eq!(escape_attribute("a & b"), "a & b");
        assert_eq!(escape_attribute("&amp;"), "&amp;amp;");
        assert_eq!(escape_attribute("&#169;"), "&amp;#169;");
    }

    #[test]
    fn nested_children_are_indented() {
        let node = RenderedNode::new("Card").child(
            RenderedNode::new("CardHeader")
                .child(RenderedNode::new("CardTitle").text("Notifications"))
                .child(RenderedNode::new("Badge").attr("variant", "secondary").text("3")),
        );

        let expected = r#"<Card>
  <CardHeader>
    <CardTitle>Notifications</CardTitle>
    <Badge variant="secondary">3</Badge>
  </CardHeader>
</Card>"#;

        assert_eq!(jsx_to_string(&node), expected);
    }

    #[test]
    fn mixed_text_and_elements() {
        let node = RenderedNode::new("p")
            .text("Press")
            .child(RenderedNode::new("Kbd").text("Ctrl"))
            .text("to search");

        let expected = "<p>\n  Press\n  <Kbd>Ctrl</Kbd>\n  to search\n</p>";

        assert_eq!(jsx_to_string(&node), expected);
    }

    #[test]
    fn adjacent_text_uses_expressions() {
        let node = RenderedNode::new("span").text("one").text("two");

        assert_eq!(jsx_to_string(&node), "<span>\n  one\n  {\"two\"}\n</span>");
    }

    #[test]
    fn markup_characters_in_text_become_expressions() {
        let node = RenderedNode::new("Code").text("if (a < b) { run() }");

        assert_eq!(
            jsx_to_string(&node),
            r#"<Code>{"if (a < b) { run() }"}</Code>"#
        );
    }

    #[test]
    fn character_references_in_text_become_expressions() {
        let node = RenderedNode::new("Kbd").text("Tom &amp; Jerry");
        assert_eq!(jsx_to_string(&node), r#"<Kbd>{"Tom &amp; Jerry"}</Kbd>"#);

        let copy = RenderedNode::new("small").text("&copy; 2024");
        assert_eq!(jsx_to_string(&copy), r#"<small>{"&copy; 2024"}</small>"#);

        let numeric = RenderedNode::new("p").text("Use &lt;br&gt; or &#169;");
        assert_eq!(
            jsx_to_string(&numeric),
            r#"<p>{"Use &lt;br&gt; or &#169;"}</p>"#
        );

        let plain = RenderedNode::new("p").text("Salt & pepper");
        assert_eq!(jsx_to_string(&plain), "<p>Salt & pepper</p>");
    }

    #[test]
    fn empty_expressions_are_omitted() {
        let node = RenderedNode::new("Input")
            .attr("value", AttributeValue::expr(""))
            .attr("onChange", AttributeValue::expr("  "))
            .attr("data", AttributeValue::list([AttributeValue::expr(""), 1.into()]));

        assert_eq!(jsx_to_string(&node), "<Input data={[undefined, 1]} />");
    }

    #[test]
    fn whitespace_significant_text_becomes_expression() {
        let node = RenderedNode::new("pre").text("line one\nline two");
        assert_eq!(
            jsx_to_string(&node),
            r#"<pre>{"line one\nline two"}</pre>"#
        );

        let padded = RenderedNode::new("span").text(" padded ");
        assert_eq!(jsx_to_string(&padded), r#"<span>{" padded "}</span>"#);

        let empty = RenderedNode::new("span").text("");
        assert_eq!(jsx_to_string(&empty), r#"<span>{""}</span>"#);
    }

    #[test]
    fn node_valued_attribute() {
        let node = RenderedNode::new("Button")
            .attr("icon", RenderedNode::new("Icon").attr("name", "plus"))
            .text("Add");

        assert_eq!(
            jsx_to_string(&node),
            r#"<Button icon={<Icon name="plus" />}>Add</Button>"#
        );
    }

    #[test]
    fn composite_attributes() {
        let node = RenderedNode::new("Chart")
            .attr(
                "style",
                AttributeValue::object([
                    ("color", AttributeValue::from("red")),
                    ("padding", AttributeValue::from(4)),
                    ("border", AttributeValue::Absent),
                    ("z-index", AttributeValue::from(2)),
                ]),
            )
            .attr("data", AttributeValue::list([1, 2, 3]))
            .attr("options", AttributeValue::object::<&str, AttributeValue>([]))
            .attr("flags", AttributeValue::list([false, true]));

        assert_eq!(
            jsx_to_string(&node),
            r#"<Chart style={{ color: "red", padding: 4, "z-index": 2 }} data={[1, 2, 3]} options={{}} flags={[false, true]} />"#
        );
    }

    #[test]
    fn tab_indentation() {
        let node = RenderedNode::new("ul")
            .child(RenderedNode::new("li").text("a"))
            .child(RenderedNode::new("li").text("b"));
        let serializer = JsxSerializer::new(SerializeOptions {
            indent: Indent::Tab,
            ..Default::default()
        });

        assert_eq!(
            serializer.serialize(&node),
            "<ul>\n\t<li>a</li>\n\t<li>b</li>\n</ul>"
        );
    }

    #[test]
    fn output_is_deterministic() {
        let node = RenderedNode::new("Select")
            .attr("value", "b")
            .attr("onChange", AttributeValue::expr("setValue"))
            .child(RenderedNode::new("Option").attr("value", "a").text("A"))
            .child(RenderedNode::new("Option").attr("value", "b").text("B"));

        assert_eq!(jsx_to_string(&node), jsx_to_string(&node.clone()));
    }

    #[test]
    fn quotes_strings_for_javascript() {
        assert_eq!(quote_string("a\"b\\c\td"), r#""a\"b\\c\td""#);
        assert_eq!(quote_string("\u{1}"), r#""\u0001""#);
    }
}
