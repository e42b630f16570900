//! JSX reader for serializer output.
//!
//! Parses markup like `<Button variant="default">Click me</Button>` back into a
//! [`RenderedNode`]. It covers the dialect the serializer writes: quoted, bare and braced
//! attributes, nested markup and composite literals inside braces, `{"..."}` text
//! expressions, and JSX whitespace handling and character references in text runs.

use indexmap::IndexMap;
use serde_json::Number;

use crate::node::{AttributeValue, Child, RenderedNode};

/// Errors that can occur when reading markup.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ParseError {
    #[error("Unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: &'static str },

    #[error("Unexpected '{found}' at offset {offset}, expected {expected}")]
    Unexpected {
        found: char,
        offset: usize,
        expected: &'static str,
    },

    #[error("Closing tag </{found}> does not match <{expected}>")]
    MismatchedClosingTag { expected: String, found: String },

    #[error("Unsupported expression child at offset {0}")]
    UnsupportedChild(usize),

    #[error("Trailing content at offset {0}")]
    TrailingContent(usize),
}

/// Parse a single root element.
pub fn parse_jsx(source: &str) -> Result<RenderedNode, ParseError> {
    let mut cursor = Cursor::new(source);
    cursor.skip_whitespace();
    let node = cursor.element()?;
    cursor.skip_whitespace();
    if !cursor.at_end() {
        return Err(ParseError::TrailingContent(cursor.pos));
    }
    Ok(node)
}

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        let src = self.src;
        &src[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.src.len() - trimmed.len();
    }

    fn expect(&mut self, want: char, expected: &'static str) -> Result<(), ParseError> {
        match self.peek() {
            Some(c) if c == want => {
                self.pos += c.len_utf8();
                Ok(())
            }
            Some(found) => Err(ParseError::Unexpected {
                found,
                offset: self.pos,
                expected,
            }),
            None => Err(ParseError::UnexpectedEnd { expected }),
        }
    }

    fn unexpected(&self, expected: &'static str) -> ParseError {
        match self.peek() {
            Some(found) => ParseError::Unexpected {
                found,
                offset: self.pos,
                expected,
            },
            None => ParseError::UnexpectedEnd { expected },
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        let src = self.src;
        &src[start..self.pos]
    }

    fn name(&mut self, expected: &'static str) -> Result<&'a str, ParseError> {
        let name = self
            .take_while(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':' | '$'));
        if name.is_empty() {
            return Err(self.unexpected(expected));
        }
        Ok(name)
    }

    fn element(&mut self) -> Result<RenderedNode, ParseError> {
        self.expect('<', "'<'")?;
        let mut node = RenderedNode::new(self.name("tag name")?);

        loop {
            self.skip_whitespace();
            if self.rest().starts_with("/>") {
                self.pos += 2;
                return Ok(node);
            }
            if self.peek() == Some('>') {
                self.pos += 1;
                break;
            }
            let name = self.name("attribute name")?.to_string();
            self.skip_whitespace();
            let value = if self.peek() == Some('=') {
                self.pos += 1;
                self.skip_whitespace();
                self.attribute_value()?
            } else {
                AttributeValue::Bool(true)
            };
            node.attributes.insert(name, value);
        }

        self.children(&mut node)?;
        Ok(node)
    }

    fn attribute_value(&mut self) -> Result<AttributeValue, ParseError> {
        match self.peek() {
            Some('"') | Some('\'') => {
                let quote = self.bump().unwrap_or('"');
                let Some(end) = self.rest().find(quote) else {
                    return Err(ParseError::UnexpectedEnd {
                        expected: "closing quote",
                    });
                };
                let raw = &self.rest()[..end];
                self.pos += end + 1;
                Ok(AttributeValue::String(decode_entities(raw)))
            }
            Some('{') => {
                self.pos += 1;
                self.braced_value()
            }
            _ => Err(self.unexpected("attribute value")),
        }
    }

    /// Parse the inside of `{...}` after the opening brace.
    fn braced_value(&mut self) -> Result<AttributeValue, ParseError> {
        self.skip_whitespace();
        let start = self.pos;

        if let Some(value) = self.literal()? {
            self.skip_whitespace();
            if self.peek() == Some('}') {
                self.pos += 1;
                return Ok(value);
            }
        }

        // Not a literal: keep the expression text verbatim.
        self.pos = start;
        let raw = self.balanced_expression()?;
        Ok(AttributeValue::Expression(raw.trim().to_string()))
    }

    /// Try to parse a literal value. Returns `None` if the input is not a literal.
    fn literal(&mut self) -> Result<Option<AttributeValue>, ParseError> {
        match self.peek() {
            Some('<') => Ok(Some(AttributeValue::from(self.element()?))),
            Some('"') => Ok(self.js_string().map(AttributeValue::String)),
            Some('[') => {
                self.pos += 1;
                let mut values = Vec::new();
                loop {
                    self.skip_whitespace();
                    if self.peek() == Some(']') {
                        self.pos += 1;
                        return Ok(Some(AttributeValue::List(values)));
                    }
                    let Some(value) = self.literal()? else {
                        return Ok(None);
                    };
                    values.push(value);
                    self.skip_whitespace();
                    if self.peek() == Some(',') {
                        self.pos += 1;
                    } else if self.peek() != Some(']') {
                        return Ok(None);
                    }
                }
            }
            Some('{') => {
                self.pos += 1;
                let mut entries = IndexMap::new();
                loop {
                    self.skip_whitespace();
                    if self.peek() == Some('}') {
                        self.pos += 1;
                        return Ok(Some(AttributeValue::Object(entries)));
                    }
                    let key = if self.peek() == Some('"') {
                        match self.js_string() {
                            Some(key) => key,
                            None => return Ok(None),
                        }
                    } else {
                        let key = self.take_while(|c| c.is_alphanumeric() || c == '_' || c == '$');
                        if key.is_empty() {
                            return Ok(None);
                        }
                        key.to_string()
                    };
                    self.skip_whitespace();
                    if self.peek() != Some(':') {
                        return Ok(None);
                    }
                    self.pos += 1;
                    self.skip_whitespace();
                    let Some(value) = self.literal()? else {
                        return Ok(None);
                    };
                    entries.insert(key, value);
                    self.skip_whitespace();
                    if self.peek() == Some(',') {
                        self.pos += 1;
                    } else if self.peek() != Some('}') {
                        return Ok(None);
                    }
                }
            }
            Some(c) if c == '-' || c.is_ascii_digit() => {
                let raw = self
                    .take_while(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E'));
                Ok(parse_number(raw).map(AttributeValue::Number))
            }
            Some(c) if c.is_alphabetic() => {
                let word = self.take_while(|c| c.is_alphanumeric() || c == '_' || c == '$');
                Ok(match word {
                    "true" => Some(AttributeValue::Bool(true)),
                    "false" => Some(AttributeValue::Bool(false)),
                    _ => None,
                })
            }
            _ => Ok(None),
        }
    }

    /// Parse a double-quoted JavaScript string literal.
    fn js_string(&mut self) -> Option<String> {
        if self.bump()? != '"' {
            return None;
        }
        let mut out = String::new();
        loop {
            match self.bump()? {
                '"' => return Some(out),
                '\\' => match self.bump()? {
                    'n' => out.push('\n'),
                    'r' => out.push('\r'),
                    't' => out.push('\t'),
                    'u' => {
                        let hex = self.rest().get(..4)?;
                        let code = u32::from_str_radix(hex, 16).ok()?;
                        out.push(char::from_u32(code)?);
                        self.pos += 4;
                    }
                    other => out.push(other),
                },
                c => out.push(c),
            }
        }
    }

    /// Consume an expression up to its matching `}`, returning the text before it.
    fn balanced_expression(&mut self) -> Result<&'a str, ParseError> {
        let start = self.pos;
        let mut depth = 0usize;
        while let Some(c) = self.bump() {
            match c {
                '"' | '\'' | '`' => {
                    while let Some(inner) = self.bump() {
                        if inner == '\\' {
                            self.bump();
                        } else if inner == c {
                            break;
                        }
                    }
                }
                '{' | '(' | '[' => depth += 1,
                ')' | ']' => depth = depth.saturating_sub(1),
                '}' if depth == 0 => {
                    let src = self.src;
                    return Ok(&src[start..self.pos - 1]);
                }
                '}' => depth -= 1,
                _ => {}
            }
        }
        Err(ParseError::UnexpectedEnd {
            expected: "closing '}'",
        })
    }

    fn children(&mut self, node: &mut RenderedNode) -> Result<(), ParseError> {
        loop {
            if self.rest().starts_with("</") {
                self.pos += 2;
                self.skip_whitespace();
                let found = self.name("closing tag name")?;
                if found != node.tag {
                    return Err(ParseError::MismatchedClosingTag {
                        expected: node.tag.clone(),
                        found: found.to_string(),
                    });
                }
                self.skip_whitespace();
                self.expect('>', "'>'")?;
                return Ok(());
            }

            match self.peek() {
                None => {
                    return Err(ParseError::UnexpectedEnd {
                        expected: "closing tag",
                    })
                }
                Some('<') => {
                    let child = self.element()?;
                    node.children.push(Child::Node(child));
                }
                Some('{') => {
                    self.pos += 1;
                    self.skip_whitespace();
                    let offset = self.pos;
                    if self.peek() == Some('}') {
                        self.pos += 1;
                        continue;
                    }
                    let text = self
                        .js_string()
                        .ok_or(ParseError::UnsupportedChild(offset))?;
                    self.skip_whitespace();
                    self.expect('}', "'}'")?;
                    node.children.push(Child::Text(text));
                }
                Some(_) => {
                    let raw = self.take_while(|c| c != '<' && c != '{');
                    if let Some(text) = collapse_jsx_text(raw) {
                        node.children.push(Child::Text(decode_entities(&text)));
                    }
                }
            }
        }
    }
}

/// Apply the JSX whitespace rule to a raw text run.
///
/// Lines are trimmed at their inner edges (leading whitespace except on the first line,
/// trailing whitespace except on the last), whitespace-only lines are dropped and the
/// rest are joined with a single space.
fn collapse_jsx_text(raw: &str) -> Option<String> {
    let lines: Vec<&str> = raw.split('\n').map(|l| l.trim_end_matches('\r')).collect();
    let last = lines.len() - 1;

    let parts: Vec<&str> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let mut line = *line;
            if i != 0 {
                line = line.trim_start();
            }
            if i != last {
                line = line.trim_end();
            }
            line
        })
        .filter(|line| !line.trim().is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// Decode the character references the serializer writes in quoted attributes.
fn decode_entities(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(idx) = rest.find('&') {
        out.push_str(&rest[..idx]);
        rest = &rest[idx..];
        match rest.find(';').and_then(|end| Some((end, decode_reference(&rest[1..end])?))) {
            Some((end, c)) => {
                out.push(c);
                rest = &rest[end + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Decode the body of a character reference (`amp`, `#169`, `#xA9`).
fn decode_reference(body: &str) -> Option<char> {
    if let Some(num) = body.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }

    let c = match body {
        "quot" => '"',
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "copy" => '\u{a9}',
        "reg" => '\u{ae}',
        "trade" => '\u{2122}',
        "hellip" => '\u{2026}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "middot" => '\u{b7}',
        "times" => '\u{d7}',
        _ => return None,
    };
    Some(c)
}

fn parse_number(raw: &str) -> Option<Number> {
    if let Ok(n) = raw.parse::<u64>() {
        return Some(Number::from(n));
    }
    if let Ok(n) = raw.parse::<i64>() {
        return Some(Number::from(n));
    }
    raw.parse::<f64>().ok().and_then(Number::from_f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serializer::jsx_to_string;

    fn round_trip(node: &RenderedNode) {
        let source = jsx_to_string(node);
        let parsed = parse_jsx(&source).unwrap_or_else(|e| panic!("{e}\n{source}"));
        assert_eq!(&parsed, node, "round trip of:\n{source}");
    }

    #[test]
    fn parses_self_closing() {
        let node = parse_jsx(r#"<Icon name="star" />"#).unwrap();

        assert_eq!(node, RenderedNode::new("Icon").attr("name", "star"));
    }

    #[test]
    fn parses_with_children() {
        let node = parse_jsx(r#"<Button variant="default">Click me</Button>"#).unwrap();

        assert_eq!(
            node,
            RenderedNode::new("Button")
                .attr("variant", "default")
                .text("Click me")
        );
    }

    #[test]
    fn parses_boolean_and_expression_props() {
        let node = parse_jsx(r#"<Button disabled onClick={() => save({ id: 1 })}>Go</Button>"#)
            .unwrap();

        assert_eq!(node.attributes["disabled"], AttributeValue::Bool(true));
        assert_eq!(
            node.attributes["onClick"],
            AttributeValue::expr("() => save({ id: 1 })")
        );
    }

    #[test]
    fn applies_jsx_whitespace_rules() {
        let node = parse_jsx("<p>\n  Hello\n  world\n</p>").unwrap();

        assert_eq!(node.children, vec![Child::Text("Hello world".to_string())]);
    }

    #[test]
    fn rejects_mismatched_closing_tag() {
        let result = parse_jsx("<Card><Title>x</Card>");

        assert!(matches!(
            result,
            Err(ParseError::MismatchedClosingTag { .. })
        ));
    }

    #[test]
    fn rejects_trailing_content() {
        assert!(matches!(
            parse_jsx("<br /><br />"),
            Err(ParseError::TrailingContent(_))
        ));
    }

    #[test]
    fn rejects_unclosed_element() {
        assert!(matches!(
            parse_jsx("<div>open"),
            Err(ParseError::UnexpectedEnd { .. })
        ));
    }

    #[test]
    fn round_trips_simple_trees() {
        round_trip(&RenderedNode::new("Heading").attr("level", 1).text("Page Title"));
        round_trip(
            &RenderedNode::new("Loader")
                .attr("size", "xs")
                .attr("aria-label", "Loading"),
        );
    }

    #[test]
    fn round_trips_escaped_content() {
        round_trip(
            &RenderedNode::new("Tooltip")
                .attr("label", "Say \"hi\" & &amp; bye")
                .text("a < b && c > {d}"),
        );
        round_trip(&RenderedNode::new("Kbd").text("Tom &amp; Jerry"));
        round_trip(&RenderedNode::new("small").text("&copy; 2024 & beyond"));
        round_trip(&RenderedNode::new("pre").text("  indented\n\ttabbed\n"));
    }

    #[test]
    fn round_trips_nested_mixed_content() {
        round_trip(
            &RenderedNode::new("Alert")
                .attr("variant", "destructive")
                .attr("onClose", AttributeValue::expr("() => setOpen(false)"))
                .attr("icon", RenderedNode::new("Icon").attr("name", "x"))
                .child(RenderedNode::new("AlertTitle").text("Error"))
                .text("Your session")
                .text(" has expired.")
                .child(
                    RenderedNode::new("div")
                        .child(RenderedNode::new("Button").attr("size", "sm").text("Log in"))
                        .child(RenderedNode::new("hr")),
                ),
        );
    }

    #[test]
    fn round_trips_composite_values() {
        round_trip(
            &RenderedNode::new("BarChart")
                .attr(
                    "data",
                    AttributeValue::list([
                        AttributeValue::object([
                            ("month", AttributeValue::from("Jan")),
                            ("sales", AttributeValue::from(120)),
                        ]),
                        AttributeValue::object([
                            ("month", AttributeValue::from("Feb")),
                            ("sales", AttributeValue::from(98.5)),
                        ]),
                    ]),
                )
                .attr("stacked", true)
                .attr(
                    "tooltip",
                    RenderedNode::new("ChartTooltip").child(RenderedNode::new("Legend")),
                ),
        );
    }

    #[test]
    fn decodes_entities_in_single_pass() {
        assert_eq!(decode_entities("&amp;quot;"), "&quot;");
        assert_eq!(decode_entities("a & b"), "a & b");
        assert_eq!(decode_entities("&quot;x&quot;"), "\"x\"");
    }

    #[test]
    fn decodes_character_references_in_text() {
        let node = parse_jsx("<p>Tom &amp; Jerry &copy; &#169; &#xA9; a & b</p>").unwrap();

        assert_eq!(
            node,
            RenderedNode::new("p").text("Tom & Jerry \u{a9} \u{a9} \u{a9} a & b")
        );
    }

    #[test]
    fn leaves_unknown_references_alone() {
        assert_eq!(decode_entities("&bogus; &#xZZ; &"), "&bogus; &#xZZ; &");
    }
}
