//! Render tree model and JSX source serializer.
//!
//! This crate turns an in-memory component tree into the source code that would
//! produce it, so documentation examples can show their code next to the live preview.

pub mod node;
pub mod reader;
pub mod serializer;

pub use node::{AttributeValue, Child, RenderedNode};
pub use reader::{parse_jsx, ParseError};
pub use serializer::{jsx_to_string, Indent, JsxSerializer, SerializeOptions};
