//! Example source resolution.
//!
//! An authored literal is returned unchanged. Otherwise the example's render unit is
//! invoked and its tree serialized.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde::Serialize;
use vitrine_jsx::{JsxSerializer, RenderedNode, SerializeOptions};

use crate::model::{ExampleSpec, RenderUnit};

/// Where resolved code came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceOrigin {
    /// Literal written by the example author
    Authored,
    /// Serialized from the render unit's tree
    Generated,
}

/// Code for one example.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSource {
    pub code: String,
    pub origin: SourceOrigin,
}

/// Errors that can occur when resolving an example.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ResolveError {
    #[error("Example {example} has neither source text nor a render unit")]
    Unresolvable { example: String },

    #[error("Example {example} failed to render: {message}")]
    RenderFailure { example: String, message: String },
}

/// Resolves examples to source text.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    serializer: JsxSerializer,
}

impl Resolver {
    /// Create a resolver serializing with the given options.
    pub fn new(options: SerializeOptions) -> Self {
        Self {
            serializer: JsxSerializer::new(options),
        }
    }

    /// Resolve one example.
    pub fn resolve(&self, example: &ExampleSpec) -> Result<ResolvedSource, ResolveError> {
        if let Some(source) = example.source() {
            return Ok(ResolvedSource {
                code: source.to_string(),
                origin: SourceOrigin::Authored,
            });
        }

        let Some(unit) = example.render_unit() else {
            return Err(ResolveError::Unresolvable {
                example: example.id().to_string(),
            });
        };

        let node = invoke(unit).map_err(|message| ResolveError::RenderFailure {
            example: example.id().to_string(),
            message,
        })?;

        Ok(ResolvedSource {
            code: self.serializer.serialize(&node),
            origin: SourceOrigin::Generated,
        })
    }
}

/// Run a render unit, turning both returned errors and panics into a message.
fn invoke(unit: &RenderUnit) -> Result<RenderedNode, String> {
    match panic::catch_unwind(AssertUnwindSafe(|| unit.render())) {
        Ok(Ok(node)) => Ok(node),
        Ok(Err(e)) => Err(e.to_string()),
        Err(payload) => Err(panic_message(&*payload)),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("render unit panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("render unit panicked: {}", s)
    } else {
        "render unit panicked".to_string()
    }
}
