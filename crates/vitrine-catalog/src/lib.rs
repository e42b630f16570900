//! Component metadata, registry and example composition.
//!
//! Entries are loaded or built once, indexed in a [`Registry`], and composed into display
//! payloads whose example code comes either from authored literals or from serializing
//! each example's render tree.

pub mod composer;
pub mod loader;
pub mod model;
pub mod registry;
pub mod resolver;

pub use composer::{Composer, ComponentPage, ExampleOutcome, ExamplePayload, FailureKind};
pub use loader::{load_catalog, parse_component, FileFormat, LoadError};
pub use model::{
    Category, ComponentSpec, ComponentSpecBuilder, ExampleSpec, PropDescriptor, PropType,
    RenderError, RenderUnit, ValidationError,
};
pub use registry::{Registry, RegistryError};
pub use resolver::{ResolveError, ResolvedSource, Resolver, SourceOrigin};
