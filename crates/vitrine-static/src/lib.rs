//! Static site generator for vitrine catalogs.
//!
//! Composes every registered component and writes one HTML page per component, a
//! category index, and the composed payloads as `catalog.json`.

pub mod assets;
pub mod builder;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, StaticBuilder};
