//! Component registry.
//!
//! Indexes component entries by id, keeping registration order. The registry is populated
//! once at startup and only read afterwards, so a populated registry can be shared behind
//! an `Arc` without locking.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::model::{Category, ComponentSpec};

/// A registry of component entries.
#[derive(Debug, Default)]
pub struct Registry {
    /// Entries by id, in registration order
    components: IndexMap<String, ComponentSpec>,
}

impl Registry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one entry. Fails without inserting if the id is taken.
    pub fn register(&mut self, spec: ComponentSpec) -> Result<(), RegistryError> {
        if self.components.contains_key(spec.id()) {
            return Err(RegistryError::DuplicateId(spec.id().to_string()));
        }

        tracing::debug!("Registered component {}", spec.id());
        self.components.insert(spec.id().to_string(), spec);
        Ok(())
    }

    /// Insert a batch of entries. Either every entry is inserted or none is.
    pub fn register_all(
        &mut self,
        specs: impl IntoIterator<Item = ComponentSpec>,
    ) -> Result<usize, RegistryError> {
        let specs: Vec<ComponentSpec> = specs.into_iter().collect();

        let mut seen = HashSet::new();
        for spec in &specs {
            if self.components.contains_key(spec.id()) || !seen.insert(spec.id()) {
                return Err(RegistryError::DuplicateId(spec.id().to_string()));
            }
        }

        let count = specs.len();
        for spec in specs {
            self.components.insert(spec.id().to_string(), spec);
        }

        tracing::debug!("Registered {} components", count);
        Ok(count)
    }

    /// Look up an entry by id.
    pub fn get(&self, id: &str) -> Result<&ComponentSpec, RegistryError> {
        self.components
            .get(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    /// Check if an entry exists.
    pub fn contains(&self, id: &str) -> bool {
        self.components.contains_key(id)
    }

    /// Entries in one category, in registration order.
    pub fn list_by_category(&self, category: Category) -> Vec<&ComponentSpec> {
        self.components
            .values()
            .filter(|spec| spec.category() == category)
            .collect()
    }

    /// Every entry, in registration order.
    pub fn all(&self) -> Vec<&ComponentSpec> {
        self.components.values().collect()
    }

    /// Entry counts per non-empty category, in [`Category::ALL`] order.
    pub fn categories(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .into_iter()
            .map(|category| {
                let count = self
                    .components
                    .values()
                    .filter(|spec| spec.category() == category)
                    .count();
                (category, count)
            })
            .filter(|(_, count)| *count > 0)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// Errors that can occur with the registry.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum RegistryError {
    #[error("Component id already registered: {0}")]
    DuplicateId(String),

    #[error("Component not found: {0}")]
    NotFound(String),
}
