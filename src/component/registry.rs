//! Registry of live components.
//!
//! Dependency edges are never stored: they are derived from each component's
//! own `depends_on` against a snapshot of this registry.

use std::sync::Arc;

use parking_lot::RwLock;

use super::facet::Facet;
use crate::depends_on::chain::check_acyclic;
use crate::error::CoordinationError;

/// Thread-safe, ordered list of live components.
#[derive(Clone, Default)]
pub struct ComponentRegistry {
    inner: Arc<RwLock<Vec<Arc<dyn Facet>>>>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component.
    ///
    /// # Errors
    /// Rejects an id that is already registered and a declaration that would
    /// close a dependency cycle. The registry is unchanged on error.
    pub fn register(&self, facet: Arc<dyn Facet>) -> Result<(), CoordinationError> {
        let options = facet.options();
        let declared: Vec<(String, Option<String>)> = self
            .all_facets()
            .iter()
            .map(|f| {
                let o = f.options();
                (o.id, o.depends_on)
            })
            .collect();

        if declared.iter().any(|(id, _)| *id == options.id) {
            return Err(CoordinationError::DuplicateComponent { id: options.id });
        }

        check_acyclic(&options.id, |id| {
            if id == options.id {
                return options.depends_on.clone();
            }
            declared
                .iter()
                .find(|(candidate, _)| candidate == id)
                .and_then(|(_, parent)| parent.clone())
        })?;

        tracing::debug!(
            id = %options.id,
            depends_on = ?options.depends_on,
            "Component registered"
        );
        self.inner.write().push(facet);
        Ok(())
    }

    /// Remove the component with `id`, returning it if it was registered.
    pub fn unregister(&self, id: &str) -> Option<Arc<dyn Facet>> {
        let mut facets = self.inner.write();
        let index = facets.iter().position(|f| f.options().id == id)?;
        tracing::debug!(id = %id, "Component unregistered");
        Some(facets.remove(index))
    }

    /// Snapshot of all live components in registration order.
    pub fn all_facets(&self) -> Vec<Arc<dyn Facet>> {
        self.inner.read().clone()
    }

    /// Look up a live component by id.
    pub fn find(&self, id: &str) -> Option<Arc<dyn Facet>> {
        self.inner
            .read()
            .iter()
            .find(|f| f.options().id == id)
            .cloned()
    }

    /// Live components declaring `parent_id` as their parent.
    pub fn dependents_of(&self, parent_id: &str) -> Vec<Arc<dyn Facet>> {
        self.inner
            .read()
            .iter()
            .filter(|f| {
                let options = f.options();
                options.id != parent_id && options.depends_on.as_deref() == Some(parent_id)
            })
            .cloned()
            .collect()
    }

    /// Parent id declared by component `id`, if both exist.
    pub fn parent_of(&self, id: &str) -> Option<String> {
        self.find(id).and_then(|f| f.options().depends_on)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}
