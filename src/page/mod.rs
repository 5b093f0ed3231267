//! Assembly of a coordinated page from configuration.

mod facet;

pub use facet::ConfiguredFacet;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::component::{ComponentBindings, Facet};
use crate::config::PageConfig;
use crate::depends_on::DependsOnManager;
use crate::error::CoordinationError;
use crate::events::{EventBus, SearchEvent};

struct Member {
    facet: Arc<ConfiguredFacet>,
    manager: DependsOnManager,
}

/// A set of facets sharing one state model, registry and bus.
pub struct Page {
    bindings: ComponentBindings,
    members: Vec<Member>,
    initialized: AtomicBool,
}

impl Page {
    /// Build every configured facet, register it and attach its manager.
    ///
    /// # Errors
    /// Fails on duplicate ids and dependency cycles.
    pub fn from_config(config: &PageConfig) -> Result<Self, CoordinationError> {
        let bus = EventBus::with_max_depth(config.coordination.max_dispatch_depth);
        let mut page = Self {
            bindings: ComponentBindings::new(bus),
            members: Vec::new(),
            initialized: AtomicBool::new(false),
        };

        for facet_config in &config.facets {
            let facet = ConfiguredFacet::new(
                facet_config.to_options(),
                page.bindings.query_state_model.clone(),
                facet_config.selected.clone(),
            );
            page.add(facet)?;
        }

        tracing::info!(facets = page.members.len(), "Page assembled");
        Ok(page)
    }

    /// Register `facet` and attach a manager to it.
    ///
    /// A facet joining an initialized page gets its start-up evaluation
    /// immediately.
    pub fn add(&mut self, facet: Arc<ConfiguredFacet>) -> Result<(), CoordinationError> {
        self.bindings.registry.register(facet.clone())?;
        let manager = DependsOnManager::new(&facet, &self.bindings);
        if self.initialized.load(Ordering::SeqCst) {
            if let Err(err) = manager.initialize() {
                self.bindings.registry.unregister(&facet.id());
                return Err(err);
            }
        }
        self.members.push(Member { facet, manager });
        Ok(())
    }

    /// Tear a facet down: unregister it and drop its manager.
    pub fn remove(&mut self, id: &str) -> Option<Arc<ConfiguredFacet>> {
        let index = self.members.iter().position(|m| m.facet.id() == id)?;
        self.bindings.registry.unregister(id);
        let member = self.members.remove(index);
        Some(member.facet)
    }

    /// Signal that every component has been constructed.
    pub fn initialize(&self) -> Result<(), CoordinationError> {
        self.initialized.store(true, Ordering::SeqCst);
        self.bindings
            .bus
            .emit(&SearchEvent::AfterComponentsInitialization)
    }

    /// Signal that a query completed.
    pub fn execute_query(&self) -> Result<(), CoordinationError> {
        self.bindings.bus.emit(&SearchEvent::QuerySuccess)
    }

    /// Replace the selection of facet `id`.
    pub fn select<I, S>(&self, id: &str, values: I) -> Result<(), CoordinationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let facet = self
            .facet(id)
            .ok_or_else(|| CoordinationError::UnknownComponent { id: id.to_string() })?;
        facet.select(values)
    }

    pub fn facet(&self, id: &str) -> Option<&Arc<ConfiguredFacet>> {
        self.members
            .iter()
            .find(|m| m.facet.id() == id)
            .map(|m| &m.facet)
    }

    pub fn manager(&self, id: &str) -> Option<&DependsOnManager> {
        self.members
            .iter()
            .find(|m| m.facet.id() == id)
            .map(|m| &m.manager)
    }

    /// Facets in construction order.
    pub fn facets(&self) -> impl Iterator<Item = &Arc<ConfiguredFacet>> {
        self.members.iter().map(|m| &m.facet)
    }

    pub fn bindings(&self) -> &ComponentBindings {
        &self.bindings
    }

    /// Ids of facets without a live parent, for printing the dependency
    /// forest.
    pub fn roots(&self) -> Vec<String> {
        let registry = &self.bindings.registry;
        self.members
            .iter()
            .map(|m| m.facet.options())
            .filter(|options| match options.depends_on.as_deref() {
                Some(parent) => registry.find(parent).is_none(),
                None => true,
            })
            .map(|options| options.id)
            .collect()
    }
}
