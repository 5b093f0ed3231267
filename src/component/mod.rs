//! Components taking part in coordination and the collaborators they share.

mod facet;
mod registry;

pub use facet::{Facet, FacetOptions, LifecycleAction};
pub use registry::ComponentRegistry;

use crate::events::EventBus;
use crate::state::QueryStateModel;

/// Everything a component needs to coordinate with the rest of the page.
///
/// Cheap to clone: every field is a shared handle.
#[derive(Clone)]
pub struct ComponentBindings {
    pub bus: EventBus,
    pub query_state_model: QueryStateModel,
    pub registry: ComponentRegistry,
}

impl ComponentBindings {
    /// Fresh bindings around `bus`; the state model notifies on it.
    pub fn new(bus: EventBus) -> Self {
        Self {
            query_state_model: QueryStateModel::new(bus.clone()),
            registry: ComponentRegistry::new(),
            bus,
        }
    }
}

impl Default for ComponentBindings {
    fn default() -> Self {
        Self::new(EventBus::new())
    }
}
