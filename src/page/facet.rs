use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::{json, Value};

use crate::component::{Facet, FacetOptions};
use crate::depends_on::FulfillmentCondition;
use crate::error::CoordinationError;
use crate::state::{facet_id, QueryStateModel};

/// Headless facet built from configuration.
///
/// Keeps its selection in the shared state model under `f:<id>` and tracks
/// whether it is enabled. `reset` clears the selection and disables.
pub struct ConfiguredFacet {
    options: RwLock<FacetOptions>,
    state: QueryStateModel,
    enabled: AtomicBool,
}

impl ConfiguredFacet {
    /// Create the facet and register its state attribute with `initial`
    /// selected values.
    pub fn new(options: FacetOptions, state: QueryStateModel, initial: Vec<String>) -> Arc<Self> {
        state.register_new_attribute(&facet_id(&options.id), json!(initial));
        Arc::new(Self {
            options: RwLock::new(options),
            state,
            enabled: AtomicBool::new(true),
        })
    }

    pub fn id(&self) -> String {
        self.options.read().id.clone()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Replace the dependency condition; used from the next evaluation on.
    pub fn set_condition(&self, condition: FulfillmentCondition) {
        self.options.write().depends_on_condition = condition;
    }

    /// Replace the selection, notifying every coordinated component.
    pub fn select<I, S>(&self, values: I) -> Result<(), CoordinationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<Value> = values.into_iter().map(|v| Value::String(v.into())).collect();
        self.state.set(&self.attribute(), Value::Array(values))
    }

    pub fn selected_values(&self) -> Vec<Value> {
        self.state.selected_values(&self.attribute())
    }

    fn attribute(&self) -> String {
        facet_id(&self.options.read().id)
    }
}

impl Facet for ConfiguredFacet {
    fn options(&self) -> FacetOptions {
        self.options.read().clone()
    }

    fn enable(&self) -> anyhow::Result<()> {
        if !self.enabled.swap(true, Ordering::SeqCst) {
            tracing::debug!(facet = %self.id(), "Facet enabled");
        }
        Ok(())
    }

    fn disable(&self) -> anyhow::Result<()> {
        if self.enabled.swap(false, Ordering::SeqCst) {
            tracing::debug!(facet = %self.id(), "Facet disabled");
        }
        Ok(())
    }

    fn reset(&self) -> anyhow::Result<()> {
        tracing::debug!(facet = %self.id(), "Facet reset");
        self.state.set(&self.attribute(), json!([]))?;
        self.disable()
    }
}
