use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use crate::error::CoordinationError;
use crate::events::{EventBus, SearchEvent};

/// Prefix of facet selection attributes.
const FACET_ATTRIBUTE_PREFIX: &str = "f:";

/// Canonical state attribute holding the selected values of a facet.
pub fn facet_id(component_id: &str) -> String {
    format!("{}{}", FACET_ATTRIBUTE_PREFIX, component_id)
}

/// Entries of a selected-value collection.
///
/// Missing attributes and non-array values count as an empty selection.
pub fn selected_values_of(value: Option<&Value>) -> &[Value] {
    match value {
        Some(Value::Array(values)) => values,
        _ => &[],
    }
}

/// Thread-safe attribute store with change notification.
///
/// Locks are released before notifying, so subscribers may read or write the
/// model from inside their handlers.
#[derive(Clone)]
pub struct QueryStateModel {
    inner: Arc<RwLock<StateInner>>,
    bus: EventBus,
}

#[derive(Default)]
struct StateInner {
    attributes: HashMap<String, Value>,
    defaults: HashMap<String, Value>,
}

impl QueryStateModel {
    /// Create an empty model that notifies on `bus`.
    pub fn new(bus: EventBus) -> Self {
        Self {
            inner: Arc::new(RwLock::new(StateInner::default())),
            bus,
        }
    }

    /// Current value of `attribute`, `None` if it was never set or registered.
    pub fn get(&self, attribute: &str) -> Option<Value> {
        self.inner.read().attributes.get(attribute).cloned()
    }

    /// Write `attribute`.
    ///
    /// Emits [`SearchEvent::StateChange`] only when the stored value actually
    /// changes. Errors raised by subscribers propagate to the caller; the new
    /// value stays written.
    pub fn set(&self, attribute: &str, value: Value) -> Result<(), CoordinationError> {
        {
            let mut state = self.inner.write();
            if state.attributes.get(attribute) == Some(&value) {
                return Ok(());
            }
            state.attributes.insert(attribute.to_string(), value);
        }

        tracing::debug!(attribute = %attribute, "State attribute changed");
        self.bus.emit(&SearchEvent::StateChange {
            attribute: attribute.to_string(),
        })
    }

    /// Declare `attribute` with its default value.
    ///
    /// No-op if the attribute is already registered. Registration is silent:
    /// no change signal is emitted.
    pub fn register_new_attribute(&self, attribute: &str, default: Value) {
        let mut state = self.inner.write();
        if state.defaults.contains_key(attribute) {
            return;
        }
        state.defaults.insert(attribute.to_string(), default.clone());
        state.attributes.entry(attribute.to_string()).or_insert(default);
    }

    /// Default value `attribute` was registered with.
    pub fn default_value(&self, attribute: &str) -> Option<Value> {
        self.inner.read().defaults.get(attribute).cloned()
    }

    /// Selected values stored under `attribute`.
    pub fn selected_values(&self, attribute: &str) -> Vec<Value> {
        let state = self.inner.read();
        selected_values_of(state.attributes.get(attribute)).to_vec()
    }

    /// Whether `attribute` holds a non-empty selection.
    pub fn has_selected_values(&self, attribute: &str) -> bool {
        let state = self.inner.read();
        !selected_values_of(state.attributes.get(attribute)).is_empty()
    }
}
