//! Shared test utilities: spy facets and a parent/dependent harness.

#![allow(dead_code, unused_imports)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use dependson::component::{ComponentBindings, Facet, FacetOptions, LifecycleAction};
use dependson::depends_on::{DependsOnManager, FulfillmentCondition};
use dependson::events::SearchEvent;
use dependson::state::facet_id;
use dependson::CoordinationError;
use parking_lot::{Mutex, RwLock};
use serde_json::{json, Value};

/// Facet that records lifecycle calls instead of rendering anything.
///
/// `reset` only counts, it does not touch the state model.
pub struct SpyFacet {
    options: RwLock<FacetOptions>,
    enabled: AtomicBool,
    enable_calls: AtomicUsize,
    disable_calls: AtomicUsize,
    reset_calls: AtomicUsize,
    fail_on: Mutex<Option<LifecycleAction>>,
}

impl SpyFacet {
    pub fn new(id: &str, depends_on: Option<&str>) -> Arc<Self> {
        let mut options = FacetOptions::new(id);
        options.depends_on = depends_on.map(str::to_string);
        Arc::new(Self {
            options: RwLock::new(options),
            enabled: AtomicBool::new(true),
            enable_calls: AtomicUsize::new(0),
            disable_calls: AtomicUsize::new(0),
            reset_calls: AtomicUsize::new(0),
            fail_on: Mutex::new(None),
        })
    }

    pub fn set_condition(&self, condition: FulfillmentCondition) {
        self.options.write().depends_on_condition = condition;
    }

    pub fn set_depends_on(&self, parent: Option<&str>) {
        self.options.write().depends_on = parent.map(str::to_string);
    }

    /// Make the given lifecycle call fail from now on.
    pub fn fail_on(&self, action: LifecycleAction) {
        *self.fail_on.lock() = Some(action);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn enables(&self) -> usize {
        self.enable_calls.load(Ordering::SeqCst)
    }

    pub fn disables(&self) -> usize {
        self.disable_calls.load(Ordering::SeqCst)
    }

    pub fn resets(&self) -> usize {
        self.reset_calls.load(Ordering::SeqCst)
    }

    fn check(&self, action: LifecycleAction) -> anyhow::Result<()> {
        if *self.fail_on.lock() == Some(action) {
            anyhow::bail!("{} is broken", action);
        }
        Ok(())
    }
}

impl Facet for SpyFacet {
    fn options(&self) -> FacetOptions {
        self.options.read().clone()
    }

    fn enable(&self) -> anyhow::Result<()> {
        self.enable_calls.fetch_add(1, Ordering::SeqCst);
        self.check(LifecycleAction::Enable)?;
        self.enabled.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn disable(&self) -> anyhow::Result<()> {
        self.disable_calls.fetch_add(1, Ordering::SeqCst);
        self.check(LifecycleAction::Disable)?;
        self.enabled.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn reset(&self) -> anyhow::Result<()> {
        self.reset_calls.fetch_add(1, Ordering::SeqCst);
        self.check(LifecycleAction::Reset)
    }
}

pub struct Mock {
    pub facet: Arc<SpyFacet>,
    pub manager: DependsOnManager,
}

/// Register a spy facet and attach its manager.
pub fn create_mock(bindings: &ComponentBindings, id: &str, depends_on: Option<&str>) -> Mock {
    let facet = SpyFacet::new(id, depends_on);
    bindings
        .registry
        .register(facet.clone())
        .expect("Failed to register mock facet");
    let manager = DependsOnManager::new(&facet, bindings);
    Mock { facet, manager }
}

/// `@parent` and `@dependent` (depending on `@parent`), initialized.
pub struct Harness {
    pub bindings: ComponentBindings,
    pub parent: Mock,
    pub dependent: Mock,
}

impl Harness {
    pub fn new() -> Self {
        let bindings = ComponentBindings::default();
        let parent = create_mock(&bindings, "@parent", None);
        let dependent = create_mock(&bindings, "@dependent", Some("@parent"));
        bindings
            .bus
            .emit(&SearchEvent::AfterComponentsInitialization)
            .expect("Initialization failed");
        Self {
            bindings,
            parent,
            dependent,
        }
    }

    pub fn parent_state_attribute(&self) -> String {
        facet_id("@parent")
    }

    pub fn dependent_state_attribute(&self) -> String {
        facet_id("@dependent")
    }

    /// Fulfilled when the parent selection contains "the right value".
    pub fn assign_custom_condition(&self) {
        self.dependent
            .facet
            .set_condition(FulfillmentCondition::custom(|parent| {
                let current = parent.state().get(&facet_id(parent.id()));
                Ok(current
                    .as_ref()
                    .and_then(Value::as_array)
                    .is_some_and(|values| values.contains(&json!("the right value"))))
            }));
        self.bindings
            .query_state_model
            .register_new_attribute(&self.parent_state_attribute(), json!(["some other value"]));
    }

    pub fn fulfill_custom_condition(&self) {
        self.bindings
            .query_state_model
            .set(
                &self.parent_state_attribute(),
                json!(["some other value", "the right value"]),
            )
            .expect("State change failed");
    }

    pub fn trigger_query_success(&self) -> Result<(), CoordinationError> {
        self.bindings.bus.emit(&SearchEvent::QuerySuccess)
    }

    pub fn trigger_state_change(&self) -> Result<(), CoordinationError> {
        self.bindings.bus.emit(&SearchEvent::StateChange {
            attribute: self.parent_state_attribute(),
        })
    }
}
