use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use super::chain::check_acyclic;
use super::condition::ConditionEvaluator;
use super::state::{Availability, DependencyIntent, DependentReducer, DependentState};
use crate::component::{ComponentBindings, Facet, FacetOptions, LifecycleAction};
use crate::error::CoordinationError;
use crate::events::{SearchEvent, Subscription};
use crate::mvi::Reducer;
use crate::state::facet_id;

/// Coordinates one component with its parent and its dependents.
///
/// Created alongside the component it serves and dropped with it; dropping
/// the manager unsubscribes it from the bus. It holds only a weak handle to
/// its owner and looks the parent up by id on every evaluation.
pub struct DependsOnManager {
    inner: Arc<ManagerInner>,
    _subscription: Subscription,
}

struct ManagerInner {
    facet: Weak<dyn Facet>,
    bindings: ComponentBindings,
    state: Mutex<DependentState>,
}

impl DependsOnManager {
    /// Attach a manager to `facet` and subscribe it to page signals.
    pub fn new<F: Facet + 'static>(facet: &Arc<F>, bindings: &ComponentBindings) -> Self {
        let handle: Arc<dyn Facet> = facet.clone();
        let inner = Arc::new(ManagerInner {
            facet: Arc::downgrade(&handle),
            bindings: bindings.clone(),
            state: Mutex::new(DependentState::default()),
        });

        let subscription = {
            let inner = Arc::clone(&inner);
            bindings.bus.subscribe(move |event| inner.handle(event))
        };

        Self {
            inner,
            _subscription: subscription,
        }
    }

    /// Whether the owning component declares a parent.
    pub fn is_dependent(&self) -> bool {
        self.inner
            .options()
            .is_some_and(|options| options.depends_on.is_some())
    }

    /// Live components declaring the owning component as their parent.
    pub fn dependent_facets(&self) -> Vec<Arc<dyn Facet>> {
        match self.inner.options() {
            Some(options) => self.inner.bindings.registry.dependents_of(&options.id),
            None => Vec::new(),
        }
    }

    /// Whether at least one other live component depends on the owner.
    pub fn has_dependent_facets(&self) -> bool {
        !self.dependent_facets().is_empty()
    }

    /// Whether any dependent currently has a non-empty selection.
    ///
    /// A parent with selected dependents cannot be disabled without losing
    /// downstream state.
    pub fn dependent_facets_have_selected_values(&self) -> bool {
        let state = &self.inner.bindings.query_state_model;
        self.dependent_facets()
            .iter()
            .any(|dependent| state.has_selected_values(&facet_id(&dependent.options().id)))
    }

    /// Run the start-up evaluation for this component alone.
    ///
    /// Used when a component joins a page that is already initialized.
    pub fn initialize(&self) -> Result<(), CoordinationError> {
        self.inner.handle(&SearchEvent::AfterComponentsInitialization)
    }

    /// Last availability decided for the owning component.
    pub fn availability(&self) -> Availability {
        self.inner.state.lock().availability
    }
}

impl ManagerInner {
    fn options(&self) -> Option<FacetOptions> {
        self.facet.upgrade().map(|facet| facet.options())
    }

    fn handle(&self, event: &SearchEvent) -> Result<(), CoordinationError> {
        let Some(facet) = self.facet.upgrade() else {
            return Ok(());
        };
        let options = facet.options();
        if options.depends_on.is_none() {
            return Ok(());
        }

        // A cyclic declaration is never fulfilled, whatever the signal.
        let fulfilled = self.is_acyclic(&options) && self.evaluate(&options)?;
        let intent = match event {
            SearchEvent::AfterComponentsInitialization => DependencyIntent::Initialized { fulfilled },
            SearchEvent::StateChange { .. } => DependencyIntent::StateChanged {
                fulfilled,
                selected: self
                    .bindings
                    .query_state_model
                    .has_selected_values(&facet_id(&options.id)),
            },
            SearchEvent::QuerySuccess => DependencyIntent::QuerySucceeded { fulfilled },
        };

        // Lock is released before calling out: callbacks may mutate the state
        // model, which re-enters this handler.
        let actions = {
            let mut state = self.state.lock();
            let next = DependentReducer::reduce(std::mem::take(&mut *state), intent);
            let actions = next.actions.clone();
            *state = next;
            actions
        };

        tracing::debug!(
            facet = %options.id,
            event = %event,
            ?intent,
            ?actions,
            "Dependency re-evaluated"
        );

        for action in actions {
            run_action(facet.as_ref(), &options.id, action)?;
        }
        Ok(())
    }

    fn evaluate(&self, options: &FacetOptions) -> Result<bool, CoordinationError> {
        ConditionEvaluator::new(&self.bindings).is_fulfilled(options)
    }

    /// A cyclic declaration is logged and keeps the component disabled.
    fn is_acyclic(&self, options: &FacetOptions) -> bool {
        let registry = &self.bindings.registry;
        let result = check_acyclic(&options.id, |id| {
            if id == options.id {
                options.depends_on.clone()
            } else {
                registry.parent_of(id)
            }
        });
        match result {
            Ok(()) => true,
            Err(err) => {
                tracing::error!(facet = %options.id, error = %err, "Dependency left disabled");
                false
            }
        }
    }
}

fn run_action(
    facet: &dyn Facet,
    id: &str,
    action: LifecycleAction,
) -> Result<(), CoordinationError> {
    let result = match action {
        LifecycleAction::Enable => facet.enable(),
        LifecycleAction::Disable => facet.disable(),
        LifecycleAction::Reset => facet.reset(),
    };
    result.map_err(|source| CoordinationError::Lifecycle {
        facet: id.to_string(),
        action,
        source,
    })
}
