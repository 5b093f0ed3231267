use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::component::{ComponentBindings, FacetOptions};
use crate::error::CoordinationError;
use crate::state::{facet_id, QueryStateModel};

/// User-supplied predicate over the parent's state.
pub type ConditionFn = Arc<dyn Fn(&ParentView<'_>) -> anyhow::Result<bool> + Send + Sync>;

/// Strategy deciding whether a dependency is fulfilled.
#[derive(Clone, Default)]
pub enum FulfillmentCondition {
    /// The parent has at least one selected value.
    #[default]
    SelectedValues,
    /// An arbitrary predicate over the parent's state.
    Custom(ConditionFn),
}

impl FulfillmentCondition {
    pub fn custom<F>(predicate: F) -> Self
    where
        F: Fn(&ParentView<'_>) -> anyhow::Result<bool> + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(predicate))
    }

    /// Fulfilled when the parent selection contains any of `values`.
    pub fn any_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let wanted: Vec<String> = values.into_iter().map(Into::into).collect();
        Self::custom(move |parent| {
            Ok(wanted.iter().any(|value| parent.has_selected_value(value)))
        })
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl fmt::Debug for FulfillmentCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelectedValues => f.write_str("SelectedValues"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Read-only view of a parent component handed to custom conditions.
pub struct ParentView<'a> {
    options: &'a FacetOptions,
    state: &'a QueryStateModel,
}

impl<'a> ParentView<'a> {
    pub fn new(options: &'a FacetOptions, state: &'a QueryStateModel) -> Self {
        Self { options, state }
    }

    pub fn id(&self) -> &str {
        &self.options.id
    }

    pub fn options(&self) -> &FacetOptions {
        self.options
    }

    /// The whole shared state, for conditions looking past the parent.
    pub fn state(&self) -> &QueryStateModel {
        self.state
    }

    /// Canonical attribute holding the parent's selection.
    pub fn attribute(&self) -> String {
        facet_id(&self.options.id)
    }

    pub fn selected_values(&self) -> Vec<Value> {
        self.state.selected_values(&self.attribute())
    }

    /// Whether the parent selection contains the string `value`.
    pub fn has_selected_value(&self, value: &str) -> bool {
        self.selected_values()
            .iter()
            .any(|selected| selected.as_str() == Some(value))
    }
}

/// Resolves parents through the registry and applies the declared condition.
pub struct ConditionEvaluator<'a> {
    bindings: &'a ComponentBindings,
}

impl<'a> ConditionEvaluator<'a> {
    pub fn new(bindings: &'a ComponentBindings) -> Self {
        Self { bindings }
    }

    /// Whether the dependency declared in `options` is currently fulfilled.
    ///
    /// A component without a parent is always fulfilled. A parent that is not
    /// live in the registry makes the dependency unfulfilled.
    ///
    /// # Errors
    /// A failing custom condition is returned as
    /// [`CoordinationError::Condition`], never read as "unfulfilled".
    pub fn is_fulfilled(&self, options: &FacetOptions) -> Result<bool, CoordinationError> {
        let Some(parent_id) = options.depends_on.as_deref() else {
            return Ok(true);
        };

        let Some(parent) = self.bindings.registry.find(parent_id) else {
            tracing::warn!(
                facet = %options.id,
                depends_on = %parent_id,
                "Dependency reference does not resolve to a live component"
            );
            return Ok(false);
        };
        let parent_options = parent.options();

        match &options.depends_on_condition {
            FulfillmentCondition::Custom(predicate) => {
                let view = ParentView::new(&parent_options, &self.bindings.query_state_model);
                predicate(&view).map_err(|source| CoordinationError::Condition {
                    facet: options.id.clone(),
                    source,
                })
            }
            FulfillmentCondition::SelectedValues => Ok(self
                .bindings
                .query_state_model
                .has_selected_values(&facet_id(&parent_options.id))),
        }
    }
}
