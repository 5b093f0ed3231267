use std::fmt;

use crate::depends_on::FulfillmentCondition;

/// Identity and dependency declaration of a component.
#[derive(Debug, Clone)]
pub struct FacetOptions {
    /// Unique among participating components.
    pub id: String,
    /// Id of the parent component, if this component is a dependent.
    pub depends_on: Option<String>,
    /// How the parent's state decides availability.
    pub depends_on_condition: FulfillmentCondition,
}

impl FacetOptions {
    /// Options of a component with no dependency.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            depends_on: None,
            depends_on_condition: FulfillmentCondition::default(),
        }
    }

    pub fn with_depends_on(mut self, parent_id: impl Into<String>) -> Self {
        self.depends_on = Some(parent_id.into());
        self
    }

    pub fn with_condition(mut self, condition: FulfillmentCondition) -> Self {
        self.depends_on_condition = condition;
        self
    }
}

/// Lifecycle operations the coordination core may invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    Enable,
    Disable,
    Reset,
}

impl LifecycleAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Enable => "enable",
            Self::Disable => "disable",
            Self::Reset => "reset",
        }
    }
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A component taking part in dependency coordination.
///
/// The owning component implements the lifecycle callbacks; the coordination
/// core only decides when to call them and never catches their errors.
pub trait Facet: Send + Sync {
    /// Snapshot of the component's current options.
    ///
    /// Read on every evaluation, so options changed after construction
    /// (e.g. a condition assigned late) are honoured.
    fn options(&self) -> FacetOptions;

    /// Make the component interactive and visible.
    fn enable(&self) -> anyhow::Result<()>;

    /// Make the component non-interactive and hidden.
    fn disable(&self) -> anyhow::Result<()>;

    /// Clear the component's own selected values.
    fn reset(&self) -> anyhow::Result<()>;
}
