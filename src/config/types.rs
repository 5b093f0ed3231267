use serde::{Deserialize, Serialize};

use crate::component::FacetOptions;
use crate::depends_on::FulfillmentCondition;
use crate::events::DEFAULT_MAX_DISPATCH_DEPTH;

/// Root configuration: a page of coordinated facets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageConfig {
    #[serde(default)]
    pub coordination: CoordinationSettings,
    #[serde(default)]
    pub facets: Vec<FacetConfig>,
}

/// Settings of the signal dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinationSettings {
    /// Nested dispatch depth allowed before an emit fails (default: 32).
    #[serde(default = "default_max_dispatch_depth")]
    pub max_dispatch_depth: usize,
}

fn default_max_dispatch_depth() -> usize {
    DEFAULT_MAX_DISPATCH_DEPTH
}

impl Default for CoordinationSettings {
    fn default() -> Self {
        Self {
            max_dispatch_depth: default_max_dispatch_depth(),
        }
    }
}

/// One facet of the page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacetConfig {
    /// Unique identifier (e.g., "@category").
    pub id: String,
    /// Id of the parent facet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<String>,
    /// Parent values that fulfil the dependency. When absent, any non-empty
    /// parent selection does.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends_on_values: Option<Vec<String>>,
    /// Values selected when the page loads.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selected: Vec<String>,
}

impl FacetConfig {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn depends_on(mut self, parent_id: impl Into<String>) -> Self {
        self.depends_on = Some(parent_id.into());
        self
    }

    /// Coordination options described by this entry.
    pub fn to_options(&self) -> FacetOptions {
        let condition = match &self.depends_on_values {
            Some(values) => FulfillmentCondition::any_of(values.iter().cloned()),
            None => FulfillmentCondition::SelectedValues,
        };
        FacetOptions {
            id: self.id.clone(),
            depends_on: self.depends_on.clone(),
            depends_on_condition: condition,
        }
    }
}
