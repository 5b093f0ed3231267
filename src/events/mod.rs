//! Page-wide signals and their synchronous delivery.

mod bus;

pub use bus::{EventBus, Handler, Subscription, DEFAULT_MAX_DISPATCH_DEPTH};

use std::fmt;

/// Signals observed by coordinated components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// Every component on the page has finished constructing. Fired once.
    AfterComponentsInitialization,
    /// A search request completed and its results are available.
    QuerySuccess,
    /// A state-store attribute changed value.
    StateChange { attribute: String },
}

impl SearchEvent {
    /// Stable signal name, used in logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AfterComponentsInitialization => "afterComponentsInitialization",
            Self::QuerySuccess => "querySuccess",
            Self::StateChange { .. } => "state:change",
        }
    }
}

impl fmt::Display for SearchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StateChange { attribute } => write!(f, "state:change:{}", attribute),
            other => f.write_str(other.name()),
        }
    }
}
