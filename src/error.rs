//! Errors raised while coordinating dependent components.

use thiserror::Error;

use crate::component::LifecycleAction;

/// Errors that can surface from a signal dispatch or a registry change.
///
/// An unresolved parent reference is not an error: it degrades to an
/// unfulfilled condition and is only logged.
#[derive(Debug, Error)]
pub enum CoordinationError {
    #[error("Custom condition of '{facet}' failed: {source}")]
    Condition {
        facet: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("'{action}' on '{facet}' failed: {source}")]
    Lifecycle {
        facet: String,
        action: LifecycleAction,
        #[source]
        source: anyhow::Error,
    },

    #[error("Circular dependency detected: {}", .path.join(" → "))]
    CircularDependency { path: Vec<String> },

    #[error("A component with id '{id}' is already registered")]
    DuplicateComponent { id: String },

    #[error("No live component with id '{id}'")]
    UnknownComponent { id: String },

    #[error("Dispatch of '{event}' exceeded the maximum nesting depth of {depth}")]
    DispatchDepthExceeded { event: String, depth: usize },
}
