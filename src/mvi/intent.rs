//! Base trait for intents in the MVI flow.

/// Marker trait for intent objects.
///
/// Intents represent evaluated signals (page initialized, state changed,
/// query completed). They are processed by reducers to produce new states.
pub trait Intent: Send + 'static {}
