//! Shared query state.
//!
//! Components never talk to each other directly: they read and write named
//! attributes here, and every actual change is broadcast on the event bus.

mod model;

pub use model::{facet_id, selected_values_of, QueryStateModel};
