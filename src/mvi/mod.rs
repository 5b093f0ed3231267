//! Model-View-Intent primitives.
//!
//! Coordination decisions are expressed as unidirectional data flow:
//!
//! ```text
//! Signal ──→ Intent ──→ Reducer ──→ State ──→ Lifecycle actions
//! ```
//!
//! - **State**: immutable snapshot of what a component was last told to do
//! - **Intent**: an evaluated signal (initialization, state change, query)
//! - **Reducer**: pure function that transforms state based on intents

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::ViewState;
