//! Dependency-condition coordination.
//!
//! A dependent component declares the id of a parent. Its manager watches
//! page signals and enables, disables or resets the dependent depending on
//! whether the parent currently fulfils the declared condition:
//!
//! | Signal                          | Fulfilled            | Unfulfilled           |
//! |---------------------------------|----------------------|-----------------------|
//! | `AfterComponentsInitialization` | nothing              | `disable()`           |
//! | `StateChange` (on transition)   | `enable()`           | `reset()`             |
//! | `QuerySuccess`                  | `enable()`           | `disable()`           |

pub mod chain;
mod condition;
mod manager;
mod state;

pub use condition::{ConditionEvaluator, ConditionFn, FulfillmentCondition, ParentView};
pub use manager::DependsOnManager;
pub use state::{Availability, DependencyIntent, DependentReducer, DependentState};
