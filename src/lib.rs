//! Dependency-condition coordination between search UI facets.
//!
//! Facets share a [`state::QueryStateModel`] and a [`events::EventBus`]. A
//! facet may declare a parent; its [`depends_on::DependsOnManager`] then
//! enables, disables or resets it as the parent's selection changes and as
//! queries complete.

pub mod component;
pub mod config;
pub mod depends_on;
pub mod error;
pub mod events;
pub mod logging;
pub mod mvi;
pub mod page;
pub mod state;

pub use error::CoordinationError;
