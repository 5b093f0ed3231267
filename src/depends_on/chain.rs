//! Cycle detection over declared parent links.
//!
//! Every component has at most one parent, so the dependency graph is a set
//! of chains. Walking a chain with a visited set is enough to find a cycle.

use std::collections::HashSet;

use crate::error::CoordinationError;

/// Walk the parent chain starting at `start`.
///
/// `parent_of` returns the declared parent of a component, or `None` when the
/// component has no parent or is not live. The walk stops at the first
/// unresolved link.
///
/// # Errors
/// Returns [`CoordinationError::CircularDependency`] with the closed path
/// (first node repeated at the end) if the chain loops.
pub fn check_acyclic<F>(start: &str, parent_of: F) -> Result<(), CoordinationError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut path = vec![start.to_string()];
    let mut visited: HashSet<String> = HashSet::from([start.to_string()]);
    let mut current = start.to_string();

    while let Some(parent) = parent_of(&current) {
        if visited.contains(&parent) {
            let cycle_start = path.iter().position(|id| *id == parent).unwrap_or(0);
            let mut cycle = path.split_off(cycle_start);
            cycle.push(parent);
            return Err(CoordinationError::CircularDependency { path: cycle });
        }
        visited.insert(parent.clone());
        path.push(parent.clone());
        current = parent;
    }
    Ok(())
}
