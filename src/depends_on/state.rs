//! Decision state machine of a dependent component.

use crate::component::LifecycleAction;
use crate::mvi::{Intent, Reducer, ViewState};

/// What a dependent was last told to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Availability {
    /// No decision taken yet.
    #[default]
    Pending,
    Enabled,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DependentState {
    pub availability: Availability,
    /// Outcome of the previous state-change evaluation. `None` until the
    /// first one, so the first state change always counts as a transition.
    pub last_state_change: Option<bool>,
    /// Lifecycle calls decided by the latest transition, in call order.
    pub actions: Vec<LifecycleAction>,
}

impl ViewState for DependentState {}

/// A page signal paired with the condition outcome evaluated for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyIntent {
    Initialized { fulfilled: bool },
    /// `selected` is whether the dependent itself holds selected values.
    StateChanged { fulfilled: bool, selected: bool },
    QuerySucceeded { fulfilled: bool },
}

impl Intent for DependencyIntent {}

pub struct DependentReducer;

impl Reducer for DependentReducer {
    type State = DependentState;
    type Intent = DependencyIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            // Nothing is selected yet at start-up, so there is nothing to reset.
            DependencyIntent::Initialized { fulfilled: true } => DependentState {
                availability: Availability::Enabled,
                actions: Vec::new(),
                ..state
            },
            DependencyIntent::Initialized { fulfilled: false } => DependentState {
                availability: Availability::Disabled,
                actions: vec![LifecycleAction::Disable],
                ..state
            },
            // An unfulfilled dependent that picked up a selection while hidden
            // is reset again.
            DependencyIntent::StateChanged { fulfilled, selected }
                if state.last_state_change == Some(fulfilled) && (fulfilled || !selected) =>
            {
                DependentState {
                    actions: Vec::new(),
                    ..state
                }
            }
            DependencyIntent::StateChanged { fulfilled: true, .. } => DependentState {
                availability: Availability::Enabled,
                last_state_change: Some(true),
                actions: vec![LifecycleAction::Enable],
            },
            // Clear hidden selections before the next query can pick them up.
            DependencyIntent::StateChanged { fulfilled: false, .. } => DependentState {
                last_state_change: Some(false),
                actions: vec![LifecycleAction::Reset],
                ..state
            },
            DependencyIntent::QuerySucceeded { fulfilled: true } => DependentState {
                availability: Availability::Enabled,
                actions: vec![LifecycleAction::Enable],
                ..state
            },
            DependencyIntent::QuerySucceeded { fulfilled: false } => DependentState {
                availability: Availability::Disabled,
                actions: vec![LifecycleAction::Disable],
                ..state
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_changed(fulfilled: bool) -> DependencyIntent {
        DependencyIntent::StateChanged {
            fulfilled,
            selected: false,
        }
    }

    fn reduce_all(intents: &[DependencyIntent]) -> Vec<Vec<LifecycleAction>> {
        let mut state = DependentState::default();
        let mut decided = Vec::new();
        for intent in intents {
            state = DependentReducer::reduce(state, *intent);
            decided.push(state.actions.clone());
        }
        decided
    }

    #[test]
    fn unfulfilled_start_disables_without_reset() {
        let state = DependentReducer::reduce(
            DependentState::default(),
            DependencyIntent::Initialized { fulfilled: false },
        );
        assert_eq!(state.availability, Availability::Disabled);
        assert_eq!(state.actions, vec![LifecycleAction::Disable]);
    }

    #[test]
    fn fulfilled_start_takes_no_action() {
        let state = DependentReducer::reduce(
            DependentState::default(),
            DependencyIntent::Initialized { fulfilled: true },
        );
        assert_eq!(state.availability, Availability::Enabled);
        assert!(state.actions.is_empty());
    }

    #[test]
    fn first_unfulfilled_state_change_resets_even_after_start_up_disable() {
        let decided = reduce_all(&[
            DependencyIntent::Initialized { fulfilled: false },
            state_changed(false),
        ]);
        assert_eq!(decided[1], vec![LifecycleAction::Reset]);
    }

    #[test]
    fn repeated_state_change_without_transition_is_a_no_op() {
        let decided = reduce_all(&[
            state_changed(false),
            state_changed(false),
            state_changed(true),
            state_changed(true),
            state_changed(false),
        ]);
        assert_eq!(
            decided,
            vec![
                vec![LifecycleAction::Reset],
                vec![],
                vec![LifecycleAction::Enable],
                vec![],
                vec![LifecycleAction::Reset],
            ]
        );
    }

    #[test]
    fn selection_made_while_unfulfilled_is_reset_again() {
        let decided = reduce_all(&[
            state_changed(false),
            DependencyIntent::StateChanged {
                fulfilled: false,
                selected: true,
            },
            state_changed(false),
        ]);
        assert_eq!(
            decided,
            vec![
                vec![LifecycleAction::Reset],
                vec![LifecycleAction::Reset],
                vec![],
            ]
        );
    }

    #[test]
    fn selection_while_fulfilled_is_left_alone() {
        let decided = reduce_all(&[
            state_changed(true),
            DependencyIntent::StateChanged {
                fulfilled: true,
                selected: true,
            },
        ]);
        assert_eq!(decided[1], Vec::<LifecycleAction>::new());
    }

    #[test]
    fn query_success_acts_on_every_signal() {
        let decided = reduce_all(&[
            DependencyIntent::QuerySucceeded { fulfilled: true },
            DependencyIntent::QuerySucceeded { fulfilled: true },
            DependencyIntent::QuerySucceeded { fulfilled: false },
            DependencyIntent::QuerySucceeded { fulfilled: false },
        ]);
        assert_eq!(
            decided,
            vec![
                vec![LifecycleAction::Enable],
                vec![LifecycleAction::Enable],
                vec![LifecycleAction::Disable],
                vec![LifecycleAction::Disable],
            ]
        );
    }

    #[test]
    fn query_success_does_not_reset_state_change_tracking() {
        let decided = reduce_all(&[
            state_changed(false),
            DependencyIntent::QuerySucceeded { fulfilled: false },
            state_changed(false),
        ]);
        assert_eq!(decided[2], Vec::<LifecycleAction>::new());
    }
}
