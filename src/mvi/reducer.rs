//! Reducer trait for MVI architecture.

use super::intent::Intent;
use super::state::StoreState;

/// Result of a single reduction: the next state plus the effects the
/// owner of the state has to run once the state is committed.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<S, E> {
    pub state: S,
    pub effects: Vec<E>,
}

impl<S, E> Transition<S, E> {
    /// A transition with no effects.
    pub fn pure(state: S) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    /// A transition carrying the given effects, in execution order.
    pub fn with_effects(state: S, effects: Vec<E>) -> Self {
        Self { state, effects }
    }
}

/// Reducer transforms state based on intents.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure function: (State, Intent) -> (State, Effects).
/// Effects are plain data; executing them (I/O, notifications) is the
/// caller's job.
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: StoreState;

    /// The intent type this reducer handles.
    type Intent: Intent;

    /// Side effects requested by a transition.
    type Effect;

    /// Process an intent and return the new state with its effects.
    fn reduce(state: Self::State, intent: Self::Intent) -> Transition<Self::State, Self::Effect>;
}
