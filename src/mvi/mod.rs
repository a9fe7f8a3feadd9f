//! Model-View-Intent (MVI) primitives.
//!
//! This module provides the base traits for unidirectional data flow
//! between consumers and the stores that own application state.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ Reducer ──→ (State, Effects) ──→ Store ──→ Observers
//!    ↑                                                    │
//!    └────────────────────────────────────────────────────┘
//! ```
//!
//! - **State**: Immutable representation of a store's data
//! - **Intent**: Requested actions (user input, startup hydration)
//! - **Reducer**: Pure function that computes the next state and the
//!   effects the store must execute afterwards

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::{Reducer, Transition};
pub use state::StoreState;
