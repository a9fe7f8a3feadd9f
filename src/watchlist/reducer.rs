//! Reducer for the watchlist.

use crate::mvi::{Reducer, Transition};
use crate::notify::Notification;

use super::effect::WatchlistEffect;
use super::intent::WatchlistIntent;
use super::state::WatchlistState;

pub const REMOVED_MESSAGE: &str = "Item removed from watchlist";
pub const CLEARED_MESSAGE: &str = "Watchlist cleared";

/// Reducer for watchlist state transitions.
///
/// Pure function: persistence and notifications come back as
/// [`WatchlistEffect`]s and are executed by the store after the new
/// state is committed.
pub struct WatchlistReducer;

impl Reducer for WatchlistReducer {
    type State = WatchlistState;
    type Intent = WatchlistIntent;
    type Effect = WatchlistEffect;

    fn reduce(state: Self::State, intent: Self::Intent) -> Transition<Self::State, Self::Effect> {
        match intent {
            WatchlistIntent::Load { items } => Transition::pure(WatchlistState::from_items(items)),

            WatchlistIntent::Add { draft, added_at } => {
                let label = draft.label();
                if state.contains(draft.id()) {
                    return Transition::with_effects(
                        state,
                        vec![WatchlistEffect::Notify(Notification::error(format!(
                            "{} is already in your watchlist",
                            label
                        )))],
                    );
                }

                let mut state = state;
                state.push(draft.into_item(added_at));
                Transition::with_effects(
                    state,
                    vec![
                        WatchlistEffect::Persist,
                        WatchlistEffect::Notify(Notification::success(format!(
                            "{} added to watchlist",
                            label
                        ))),
                    ],
                )
            }

            WatchlistIntent::Remove { id } => {
                let mut state = state;
                state.remove(&id);
                Transition::with_effects(
                    state,
                    vec![
                        WatchlistEffect::Persist,
                        WatchlistEffect::Notify(Notification::success(REMOVED_MESSAGE)),
                    ],
                )
            }

            WatchlistIntent::Clear => Transition::with_effects(
                WatchlistState::default(),
                vec![
                    WatchlistEffect::ErasePersisted,
                    WatchlistEffect::Notify(Notification::success(CLEARED_MESSAGE)),
                ],
            ),
        }
    }
}
