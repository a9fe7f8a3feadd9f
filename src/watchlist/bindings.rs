//! Consumer-facing operations on the watchlist store.
//!
//! UI code talks to the watchlist only through these methods; intents,
//! the reducer and effects stay internal.

use serde_json::Value;

use super::error::WatchlistError;
use super::intent::WatchlistIntent;
use super::item::{now_millis, ItemDraft, ItemId, WatchlistItem};
use super::store::WatchlistStore;

/// Result of [`WatchlistStore::add_to_watchlist`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// The id was already saved. The collection is unchanged.
    Duplicate,
}

/// Result of [`WatchlistStore::toggle_watchlist`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
}

impl WatchlistStore {
    pub fn add_to_watchlist(&self, draft: ItemDraft) -> AddOutcome {
        let added = self.dispatch(WatchlistIntent::Add {
            draft,
            added_at: now_millis(),
        });
        if added {
            AddOutcome::Added
        } else {
            AddOutcome::Duplicate
        }
    }

    /// Add an item given as a JSON object.
    ///
    /// # Errors
    /// Fails without dispatching anything when the value is not an object
    /// or has no usable `id`.
    pub fn add_json(&self, value: Value) -> Result<AddOutcome, WatchlistError> {
        let draft = ItemDraft::try_from(value)?;
        Ok(self.add_to_watchlist(draft))
    }

    /// Removing an id that is not saved still succeeds.
    pub fn remove_from_watchlist(&self, id: &ItemId) {
        self.dispatch(WatchlistIntent::Remove { id: id.clone() });
    }

    /// Remove the item when saved, add it otherwise.
    ///
    /// The membership check and the resulting add or remove are one
    /// transition, so concurrent toggles never produce a duplicate add.
    pub fn toggle_watchlist(&self, draft: ItemDraft) -> ToggleOutcome {
        let mut outcome = ToggleOutcome::Added;
        self.dispatch_with(|state| {
            if state.contains(draft.id()) {
                outcome = ToggleOutcome::Removed;
                WatchlistIntent::Remove {
                    id: draft.id().clone(),
                }
            } else {
                WatchlistIntent::Add {
                    draft,
                    added_at: now_millis(),
                }
            }
        });
        outcome
    }

    pub fn clear_watchlist(&self) {
        self.dispatch(WatchlistIntent::Clear);
    }

    pub fn is_in_watchlist(&self, id: &ItemId) -> bool {
        self.with_state(|state| state.contains(id))
    }

    pub fn get_watchlist_count(&self) -> usize {
        self.with_state(|state| state.len())
    }

    /// Saved items in insertion order.
    pub fn watchlist(&self) -> Vec<WatchlistItem> {
        self.with_state(|state| state.items().to_vec())
    }

    pub fn get(&self, id: &ItemId) -> Option<WatchlistItem> {
        self.with_state(|state| state.get(id).cloned())
    }
}
