//! Saved pets and products.
//!
//! A [`WatchlistStore`] owns the collection, hydrates it from a
//! [`KeyValueStorage`](crate::storage::KeyValueStorage) snapshot at startup
//! and writes the snapshot back after every change.

mod bindings;
mod effect;
mod error;
mod intent;
mod item;
mod reducer;
pub mod snapshot;
mod state;
mod store;

pub use bindings::{AddOutcome, ToggleOutcome};
pub use effect::WatchlistEffect;
pub use error::WatchlistError;
pub use intent::WatchlistIntent;
pub use item::{now_millis, ItemDraft, ItemId, WatchlistItem, ADDED_AT_FIELD, ID_FIELD};
pub use reducer::{WatchlistReducer, CLEARED_MESSAGE, REMOVED_MESSAGE};
pub use state::WatchlistState;
pub use store::{SubscriptionId, WatchlistStore, DEFAULT_STORAGE_KEY};
