use chrono::{DateTime, Utc};

use crate::mvi::Intent;
use crate::watchlist::item::{ItemDraft, ItemId, WatchlistItem};

#[derive(Debug, Clone)]
pub enum WatchlistIntent {
    /// Replace the collection wholesale. Used once, on hydration.
    Load { items: Vec<WatchlistItem> },
    /// Append `draft` stamped with `added_at`, unless its id is already saved.
    Add {
        draft: ItemDraft,
        added_at: DateTime<Utc>,
    },
    /// Drop the entry with `id`. Absent ids are not an error.
    Remove { id: ItemId },
    Clear,
}

impl Intent for WatchlistIntent {}

impl WatchlistIntent {
    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Load { .. } => "load",
            Self::Add { .. } => "add",
            Self::Remove { .. } => "remove",
            Self::Clear => "clear",
        }
    }
}
