use std::collections::HashSet;

use crate::mvi::StoreState;
use crate::watchlist::item::{ItemId, WatchlistItem};

/// Saved items in insertion order. Holds at most one entry per id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WatchlistState {
    items: Vec<WatchlistItem>,
}

impl StoreState for WatchlistState {}

impl WatchlistState {
    /// Build a state from hydrated items. Later duplicates of an id are
    /// dropped so the first occurrence keeps its position.
    pub(crate) fn from_items(items: Vec<WatchlistItem>) -> Self {
        let mut seen = HashSet::with_capacity(items.len());
        let items = items
            .into_iter()
            .filter(|item| seen.insert(item.id().clone()))
            .collect();
        Self { items }
    }

    pub(crate) fn push(&mut self, item: WatchlistItem) {
        self.items.push(item);
    }

    pub(crate) fn remove(&mut self, id: &ItemId) {
        self.items.retain(|item| item.id() != id);
    }

    pub fn items(&self) -> &[WatchlistItem] {
        &self.items
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }

    pub fn get(&self, id: &ItemId) -> Option<&WatchlistItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
