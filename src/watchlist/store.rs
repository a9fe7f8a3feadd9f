//! Shared watchlist store.
//!
//! Owns the single in-memory [`WatchlistState`], runs the reducer and
//! executes the effects it returns. One store is created per running
//! application and handed to every consumer; clones share the same state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::mvi::{Reducer, Transition};
use crate::notify::NotificationSink;
use crate::storage::KeyValueStorage;

use super::effect::WatchlistEffect;
use super::intent::WatchlistIntent;
use super::reducer::WatchlistReducer;
use super::snapshot;
use super::state::WatchlistState;

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "pawhaven-watchlist";

/// Handle returned by [`WatchlistStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Arc<dyn Fn(&WatchlistState) + Send + Sync>;

#[derive(Clone)]
pub struct WatchlistStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    key: String,
    storage: Arc<dyn KeyValueStorage>,
    sink: Arc<dyn NotificationSink>,
    state: Mutex<WatchlistState>,
    observers: Mutex<Vec<(SubscriptionId, Observer)>>,
    next_subscription: AtomicU64,
}

impl WatchlistStore {
    /// Create the store and hydrate it from `storage`.
    ///
    /// A missing or unreadable snapshot leaves the store empty. A corrupted
    /// snapshot is discarded and its key removed.
    pub fn open(
        storage: Arc<dyn KeyValueStorage>,
        sink: Arc<dyn NotificationSink>,
        key: impl Into<String>,
    ) -> Self {
        let store = Self {
            inner: Arc::new(StoreInner {
                key: key.into(),
                storage,
                sink,
                state: Mutex::new(WatchlistState::default()),
                observers: Mutex::new(Vec::new()),
                next_subscription: AtomicU64::new(0),
            }),
        };
        store.hydrate();
        store
    }

    /// Storage key holding the persisted snapshot.
    pub fn key(&self) -> &str {
        &self.inner.key
    }

    /// Clone of the committed state.
    pub fn state(&self) -> WatchlistState {
        self.inner.state.lock().clone()
    }

    /// Register an observer called synchronously after every transition,
    /// in subscription order.
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&WatchlistState) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.inner.next_subscription.fetch_add(1, Ordering::Relaxed));
        let observer: Observer = Arc::new(observer);
        self.inner.observers.lock().push((id, observer));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = self.inner.observers.lock();
        let before = observers.len();
        observers.retain(|(sub, _)| *sub != id);
        observers.len() != before
    }

    /// Apply `intent` and run its effects. Returns whether the state changed.
    ///
    /// Persistence happens while the state lock is held so snapshots are
    /// written in commit order. Observers and the notification sink run
    /// after the lock is released and may call back into the store.
    pub fn dispatch(&self, intent: WatchlistIntent) -> bool {
        self.dispatch_with(|_| intent)
    }

    /// Run `f` against the committed state without cloning it.
    pub(super) fn with_state<R>(&self, f: impl FnOnce(&WatchlistState) -> R) -> R {
        let state = self.inner.state.lock();
        f(&*state)
    }

    /// Like [`dispatch`](Self::dispatch), but the intent is built from the
    /// committed state under the same lock that applies it.
    pub(super) fn dispatch_with<F>(&self, build: F) -> bool
    where
        F: FnOnce(&WatchlistState) -> WatchlistIntent,
    {
        let (kind, committed, notifications, changed) = {
            let mut state = self.inner.state.lock();
            let intent = build(&*state);
            let kind = intent.kind();
            let Transition {
                state: next,
                effects,
            } = WatchlistReducer::reduce(state.clone(), intent);
            let changed = next != *state;
            *state = next;

            let mut notifications = Vec::new();
            for effect in effects {
                match effect {
                    WatchlistEffect::Persist => self.persist(&state),
                    WatchlistEffect::ErasePersisted => self.erase(),
                    WatchlistEffect::Notify(notification) => notifications.push(notification),
                }
            }
            (kind, state.clone(), notifications, changed)
        };

        tracing::debug!(
            intent = kind,
            items = committed.len(),
            changed,
            "Watchlist transition"
        );

        self.notify_observers(&committed);
        for notification in &notifications {
            self.inner.sink.notify(notification);
        }
        changed
    }

    fn hydrate(&self) {
        let key = &self.inner.key;
        let raw = match self.inner.storage.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!(key = %key, "No persisted watchlist");
                return;
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to read persisted watchlist");
                return;
            }
        };

        match snapshot::decode(&raw) {
            Ok(items) => {
                tracing::info!(key = %key, items = items.len(), "Hydrated watchlist");
                self.dispatch(WatchlistIntent::Load { items });
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Discarding corrupted watchlist snapshot");
                if let Err(e) = self.inner.storage.remove(key) {
                    tracing::warn!(key = %key, error = %e, "Failed to remove corrupted snapshot");
                }
            }
        }
    }

    fn persist(&self, state: &WatchlistState) {
        let key = &self.inner.key;
        let result = snapshot::encode(state.items())
            .map_err(|e| e.to_string())
            .and_then(|raw| self.inner.storage.set(key, &raw).map_err(|e| e.to_string()));

        if let Err(error) = result {
            tracing::warn!(key = %key, error = %error, "Failed to persist watchlist");
        }
    }

    fn erase(&self) {
        let key = &self.inner.key;
        if let Err(e) = self.inner.storage.remove(key) {
            tracing::warn!(key = %key, error = %e, "Failed to erase persisted watchlist");
        }
    }

    fn notify_observers(&self, state: &WatchlistState) {
        let observers: Vec<Observer> = self
            .inner
            .observers
            .lock()
            .iter()
            .map(|(_, observer)| Arc::clone(observer))
            .collect();
        for observer in observers {
            observer(state);
        }
    }
}

impl std::fmt::Debug for WatchlistStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchlistStore")
            .field("key", &self.inner.key)
            .field("items", &self.inner.state.lock().len())
            .finish()
    }
}

