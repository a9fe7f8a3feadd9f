//! Shared test utilities and storage doubles.

#![allow(dead_code, unused_imports)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pawhaven::notify::{Notification, NotificationCenter};
use pawhaven::storage::{KeyValueStorage, MemoryStorage, StorageError};
use pawhaven::watchlist::{WatchlistStore, DEFAULT_STORAGE_KEY};

pub const KEY: &str = DEFAULT_STORAGE_KEY;

/// Store over `storage` with a notification center large enough to keep
/// every notification a test produces.
pub fn open_store(storage: Arc<dyn KeyValueStorage>) -> (WatchlistStore, Arc<NotificationCenter>) {
    let center = Arc::new(NotificationCenter::new(1_000));
    let store = WatchlistStore::open(storage, center.clone(), KEY);
    (store, center)
}

pub fn memory_store() -> (WatchlistStore, Arc<MemoryStorage>, Arc<NotificationCenter>) {
    let storage = Arc::new(MemoryStorage::new());
    let (store, center) = open_store(storage.clone());
    (store, storage, center)
}

pub fn messages(center: &NotificationCenter) -> Vec<String> {
    center.received().into_iter().map(|n| n.message).collect()
}

/// Storage whose every call fails, counting the attempts.
#[derive(Debug, Default)]
pub struct BrokenStorage {
    pub reads: AtomicUsize,
    pub writes: AtomicUsize,
    pub removes: AtomicUsize,
}

impl BrokenStorage {
    fn failure(key: &str) -> StorageError {
        StorageError::Io {
            path: key.into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only medium"),
        }
    }
}

impl KeyValueStorage for BrokenStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Err(Self::failure(key))
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Err(Self::failure(key))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.removes.fetch_add(1, Ordering::SeqCst);
        Err(Self::failure(key))
    }
}
