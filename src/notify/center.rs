//! In-memory notification history with read tracking.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use super::{Notification, NotificationSink};

pub const DEFAULT_HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRecord {
    pub id: u64,
    pub notification: Notification,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

/// Keeps the most recent notifications, newest first.
#[derive(Debug)]
pub struct NotificationCenter {
    limit: usize,
    inner: Mutex<CenterInner>,
}

#[derive(Debug, Default)]
struct CenterInner {
    records: VecDeque<NotificationRecord>,
    next_id: u64,
}

impl NotificationCenter {
    /// A limit of zero is treated as one.
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            inner: Mutex::new(CenterInner::default()),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Retained records, newest first.
    pub fn records(&self) -> Vec<NotificationRecord> {
        self.inner.lock().records.iter().cloned().collect()
    }

    /// Retained notifications in the order they were received.
    pub fn received(&self) -> Vec<Notification> {
        self.inner
            .lock()
            .records
            .iter()
            .rev()
            .map(|r| r.notification.clone())
            .collect()
    }

    /// Returns `false` if no retained record has `id`.
    pub fn mark_read(&self, id: u64) -> bool {
        let mut inner = self.inner.lock();
        match inner.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.read = true;
                true
            }
            None => false,
        }
    }

    pub fn unread_count(&self) -> usize {
        self.inner.lock().records.iter().filter(|r| !r.read).count()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().records.is_empty()
    }

    pub fn clear(&self) {
        self.inner.lock().records.clear();
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl NotificationSink for NotificationCenter {
    fn notify(&self, notification: &Notification) {
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.records.push_front(NotificationRecord {
            id,
            notification: notification.clone(),
            timestamp: Utc::now(),
            read: false,
        });
        inner.records.truncate(self.limit);
    }
}
