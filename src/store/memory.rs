//! In-process shared store
//!
//! Clones share the same data, so several game sessions built from clones of
//! one `MemoryScoreStore` behave like clients of one remote database.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use super::fanout::Fanout;
use super::{RemoteScoreStore, StoreError, Subscription};

#[derive(Default)]
struct Inner {
    values: HashMap<String, u64>,
    subscribers: Fanout,
    reject_writes: bool,
    writes: u64,
}

/// Shared in-memory key-value store with push subscriptions
#[derive(Clone, Default)]
pub struct MemoryScoreStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))
    }

    /// Current value under `key`
    pub fn read(&self, key: &str) -> Option<u64> {
        self.lock().ok().and_then(|inner| inner.values.get(key).copied())
    }

    /// Live subscriptions across all keys
    pub fn subscriber_count(&self) -> usize {
        self.lock().map(|inner| inner.subscribers.len()).unwrap_or(0)
    }

    /// Accepted writes so far
    pub fn write_count(&self) -> u64 {
        self.lock().map(|inner| inner.writes).unwrap_or(0)
    }

    /// Make every following write fail (simulates a flaky connection)
    pub fn set_reject_writes(&self, reject: bool) {
        if let Ok(mut inner) = self.lock() {
            inner.reject_writes = reject;
        }
    }

    fn forget(inner: &Weak<Mutex<Inner>>, id: u64) {
        let Some(shared) = inner.upgrade() else {
            return;
        };
        if let Ok(mut guard) = shared.lock() {
            guard.subscribers.remove(id);
        }
    }
}

impl RemoteScoreStore for MemoryScoreStore {
    fn subscribe(&self, key: &str) -> Result<Subscription, StoreError> {
        let mut inner = self.lock()?;
        let current = inner.values.get(key).copied();
        let (id, rx) = inner.subscribers.add(key, current);
        drop(inner);

        let weak = Arc::downgrade(&self.inner);
        Ok(Subscription::new(key, rx).with_unsubscribe(move || Self::forget(&weak, id)))
    }

    fn write(&self, key: &str, value: u64) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        if inner.reject_writes {
            return Err(StoreError::WriteRejected {
                key: key.to_string(),
            });
        }

        inner.values.insert(key.to_string(), value);
        inner.writes += 1;
        inner.subscribers.publish(key, value);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

impl std::fmt::Debug for MemoryScoreStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryScoreStore")
            .field("subscribers", &self.subscriber_count())
            .field("writes", &self.write_count())
            .finish()
    }
}
