//! Remote high score store
//!
//! The global high score lives in a shared key-value store. Game code only
//! sees this module's interface:
//! - `subscribe(key)` streams the stored value, once on connect and again on
//!   every change from any client
//! - `write(key, value)` is best effort; callers log failures and move on
//!
//! Concurrent writers race with last-write-wins semantics.

mod fanout;
pub mod memory;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;

pub use memory::MemoryScoreStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use crossbeam_channel::{Receiver, TryIter};
use thiserror::Error;

use crate::settings::{StoreBackend, StoreSettings};

/// Errors a store can report. None of them are fatal to the game.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store misconfigured: {0}")]
    Misconfigured(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("write to '{key}' rejected")]
    WriteRejected { key: String },
}

/// Shared key-value store holding integer high scores
pub trait RemoteScoreStore {
    /// Start receiving values for `key`
    fn subscribe(&self, key: &str) -> Result<Subscription, StoreError>;

    /// Store `value` under `key`. Fire-and-forget: no retry, no confirmation.
    fn write(&self, key: &str, value: u64) -> Result<(), StoreError>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// A live stream of pushed values. Dropping it unsubscribes.
pub struct Subscription {
    key: String,
    rx: Receiver<u64>,
    on_drop: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(key: impl Into<String>, rx: Receiver<u64>) -> Self {
        Self {
            key: key.into(),
            rx,
            on_drop: None,
        }
    }

    /// Run `f` when the subscription ends (used by stores to forget the
    /// subscriber)
    pub fn with_unsubscribe(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_drop = Some(Box::new(f));
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Values pushed since the last call, oldest first. Never blocks.
    pub fn try_iter(&self) -> TryIter<'_, u64> {
        self.rx.try_iter()
    }

    /// Stop delivery
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(f) = self.on_drop.take() {
            f();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("key", &self.key)
            .field("pending", &self.rx.len())
            .finish()
    }
}

/// Store used when no real store could be reached. Never pushes anything,
/// accepts and drops every write.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineStore;

impl RemoteScoreStore for OfflineStore {
    fn subscribe(&self, key: &str) -> Result<Subscription, StoreError> {
        let (_tx, rx) = crossbeam_channel::bounded(0);
        Ok(Subscription::new(key, rx))
    }

    fn write(&self, _key: &str, _value: u64) -> Result<(), StoreError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "offline"
    }
}

/// Open the store described by `settings`
pub fn connect(settings: &StoreSettings) -> Result<Box<dyn RemoteScoreStore>, StoreError> {
    if settings.key.trim().is_empty() {
        return Err(StoreError::Misconfigured("empty high score key".into()));
    }

    match settings.backend {
        StoreBackend::Memory => Ok(Box::new(MemoryScoreStore::new())),
        StoreBackend::Offline => Ok(Box::new(OfflineStore)),
        #[cfg(target_arch = "wasm32")]
        StoreBackend::LocalStorage => Ok(Box::new(LocalStorageStore::open()?)),
        #[cfg(not(target_arch = "wasm32"))]
        StoreBackend::LocalStorage => Err(StoreError::Misconfigured(
            "local_storage backend needs a browser".into(),
        )),
    }
}

/// Like `connect`, but falls back to `OfflineStore` so the game still runs
pub fn connect_or_offline(settings: &StoreSettings) -> Box<dyn RemoteScoreStore> {
    match connect(settings) {
        Ok(store) => {
            log::info!("Connected to {} high score store", store.name());
            store
        }
        Err(e) => {
            log::warn!("High score store unavailable, playing offline: {}", e);
            Box::new(OfflineStore)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offline_store_is_silent() {
        let store = OfflineStore;
        let sub = store.subscribe("highscore").unwrap();
        assert!(store.write("highscore", 99).is_ok());
        assert_eq!(sub.try_iter().count(), 0);
        assert_eq!(sub.key(), "highscore");
    }

    #[test]
    fn test_unsubscribe_runs_hook() {
        use std::cell::Cell;
        use std::rc::Rc;

        let fired = Rc::new(Cell::new(false));
        let (_tx, rx) = crossbeam_channel::unbounded();
        let flag = fired.clone();
        let sub = Subscription::new("k", rx).with_unsubscribe(move || flag.set(true));
        assert!(!fired.get());
        sub.unsubscribe();
        assert!(fired.get());
    }

    #[test]
    fn test_connect_rejects_empty_key() {
        let settings = StoreSettings {
            backend: StoreBackend::Memory,
            key: String::new(),
        };
        assert!(matches!(connect(&settings), Err(StoreError::Misconfigured(_))));
        assert_eq!(connect_or_offline(&settings).name(), "offline");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_local_storage_falls_back_natively() {
        let settings = StoreSettings {
            backend: StoreBackend::LocalStorage,
            ..Default::default()
        };
        assert_eq!(connect_or_offline(&settings).name(), "offline");
    }

    #[test]
    fn test_connect_memory() {
        let store = connect(&StoreSettings::default()).unwrap();
        assert_eq!(store.name(), "memory");
    }
}
