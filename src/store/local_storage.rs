//! Browser LocalStorage backend (WASM only)
//!
//! Values written by this tab are pushed to this tab's subscribers. Writes
//! from other tabs are picked up on the next subscribe.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use web_sys::Storage;

use super::fanout::Fanout;
use super::{RemoteScoreStore, StoreError, Subscription};

type Subscribers = RefCell<Fanout>;

/// High score store persisted in `window.localStorage`
pub struct LocalStorageStore {
    storage: Storage,
    subscribers: Rc<Subscribers>,
}

impl LocalStorageStore {
    /// Storage keys are namespaced so they don't collide with the host page
    const PREFIX: &'static str = "flappy_egg:";

    pub fn open() -> Result<Self, StoreError> {
        let storage = web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no window".into()))?
            .local_storage()
            .map_err(|_| StoreError::Unavailable("localStorage access denied".into()))?
            .ok_or_else(|| StoreError::Unavailable("localStorage missing".into()))?;

        Ok(Self {
            storage,
            subscribers: Rc::new(RefCell::new(Fanout::default())),
        })
    }

    fn storage_key(key: &str) -> String {
        format!("{}{}", Self::PREFIX, key)
    }

    fn read(&self, key: &str) -> Option<u64> {
        self.storage
            .get_item(&Self::storage_key(key))
            .ok()
            .flatten()
            .and_then(|raw| raw.parse().ok())
    }

    fn forget(subscribers: &Weak<Subscribers>, id: u64) {
        if let Some(subscribers) = subscribers.upgrade() {
            subscribers.borrow_mut().remove(id);
        }
    }
}

impl RemoteScoreStore for LocalStorageStore {
    fn subscribe(&self, key: &str) -> Result<Subscription, StoreError> {
        let current = self.read(key);
        let (id, rx) = self.subscribers.borrow_mut().add(key, current);

        let weak = Rc::downgrade(&self.subscribers);
        Ok(Subscription::new(key, rx).with_unsubscribe(move || Self::forget(&weak, id)))
    }

    fn write(&self, key: &str, value: u64) -> Result<(), StoreError> {
        self.storage
            .set_item(&Self::storage_key(key), &value.to_string())
            .map_err(|_| StoreError::WriteRejected {
                key: key.to_string(),
            })?;

        self.subscribers.borrow_mut().publish(key, value);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "local_storage"
    }
}
