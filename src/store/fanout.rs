//! Subscriber bookkeeping shared by the store backends

use crossbeam_channel::{Receiver, Sender};

struct Subscriber {
    id: u64,
    key: String,
    tx: Sender<u64>,
}

/// Per-key push channels. Subscribers whose receiver is gone are dropped on
/// the next publish.
#[derive(Default)]
pub(crate) struct Fanout {
    subscribers: Vec<Subscriber>,
    next_id: u64,
}

impl Fanout {
    /// Register a subscriber for `key`, queueing `current` first if known
    pub fn add(&mut self, key: &str, current: Option<u64>) -> (u64, Receiver<u64>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        if let Some(value) = current {
            // Receiver is alive, send can't fail
            let _ = tx.send(value);
        }

        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push(Subscriber {
            id,
            key: key.to_string(),
            tx,
        });
        (id, rx)
    }

    pub fn remove(&mut self, id: u64) {
        self.subscribers.retain(|s| s.id != id);
    }

    /// Push `value` to every live subscriber of `key`
    pub fn publish(&mut self, key: &str, value: u64) {
        self.subscribers
            .retain(|s| s.key != key || s.tx.send(value).is_ok());
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }
}
