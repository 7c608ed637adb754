//! Global high score as seen by this client
//!
//! The displayed value is the max of the last value pushed by the store and
//! anything this client wrote itself. A new best is shown immediately; the
//! store write is fire-and-forget.

use crate::store::RemoteScoreStore;

/// Displayed global high score
#[derive(Debug, Clone, Default)]
pub struct HighScore {
    /// Last value pushed by the store
    last_remote: u64,
    /// Best score this client has written
    best_written: u64,
    /// Write attempts issued (including failed ones)
    write_attempts: u32,
}

impl HighScore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value to show in the HUD
    pub fn displayed(&self) -> u64 {
        self.last_remote.max(self.best_written)
    }

    pub fn last_remote(&self) -> u64 {
        self.last_remote
    }

    pub fn write_attempts(&self) -> u32 {
        self.write_attempts
    }

    /// Check if a finished run beats the known high score
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.displayed()
    }

    /// Apply a value pushed by the store. Returns true if the displayed value
    /// changed.
    pub fn observe_remote(&mut self, value: u64) -> bool {
        let before = self.displayed();
        self.last_remote = value;
        let changed = self.displayed() != before;
        if changed {
            log::info!("Global high score is now {}", self.displayed());
        }
        changed
    }

    /// Compare a finished run against the known high score. If it is
    /// strictly better, show it now and write it to the store.
    /// Returns the new high score if one was set.
    pub fn submit(&mut self, score: u64, store: &dyn RemoteScoreStore, key: &str) -> Option<u64> {
        if !self.qualifies(score) {
            return None;
        }

        self.best_written = score;
        self.write_attempts += 1;
        match store.write(key, score) {
            Ok(()) => log::info!("New high score {} sent to {} store", score, store.name()),
            Err(e) => log::warn!("High score {} not saved: {}", score, e),
        }
        Some(score)
    }
}
