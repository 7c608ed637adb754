//! Game tuning and store settings
//!
//! Defaults mirror `crate::consts`. Overrides come from JSON: a file named by
//! `FLAPPY_EGG_CONFIG` on native, LocalStorage on the web.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config read error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Which high score store backend to connect to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    /// Process-local shared store
    Memory,
    /// No store. The display starts at 0 and only shows this client's own
    /// bests; writes are dropped.
    Offline,
    /// Browser LocalStorage (wasm only)
    LocalStorage,
}

impl Default for StoreBackend {
    fn default() -> Self {
        Self::for_target(cfg!(target_arch = "wasm32"))
    }
}

impl StoreBackend {
    /// LocalStorage in the browser so the high score survives a reload,
    /// the shared in-memory store everywhere else
    pub fn for_target(wasm: bool) -> Self {
        if wasm {
            StoreBackend::LocalStorage
        } else {
            StoreBackend::Memory
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Memory => "memory",
            StoreBackend::Offline => "offline",
            StoreBackend::LocalStorage => "local_storage",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "mem" => Some(StoreBackend::Memory),
            "offline" | "none" => Some(StoreBackend::Offline),
            "local_storage" | "localstorage" => Some(StoreBackend::LocalStorage),
            _ => None,
        }
    }
}

/// Where the global high score lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub backend: StoreBackend,
    /// Key holding the high score
    pub key: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            key: HIGH_SCORE_KEY.to_string(),
        }
    }
}

/// Complete game tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Playfield ===
    pub width: f32,
    pub height: f32,

    // === Physics ===
    pub gravity: f32,
    pub jump_velocity: f32,

    // === Bird ===
    pub bird_size: f32,
    pub bird_x: f32,
    pub hitbox_inset: f32,

    // === Pipes ===
    pub pipe_speed: f32,
    pub pipe_width: f32,
    pub pipe_gap: f32,
    pub pipe_min_length: f32,
    pub despawn_x: f32,
    pub spawn_interval_ms: f64,

    // === Store ===
    pub store: StoreSettings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: GAME_WIDTH,
            height: GAME_HEIGHT,

            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,

            bird_size: BIRD_SIZE,
            bird_x: BIRD_X,
            hitbox_inset: HITBOX_INSET,

            pipe_speed: PIPE_SPEED,
            pipe_width: PIPE_WIDTH,
            pipe_gap: PIPE_GAP,
            pipe_min_length: PIPE_MIN_LENGTH,
            despawn_x: PIPE_DESPAWN_X,
            spawn_interval_ms: PIPE_SPAWN_INTERVAL_MS,

            store: StoreSettings::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the tuning describes a playable field
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(ConfigError::Invalid("playfield must have positive size".into()));
        }
        if self.bird_size <= 0.0 || self.bird_size >= self.height {
            return Err(ConfigError::Invalid(format!(
                "bird size {} does not fit playfield height {}",
                self.bird_size, self.height
            )));
        }
        if self.hitbox_inset < 0.0 || self.hitbox_inset * 2.0 >= self.bird_size {
            return Err(ConfigError::Invalid("hitbox inset swallows the bird".into()));
        }
        if self.pipe_width <= 0.0 || self.pipe_speed <= 0.0 {
            return Err(ConfigError::Invalid("pipes must have width and speed".into()));
        }
        if self.pipe_gap <= 0.0 || self.pipe_min_length < 0.0 {
            return Err(ConfigError::Invalid("pipe gap must be positive".into()));
        }
        let (min_top, max_top) = self.gap_top_range();
        if max_top < min_top {
            return Err(ConfigError::Invalid(format!(
                "gap {} with margin {} does not fit height {}",
                self.pipe_gap, self.pipe_min_length, self.height
            )));
        }
        if self.spawn_interval_ms <= 0.0 {
            return Err(ConfigError::Invalid("spawn interval must be positive".into()));
        }
        if self.store.key.trim().is_empty() {
            return Err(ConfigError::Invalid("store key is empty".into()));
        }
        Ok(())
    }

    /// Largest legal bird y (top edge)
    #[inline]
    pub fn bird_max_y(&self) -> f32 {
        self.height - self.bird_size
    }

    /// Bird y at the start of a run
    #[inline]
    pub fn bird_start_y(&self) -> f32 {
        self.height / 2.0
    }

    /// Inclusive range the gap top is drawn from
    pub fn gap_top_range(&self) -> (f32, f32) {
        let min = self.pipe_min_length;
        let max = self.height - self.pipe_gap - self.pipe_min_length;
        (min, max)
    }

    /// LocalStorage key / env var naming the config source
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "flappy_egg_config";
    pub const ENV_VAR: &'static str = "FLAPPY_EGG_CONFIG";

    /// Read a config file from disk
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load config from the file named by `FLAPPY_EGG_CONFIG`, else defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_VAR) else {
            log::info!("Using default game config");
            return Self::default();
        };

        match Self::load_from_path(&path) {
            Ok(config) => {
                log::info!("Loaded game config from {}", path);
                config
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded game config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {}", e),
                }
            }
        }

        log::info!("Using default game config");
        Self::default()
    }
}
