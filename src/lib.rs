//! Flappy Egg - A pipe-hopping easter egg with a shared global high score
//!
//! Core modules:
//! - `sim`: Simulation (physics, spawning, collisions, scoring, tick pipeline)
//! - `session`: Game lifecycle state machine and frame scheduling
//! - `highscores`: Displayed global high score and the game-over comparison
//! - `store`: Remote key-value store abstraction for the high score
//! - `platform`: Clock and frame scheduler abstractions
//! - `settings`: Data-driven game tuning

pub mod highscores;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod store;

pub use highscores::HighScore;
pub use session::{GameSession, RenderSnapshot};
pub use settings::{ConfigError, GameConfig, StoreBackend, StoreSettings};
pub use store::{MemoryScoreStore, OfflineStore, RemoteScoreStore, StoreError, Subscription};

/// Game configuration constants (defaults for `GameConfig`)
pub mod consts {
    /// Playfield dimensions
    pub const GAME_WIDTH: f32 = 450.0;
    pub const GAME_HEIGHT: f32 = 600.0;

    /// Downward acceleration added to velocity each tick
    pub const GRAVITY: f32 = 0.4;
    /// Velocity set (not added) by a jump
    pub const JUMP_VELOCITY: f32 = -7.5;

    /// Bird is a square at a fixed column
    pub const BIRD_SIZE: f32 = 30.0;
    pub const BIRD_X: f32 = 60.0;
    /// Vertical hitbox inset so grazing contacts don't count
    pub const HITBOX_INSET: f32 = 2.0;

    /// Pipe defaults
    pub const PIPE_SPEED: f32 = 3.0;
    pub const PIPE_WIDTH: f32 = 50.0;
    pub const PIPE_GAP: f32 = 160.0;
    /// Minimum pipe length above/below the gap
    pub const PIPE_MIN_LENGTH: f32 = 50.0;
    /// Pipes at or left of this x are dropped
    pub const PIPE_DESPAWN_X: f32 = -60.0;
    /// Wall-clock milliseconds between spawns
    pub const PIPE_SPAWN_INTERVAL_MS: f64 = 1500.0;

    /// Remote store key holding the global high score
    pub const HIGH_SCORE_KEY: &str = "highscore";
}
