//! Simulation module
//!
//! All gameplay logic lives here. It has no knowledge of rendering, the
//! remote store, or how frames are scheduled:
//! - Wall-clock time is passed in, never read
//! - Seeded RNG only
//! - Pipes are kept in spawn order

pub mod autopilot;
pub mod collision;
pub mod physics;
pub mod scoring;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, CollisionReport, detect};
pub use scoring::ScoreTracker;
pub use spawner::ObstacleSpawner;
pub use state::{Bird, GameEvent, GameOverCause, GamePhase, GameState, Obstacle};
pub use tick::{TickInput, tick};
