//! Game state and core simulation types
//!
//! Everything the tick pipeline mutates lives here, owned by `GameState`.

use serde::{Deserialize, Serialize};

use super::scoring::ScoreTracker;
use super::spawner::ObstacleSpawner;
use crate::settings::GameConfig;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GamePhase {
    /// Waiting for the first jump
    Start,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for jump/retry
    GameOver,
}

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// Left the playfield through the top or bottom
    Boundary,
    /// Hit a pipe segment
    Obstacle,
    /// Both in the same tick
    BoundaryAndObstacle,
}

/// Things that happened during a tick, for the host to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { id: u32 },
    Scored { score: u64 },
    GameOver { score: u64, cause: GameOverCause },
}

/// The player's square
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    /// Fixed column (left edge)
    pub x: f32,
    /// Top edge, grows downward
    pub y: f32,
    /// Units per tick, positive is down
    pub velocity: f32,
    pub size: f32,
}

impl Bird {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            x: config.bird_x,
            y: config.bird_start_y(),
            velocity: 0.0,
            size: config.bird_size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.size
    }
}

/// A pipe pair with a passable gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    pub width: f32,
    /// Bottom of the top pipe
    pub gap_top: f32,
    pub gap_height: f32,
    /// Set once when the bird clears the pipe
    passed: bool,
}

impl Obstacle {
    pub fn new(id: u32, x: f32, width: f32, gap_top: f32, gap_height: f32) -> Self {
        Self {
            id,
            x,
            width,
            gap_top,
            gap_height,
            passed: false,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top of the bottom pipe
    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap_height
    }

    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Flip `passed` to true. Returns false if it already was.
    pub fn mark_passed(&mut self) -> bool {
        if self.passed {
            return false;
        }
        self.passed = true;
        true
    }
}

/// Complete simulation state for one game view
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub phase: GamePhase,
    pub bird: Bird,
    /// Active pipes in spawn order (left to right)
    pub obstacles: Vec<Obstacle>,
    pub scoring: ScoreTracker,
    pub spawner: ObstacleSpawner,
    /// Ticks run in the current game
    pub time_ticks: u64,
}

impl GameState {
    /// Create a state in the Start phase
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            bird: Bird::new(&config),
            config,
            phase: GamePhase::Start,
            obstacles: Vec::new(),
            scoring: ScoreTracker::default(),
            spawner: ObstacleSpawner::new(seed),
            time_ticks: 0,
        }
    }

    pub fn score(&self) -> u64 {
        self.scoring.score()
    }

    /// Reset everything and enter Playing. Seeds one pipe at the right edge.
    pub fn start(&mut self, now_ms: f64) {
        self.bird = Bird::new(&self.config);
        self.scoring.reset();
        self.time_ticks = 0;
        self.spawner.reset(now_ms);
        let first = self.spawner.spawn(&self.config, 0.0);
        self.obstacles.clear();
        self.obstacles.push(first);
        self.phase = GamePhase::Playing;
        log::info!("Run started at {:.0}ms", now_ms);
    }

    /// Leave Playing for GameOver. Returns the final score on the transition,
    /// None if the run was not in progress.
    pub fn end_run(&mut self, cause: GameOverCause) -> Option<u64> {
        if self.phase != GamePhase::Playing {
            return None;
        }
        self.phase = GamePhase::GameOver;
        let score = self.score();
        log::info!("Game over ({:?}) with score {}", cause, score);
        Some(score)
    }

    /// Back to a fresh Start screen
    pub fn close(&mut self) {
        self.phase = GamePhase::Start;
        self.bird = Bird::new(&self.config);
        self.obstacles.clear();
        self.scoring.reset();
        self.time_ticks = 0;
    }
}
