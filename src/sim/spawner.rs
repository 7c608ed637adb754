//! Pipe spawning on a wall-clock cadence

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::Obstacle;
use crate::settings::GameConfig;

/// Produces pipes with a random gap. Cadence is measured in milliseconds
/// since the last spawn, so it doesn't depend on frame rate.
#[derive(Debug, Clone)]
pub struct ObstacleSpawner {
    rng: Pcg32,
    last_spawn_ms: f64,
    next_id: u32,
}

impl ObstacleSpawner {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            last_spawn_ms: 0.0,
            next_id: 1,
        }
    }

    pub fn last_spawn_ms(&self) -> f64 {
        self.last_spawn_ms
    }

    /// Restart the cadence from `now_ms`
    pub fn reset(&mut self, now_ms: f64) {
        self.last_spawn_ms = now_ms;
    }

    /// Build a pipe at the right edge plus `offset`
    pub fn spawn(&mut self, config: &GameConfig, offset: f32) -> Obstacle {
        let (min_top, max_top) = config.gap_top_range();
        let gap_top = if max_top > min_top {
            self.rng.random_range(min_top..=max_top)
        } else {
            min_top
        };

        let id = self.next_id;
        self.next_id += 1;
        Obstacle::new(id, config.width + offset, config.pipe_width, gap_top, config.pipe_gap)
    }

    /// True once strictly more than the spawn interval has elapsed
    pub fn is_due(&self, config: &GameConfig, now_ms: f64) -> bool {
        now_ms - self.last_spawn_ms > config.spawn_interval_ms
    }

    /// Spawn at offset 0 if the interval elapsed, restarting the cadence
    pub fn spawn_if_due(&mut self, config: &GameConfig, now_ms: f64) -> Option<Obstacle> {
        if !self.is_due(config, now_ms) {
            return None;
        }
        self.last_spawn_ms = now_ms;
        let obstacle = self.spawn(config, 0.0);
        log::debug!("Spawned pipe {} gap_top={:.1}", obstacle.id, obstacle.gap_top);
        Some(obstacle)
    }
}
