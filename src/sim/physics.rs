//! Per-tick motion
//!
//! Gravity accumulates into velocity; a jump overwrites it. Position is
//! integrated after velocity. Bounds are not checked here.

use super::state::{Bird, Obstacle};
use crate::settings::GameConfig;

/// Bird motion after one tick, before bounds are applied
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub y: f32,
    pub velocity: f32,
}

/// Integrate one tick of bird motion.
///
/// With `jump` set the velocity becomes `jump_velocity` for this tick
/// instead of gaining gravity.
pub fn step_bird(bird: &Bird, jump: bool, config: &GameConfig) -> Motion {
    let velocity = if jump {
        config.jump_velocity
    } else {
        bird.velocity + config.gravity
    };
    Motion {
        y: bird.y + velocity,
        velocity,
    }
}

/// Scroll pipes left and drop the ones past the despawn line
pub fn advance_obstacles(obstacles: &mut Vec<Obstacle>, config: &GameConfig) {
    for obstacle in obstacles.iter_mut() {
        obstacle.x -= config.pipe_speed;
    }
    obstacles.retain(|o| o.x > config.despawn_x);
}
