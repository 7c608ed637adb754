//! Collision detection between the bird and pipes
//!
//! Everything is axis-aligned: the bird is a square, each pipe is two
//! rectangles (above and below the gap). Overlap tests are strict, so boxes
//! that only share an edge don't collide.

use glam::Vec2;

use super::state::{Bird, GameOverCause, Obstacle};
use crate::settings::GameConfig;

/// Axis-aligned box, y grows downward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.max.x > other.min.x && self.min.x < other.max.x
    }

    #[inline]
    pub fn overlaps_y(&self, other: &Aabb) -> bool {
        self.max.y > other.min.y && self.min.y < other.max.y
    }

    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.overlaps_x(other) && self.overlaps_y(other)
    }
}

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionReport {
    /// Bird left the playfield
    pub boundary: bool,
    /// Number of pipes the bird overlaps
    pub obstacle_hits: usize,
}

impl CollisionReport {
    pub fn is_terminal(&self) -> bool {
        self.boundary || self.obstacle_hits > 0
    }

    pub fn cause(&self) -> Option<GameOverCause> {
        match (self.boundary, self.obstacle_hits > 0) {
            (true, true) => Some(GameOverCause::BoundaryAndObstacle),
            (true, false) => Some(GameOverCause::Boundary),
            (false, true) => Some(GameOverCause::Obstacle),
            (false, false) => None,
        }
    }
}

/// Bird hitbox, shrunk vertically by `hitbox_inset` on each side
pub fn bird_hitbox(bird: &Bird, config: &GameConfig) -> Aabb {
    Aabb::new(
        Vec2::new(bird.left(), bird.y + config.hitbox_inset),
        Vec2::new(bird.right(), bird.y + bird.size - config.hitbox_inset),
    )
}

/// The top and bottom pipe rectangles
pub fn obstacle_segments(obstacle: &Obstacle, config: &GameConfig) -> [Aabb; 2] {
    [
        Aabb::new(
            Vec2::new(obstacle.x, 0.0),
            Vec2::new(obstacle.right(), obstacle.gap_top),
        ),
        Aabb::new(
            Vec2::new(obstacle.x, obstacle.gap_bottom()),
            Vec2::new(obstacle.right(), config.height),
        ),
    ]
}

/// Check a hitbox against one pipe
pub fn hits_obstacle(hitbox: &Aabb, obstacle: &Obstacle, config: &GameConfig) -> bool {
    obstacle_segments(obstacle, config)
        .iter()
        .any(|segment| hitbox.overlaps(segment))
}

/// Legal bird positions are `[0, height - size]`
#[inline]
pub fn out_of_bounds(y: f32, config: &GameConfig) -> bool {
    y < 0.0 || y > config.bird_max_y()
}

/// Full per-tick check.
///
/// `candidate_y` is where physics wants to put the bird; pipes are tested
/// against `bird` as committed. Every pipe is tested.
pub fn detect(
    bird: &Bird,
    candidate_y: f32,
    obstacles: &[Obstacle],
    config: &GameConfig,
) -> CollisionReport {
    let hitbox = bird_hitbox(bird, config);
    let obstacle_hits = obstacles
        .iter()
        .filter(|o| hits_obstacle(&hitbox, o, config))
        .count();

    CollisionReport {
        boundary: out_of_bounds(candidate_y, config),
        obstacle_hits,
    }
}
