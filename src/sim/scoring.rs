//! Run score

use super::state::Obstacle;

/// Score for the current run. Only ever goes up until `reset`.
#[derive(Debug, Clone, Default)]
pub struct ScoreTracker {
    score: u64,
}

impl ScoreTracker {
    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn reset(&mut self) {
        self.score = 0;
    }

    /// Award a point for every pipe whose right edge is left of `bird_left`
    /// and that hasn't been counted yet. Returns points awarded.
    pub fn award_passed(&mut self, obstacles: &mut [Obstacle], bird_left: f32) -> u32 {
        let mut awarded = 0;
        for obstacle in obstacles.iter_mut() {
            if obstacle.right() < bird_left && obstacle.mark_passed() {
                self.score += 1;
                awarded += 1;
                log::debug!("Passed pipe {}, score {}", obstacle.id, self.score);
            }
        }
        awarded
    }
}
