//! Demo mode controller
//!
//! Flaps when the bird is about to sink below the next gap. Good enough to
//! clear a few pipes for headless runs and attract screens; it is not meant
//! to play well.

use super::state::GameState;

/// Keep the bird's bottom at least this far above the gap bottom
const BOTTOM_CLEARANCE: f32 = 24.0;

/// Decide whether to jump this tick
pub fn should_flap(state: &GameState) -> bool {
    let config = &state.config;
    let bird = &state.bird;

    // Only react while falling, otherwise one flap turns into a rocket
    if bird.velocity < 0.0 {
        return false;
    }

    let target_bottom = state
        .obstacles
        .iter()
        .find(|o| o.right() >= bird.left())
        .map(|o| o.gap_bottom() - BOTTOM_CLEARANCE)
        .unwrap_or(config.height / 2.0 + bird.size);

    let next_bottom = bird.y + bird.size + bird.velocity + config.gravity;
    next_bottom > target_bottom
}
