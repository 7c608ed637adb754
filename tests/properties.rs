//! Property tests for the tick pipeline

use std::collections::HashMap;

use flappy_egg::GameConfig;
use flappy_egg::sim::{GamePhase, GameState, TickInput, autopilot, tick};
use proptest::prelude::*;

const FRAME_MS: f64 = 1000.0 / 60.0;

fn playing(seed: u64) -> GameState {
    let mut state = GameState::new(GameConfig::default(), seed);
    state.start(0.0);
    state
}

proptest! {
    #[test]
    fn velocity_is_gravity_or_jump(seed in any::<u64>(), jumps in prop::collection::vec(any::<bool>(), 1..300)) {
        let mut state = playing(seed);
        let config = state.config.clone();

        for (i, jump) in jumps.into_iter().enumerate() {
            if state.phase != GamePhase::Playing {
                break;
            }
            let before = state.bird.velocity;
            tick(&mut state, &TickInput { jump }, (i + 1) as f64 * FRAME_MS);

            if jump {
                prop_assert_eq!(state.bird.velocity, config.jump_velocity);
            } else {
                prop_assert_eq!(state.bird.velocity, before + config.gravity);
            }
        }
    }

    #[test]
    fn bird_stays_in_bounds(seed in any::<u64>(), jumps in prop::collection::vec(any::<bool>(), 1..400)) {
        let mut state = playing(seed);
        let max_y = state.config.bird_max_y();

        for (i, jump) in jumps.into_iter().enumerate() {
            tick(&mut state, &TickInput { jump }, (i + 1) as f64 * FRAME_MS);
            prop_assert!(state.bird.y >= 0.0 && state.bird.y <= max_y);
        }
    }

    #[test]
    fn score_counts_each_pipe_once(seed in any::<u64>(), noise in prop::collection::vec(prop::bool::weighted(0.05), 600)) {
        let mut state = playing(seed);
        let mut last_score = 0;

        for (i, extra) in noise.into_iter().enumerate() {
            if state.phase != GamePhase::Playing {
                break;
            }
            let passed_before: HashMap<u32, bool> =
                state.obstacles.iter().map(|o| (o.id, o.passed())).collect();

            let jump = autopilot::should_flap(&state) || extra;
            tick(&mut state, &TickInput { jump }, (i + 1) as f64 * FRAME_MS);

            let mut flips = 0;
            for obstacle in &state.obstacles {
                match passed_before.get(&obstacle.id) {
                    // Passed pipes never go back
                    Some(true) => prop_assert!(obstacle.passed()),
                    Some(false) if obstacle.passed() => flips += 1,
                    None => prop_assert!(!obstacle.passed()),
                    _ => {}
                }
            }

            prop_assert!(state.score() >= last_score);
            prop_assert_eq!(state.score() - last_score, flips);
            last_score = state.score();
        }
    }

    #[test]
    fn spawned_gaps_fit_playfield(seed in any::<u64>()) {
        let mut state = playing(seed);
        let (min_top, max_top) = state.config.gap_top_range();
        let floor = state.config.height - state.config.pipe_min_length;
        for _ in 0..50 {
            let obstacle = state.spawner.spawn(&state.config, 0.0);
            prop_assert!(obstacle.gap_top >= min_top && obstacle.gap_top <= max_top);
            prop_assert!(obstacle.gap_bottom() <= floor);
        }
    }
}
